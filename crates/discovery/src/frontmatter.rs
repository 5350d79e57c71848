use serde::Serialize;

/// Coarse type tag inferred for a front-matter field.
///
/// Mirrors the catalog's schema type classes so the publisher can map each
/// tag straight onto a schema field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Boolean,
    Date,
    Time,
    Number,
    Bytes,
    Array,
    Map,
    Null,
    Text,
}

/// A named front-matter field with its inferred type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FrontMatterField {
    pub name: String,
    pub field_type: FieldType,
}

/// Ordered inference rules: the first rule whose pattern occurs in the
/// lowercased field name wins. The policy is data, not control flow, so it
/// can be audited and tested on its own.
///
/// Note: matching is on the field *name*, never the value. A field named
/// `date` that holds the string `"hello"` is still tagged `Date`.
const TYPE_RULES: &[(&[&str], FieldType)] = &[
    (&["bool", "flag", "enabled", "checked"], FieldType::Boolean),
    (
        &[
            "timestamp", "datetime", "date", "created", "modified", "updated", "due",
        ],
        FieldType::Date,
    ),
    (&["time"], FieldType::Time),
    (
        &[
            "int", "long", "number", "float", "double", "count", "size", "total", "rating",
            "priority",
        ],
        FieldType::Number,
    ),
    (&["byte", "blob"], FieldType::Bytes),
    (&["array", "list", "tags", "aliases"], FieldType::Array),
    (&["map", "json", "object", "struct"], FieldType::Map),
    (&["null", "none", "nullable", "optional"], FieldType::Null),
];

/// Infer a type tag from a field name.
///
/// Total and deterministic: every input yields exactly one tag, and the same
/// name always yields the same tag. Unmatched names fall through to
/// [`FieldType::Text`].
pub fn infer_field_type(name: &str) -> FieldType {
    let lowered = name.to_lowercase();
    for (patterns, field_type) in TYPE_RULES {
        if patterns.iter().any(|p| lowered.contains(p)) {
            return *field_type;
        }
    }
    FieldType::Text
}

/// Detect a structured preamble at the top of note content and infer a type
/// for each key.
///
/// Two shapes are recognized, both line-based and best effort:
/// - a `---` fenced block, read up to the closing fence;
/// - a fenceless run of leading `key: value` lines, read until the first
///   line that does not parse as one.
///
/// Malformed or absent preambles yield an empty list, never an error.
pub fn parse_front_matter(content: &str) -> Vec<FrontMatterField> {
    let mut lines = content.lines().peekable();
    let fenced = matches!(lines.peek(), Some(l) if l.trim_end() == "---");
    if fenced {
        lines.next();
    }

    let mut fields = Vec::new();
    for line in lines {
        if fenced && line.trim_end() == "---" {
            break;
        }
        match parse_key(line) {
            Some(key) => fields.push(FrontMatterField {
                field_type: infer_field_type(key),
                name: key.to_string(),
            }),
            // inside a fence, skip odd lines (list items, wrapped values);
            // without a fence the preamble ends at the first non-pair line
            None if fenced => continue,
            None => break,
        }
    }
    fields
}

/// Parse `key: value` with an identifier-like key, returning the key.
fn parse_key(line: &str) -> Option<&str> {
    let (key, rest) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return None;
    }
    // require `key:` at end of line or `key: value`, not `key:value`
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(key)
}

use chrono::{DateTime, Local};
use notehub_discovery::{ExtractionReport, Note, Vault};

pub(crate) fn format_vault_info(vault: &Vault, report: &ExtractionReport) -> String {
    format!(
        "Vault: {}\n  Location: {}\n  Notes: {}\n",
        vault.name,
        vault.root.display(),
        report.notes.len()
    )
}

pub(crate) fn format_note_info(note: &Note, indent: &str) -> String {
    let modified = DateTime::<Local>::from(note.modified);
    let mut out = format!(
        "{indent}{}\n{indent}  Path: {}\n{indent}  Modified: {}\n{indent}  Size: {} bytes\n",
        note.name(),
        note.relative_path.display(),
        modified.format("%Y-%m-%d %H:%M:%S"),
        note.size
    );
    if !note.fields.is_empty() {
        let fields: Vec<String> = note
            .fields
            .iter()
            .map(|f| format!("{} ({:?})", f.name, f.field_type))
            .collect();
        out.push_str(&format!("{indent}  Fields: {}\n", fields.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_discovery::{FieldType, FrontMatterField};
    use std::path::PathBuf;
    use std::time::SystemTime;

    #[test]
    fn note_rendering_includes_fields() {
        let note = Note {
            path: PathBuf::from("/v/a.md"),
            relative_path: PathBuf::from("a.md"),
            size: 10,
            modified: SystemTime::UNIX_EPOCH,
            fields: vec![FrontMatterField {
                name: "due".to_string(),
                field_type: FieldType::Date,
            }],
        };
        let rendered = format_note_info(&note, "  ");
        assert!(rendered.contains("Path: a.md"));
        assert!(rendered.contains("Size: 10 bytes"));
        assert!(rendered.contains("due (Date)"));
    }
}

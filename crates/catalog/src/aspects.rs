use crate::emitter::CatalogConfig;
use crate::urn::{dataset_name, dataset_urn, PLATFORM_URN};
use chrono::{DateTime, SecondsFormat, Utc};
use notehub_discovery::{FieldType, Note, Vault};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// One aspect kind attached to a note dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Properties,
    Status,
    Ownership,
    Schema,
    Browse,
    Domain,
}

/// Emission order for a full ingest: properties first so the entity renders
/// in the UI even if a later aspect fails.
pub const ASPECT_EMIT_ORDER: [Aspect; 6] = [
    Aspect::Properties,
    Aspect::Status,
    Aspect::Ownership,
    Aspect::Schema,
    Aspect::Browse,
    Aspect::Domain,
];

impl Aspect {
    pub const fn as_str(self) -> &'static str {
        match self {
            Aspect::Properties => "properties",
            Aspect::Status => "status",
            Aspect::Ownership => "ownership",
            Aspect::Schema => "schema",
            Aspect::Browse => "browse",
            Aspect::Domain => "domain",
        }
    }

    const fn aspect_name(self) -> &'static str {
        match self {
            Aspect::Properties => "datasetProperties",
            Aspect::Status => "status",
            Aspect::Ownership => "ownership",
            Aspect::Schema => "schemaMetadata",
            Aspect::Browse => "browsePaths",
            Aspect::Domain => "domains",
        }
    }
}

/// A single change proposal for the catalog's ingestion endpoint.
#[derive(Debug, Clone)]
pub struct MetadataChangeProposal {
    pub entity_type: &'static str,
    pub entity_urn: String,
    pub aspect_name: &'static str,
    pub aspect: Value,
}

/// Build the proposal for one aspect of one note.
///
/// Returns `None` for [`Aspect::Domain`] when no domain is configured.
pub fn build_aspect(
    aspect: Aspect,
    vault: &Vault,
    note: &Note,
    config: &CatalogConfig,
) -> Option<MetadataChangeProposal> {
    let name = dataset_name(vault, note);
    let urn = dataset_urn(&name);

    let value = match aspect {
        Aspect::Properties => dataset_properties(vault, note, &name, config),
        Aspect::Status => json!({ "removed": false }),
        Aspect::Ownership => ownership(config),
        Aspect::Schema => schema_metadata(note, &name),
        Aspect::Browse => json!({ "paths": [browse_path(vault, note)] }),
        Aspect::Domain => json!({ "domains": [config.domain_urn.clone()?] }),
    };

    Some(MetadataChangeProposal {
        entity_type: "dataset",
        entity_urn: urn,
        aspect_name: aspect.aspect_name(),
        aspect: value,
    })
}

/// Browse path used for UI navigation.
pub fn browse_path(vault: &Vault, note: &Note) -> String {
    format!(
        "obsidian/{}/{}",
        vault.name,
        note.relative_path.display()
    )
}

/// Bootstrap pair for a domain entity: key aspect (required) then
/// display properties.
pub(crate) fn domain_bootstrap(domain_urn: &str) -> [MetadataChangeProposal; 2] {
    // urn:li:domain:<name>
    let domain_name = domain_urn.rsplit(':').next().unwrap_or(domain_urn);
    [
        MetadataChangeProposal {
            entity_type: "domain",
            entity_urn: domain_urn.to_string(),
            aspect_name: "domainKey",
            aspect: json!({ "id": domain_name }),
        },
        MetadataChangeProposal {
            entity_type: "domain",
            entity_urn: domain_urn.to_string(),
            aspect_name: "domainProperties",
            aspect: json!({
                "name": domain_name,
                "description": "Domain for note vaults",
            }),
        },
    ]
}

fn dataset_properties(
    vault: &Vault,
    note: &Note,
    dataset_name: &str,
    config: &CatalogConfig,
) -> Value {
    let modified = DateTime::<Utc>::from(note.modified);
    json!({
        "name": dataset_name,
        "description": format!(
            "Note from vault: {}\nPath: {}",
            vault.name,
            note.relative_path.display()
        ),
        "customProperties": {
            "vault_name": vault.name,
            "vault_path": vault.root.display().to_string(),
            "note_path": note.relative_path.display().to_string(),
            "size_bytes": note.size.to_string(),
            "last_modified": modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            // qualifiedName matters for search and integrations
            "qualifiedName": format!("{dataset_name}@{}", config.user),
            "owners": config.owner_urn,
        },
    })
}

fn ownership(config: &CatalogConfig) -> Value {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    json!({
        "owners": [{
            "owner": config.owner_urn,
            "type": "DATAOWNER",
            "source": { "type": "MANUAL" },
        }],
        "lastModified": { "time": now_ms, "actor": config.owner_urn },
    })
}

fn schema_metadata(note: &Note, dataset_name: &str) -> Value {
    let modified = DateTime::<Utc>::from(note.modified);

    // four fixed fields every note dataset exposes
    let mut fields = vec![
        schema_field("note_name", FieldType::Text, "Note base name (without extension)"),
        schema_field("note_path", FieldType::Text, "Path of the note relative to the vault root"),
        schema_field("size_bytes", FieldType::Number, "File size in bytes"),
        schema_field("last_modified", FieldType::Date, "Last modification time (ISO 8601)"),
    ];

    // plus one field per detected front-matter key
    for field in &note.fields {
        fields.push(schema_field(&field.name, field.field_type, "Front-matter field"));
    }

    json!({
        "schemaName": dataset_name,
        "platform": PLATFORM_URN,
        "version": 0,
        "hash": "",
        "platformSchema": { "com.linkedin.schema.Schemaless": {} },
        "fields": fields,
        "created": { "time": 0, "actor": "urn:li:corpuser:unknown" },
        "lastModified": {
            "time": modified.timestamp_millis(),
            "actor": "urn:li:corpuser:unknown",
        },
    })
}

fn schema_field(path: &str, field_type: FieldType, description: &str) -> Value {
    let (type_class, native) = schema_type(field_type);
    let mut type_union = serde_json::Map::new();
    type_union.insert(type_class.to_string(), json!({}));
    json!({
        "fieldPath": path,
        "type": { "type": type_union },
        "nativeDataType": native,
        "nullable": field_type == FieldType::Null,
        "description": description,
    })
}

/// Map an inferred field type onto the catalog's schema type class and a
/// native type string.
fn schema_type(field_type: FieldType) -> (&'static str, &'static str) {
    match field_type {
        FieldType::Boolean => ("com.linkedin.schema.BooleanType", "boolean"),
        FieldType::Date => ("com.linkedin.schema.DateType", "date"),
        FieldType::Time => ("com.linkedin.schema.TimeType", "time"),
        FieldType::Number => ("com.linkedin.schema.NumberType", "number"),
        FieldType::Bytes => ("com.linkedin.schema.BytesType", "bytes"),
        FieldType::Array => ("com.linkedin.schema.ArrayType", "array"),
        FieldType::Map => ("com.linkedin.schema.MapType", "map"),
        FieldType::Null => ("com.linkedin.schema.NullType", "null"),
        FieldType::Text => ("com.linkedin.schema.StringType", "string"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_discovery::FrontMatterField;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn fixtures() -> (Vault, Note, CatalogConfig) {
        let vault = Vault {
            root: PathBuf::from("/vaults/Kha"),
            name: "Kha".to_string(),
        };
        let note = Note {
            path: PathBuf::from("/vaults/Kha/plans/q3.md"),
            relative_path: PathBuf::from("plans/q3.md"),
            size: 42,
            modified: SystemTime::UNIX_EPOCH,
            fields: vec![
                FrontMatterField {
                    name: "due".to_string(),
                    field_type: FieldType::Date,
                },
                FrontMatterField {
                    name: "done".to_string(),
                    field_type: FieldType::Boolean,
                },
            ],
        };
        let config = CatalogConfig {
            owner_urn: "urn:li:corpuser:kha".to_string(),
            user: "kha".to_string(),
            domain_urn: Some("urn:li:domain:notes".to_string()),
            ..CatalogConfig::default()
        };
        (vault, note, config)
    }

    #[test]
    fn properties_aspect_carries_stat_metadata() {
        let (vault, note, config) = fixtures();
        let mcp = build_aspect(Aspect::Properties, &vault, &note, &config).unwrap();

        assert_eq!(mcp.entity_type, "dataset");
        assert_eq!(mcp.aspect_name, "datasetProperties");
        assert_eq!(
            mcp.entity_urn,
            "urn:li:dataset:(urn:li:dataPlatform:obsidian,obsidian.Kha.q3,PROD)"
        );

        let props = &mcp.aspect["customProperties"];
        assert_eq!(props["vault_name"], "Kha");
        assert_eq!(props["note_path"], "plans/q3.md");
        assert_eq!(props["size_bytes"], "42");
        assert_eq!(props["last_modified"], "1970-01-01T00:00:00Z");
        assert_eq!(props["qualifiedName"], "obsidian.Kha.q3@kha");
    }

    #[test]
    fn schema_aspect_includes_front_matter_fields() {
        let (vault, note, config) = fixtures();
        let mcp = build_aspect(Aspect::Schema, &vault, &note, &config).unwrap();

        let fields = mcp.aspect["fields"].as_array().unwrap();
        let paths: Vec<_> = fields.iter().map(|f| f["fieldPath"].as_str().unwrap()).collect();
        assert_eq!(
            paths,
            vec!["note_name", "note_path", "size_bytes", "last_modified", "due", "done"]
        );

        let due = &fields[4];
        assert_eq!(due["nativeDataType"], "date");
        assert!(due["type"]["type"]["com.linkedin.schema.DateType"].is_object());

        let done = &fields[5];
        assert!(done["type"]["type"]["com.linkedin.schema.BooleanType"].is_object());
    }

    #[test]
    fn domain_aspect_requires_configuration() {
        let (vault, note, mut config) = fixtures();
        assert!(build_aspect(Aspect::Domain, &vault, &note, &config).is_some());

        config.domain_urn = None;
        assert!(build_aspect(Aspect::Domain, &vault, &note, &config).is_none());
    }

    #[test]
    fn browse_path_keeps_relative_layout() {
        let (vault, note, _) = fixtures();
        assert_eq!(browse_path(&vault, &note), "obsidian/Kha/plans/q3.md");
    }

    #[test]
    fn domain_bootstrap_emits_key_then_properties() {
        let [key, props] = domain_bootstrap("urn:li:domain:notes");
        assert_eq!(key.aspect_name, "domainKey");
        assert_eq!(key.aspect["id"], "notes");
        assert_eq!(props.aspect_name, "domainProperties");
        assert_eq!(props.aspect["name"], "notes");
    }
}

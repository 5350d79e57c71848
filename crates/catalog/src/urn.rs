use notehub_discovery::{Note, Vault};

/// Platform id the catalog files note datasets under.
pub const PLATFORM: &str = "obsidian";

/// Full platform URN.
pub const PLATFORM_URN: &str = "urn:li:dataPlatform:obsidian";

/// Qualified dataset name: `obsidian.<vault>.<note>`, spaces replaced so
/// the name is URN-safe.
pub fn dataset_name(vault: &Vault, note: &Note) -> String {
    let safe_vault = vault.name.replace(' ', "_");
    let safe_note = note.name().replace(' ', "_");
    format!("{PLATFORM}.{safe_vault}.{safe_note}")
}

/// Dataset URN for a qualified dataset name.
pub fn dataset_urn(dataset_name: &str) -> String {
    format!("urn:li:dataset:({PLATFORM_URN},{dataset_name},PROD)")
}

/// Normalize a domain identifier: a bare name becomes a full domain URN,
/// an already-qualified URN passes through unchanged.
pub fn domain_urn(raw: &str) -> String {
    if raw.starts_with("urn:li:domain:") {
        raw.to_string()
    } else {
        format!("urn:li:domain:{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn fixtures() -> (Vault, Note) {
        let vault = Vault {
            root: PathBuf::from("/vaults/My Vault"),
            name: "My Vault".to_string(),
        };
        let note = Note {
            path: PathBuf::from("/vaults/My Vault/daily plan.md"),
            relative_path: PathBuf::from("daily plan.md"),
            size: 12,
            modified: SystemTime::UNIX_EPOCH,
            fields: Vec::new(),
        };
        (vault, note)
    }

    #[test]
    fn dataset_name_is_urn_safe() {
        let (vault, note) = fixtures();
        assert_eq!(dataset_name(&vault, &note), "obsidian.My_Vault.daily_plan");
    }

    #[test]
    fn dataset_urn_shape() {
        assert_eq!(
            dataset_urn("obsidian.V.n"),
            "urn:li:dataset:(urn:li:dataPlatform:obsidian,obsidian.V.n,PROD)"
        );
    }

    #[test]
    fn domain_urn_normalization() {
        assert_eq!(domain_urn("notes"), "urn:li:domain:notes");
        assert_eq!(domain_urn("urn:li:domain:notes"), "urn:li:domain:notes");
    }
}

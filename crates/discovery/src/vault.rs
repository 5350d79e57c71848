use crate::error::{DiscoveryError, Result};
use crate::frontmatter::FrontMatterField;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A directory tree recognized as a self-contained collection of notes via
/// its marker subdirectory.
///
/// Vaults are rediscovered from disk on every run and never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Vault {
    /// Absolute root of the vault.
    pub root: PathBuf,

    /// Display name (directory basename).
    pub name: String,
}

impl Vault {
    /// Open an explicit path as a vault, checking that it exists and
    /// carries the marker subdirectory.
    pub fn open(root: impl AsRef<Path>, marker_dir: &str) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DiscoveryError::InvalidPath(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        if !root.join(marker_dir).is_dir() {
            return Err(DiscoveryError::InvalidPath(format!(
                "missing {marker_dir} marker: {}",
                root.display()
            )));
        }

        let root = root.canonicalize()?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self { root, name })
    }
}

/// One discovered note file.
///
/// Immutable once built; the relative path always resolves under the owning
/// vault's root.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Note {
    /// Absolute path on disk.
    pub path: PathBuf,

    /// Path relative to the vault root.
    pub relative_path: PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: SystemTime,

    /// Front-matter fields detected in the note, if any.
    pub fields: Vec<FrontMatterField>,
}

impl Note {
    /// Note base name without extension.
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn open_requires_marker() {
        let temp = tempdir().unwrap();
        assert!(Vault::open(temp.path(), ".obsidian").is_err());

        fs::create_dir(temp.path().join(".obsidian")).unwrap();
        let vault = Vault::open(temp.path(), ".obsidian").unwrap();
        assert_eq!(
            vault.name,
            temp.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn open_rejects_missing_directory() {
        let temp = tempdir().unwrap();
        let gone = temp.path().join("nope");
        assert!(Vault::open(&gone, ".obsidian").is_err());
    }

    #[test]
    fn note_name_strips_extension() {
        let note = Note {
            path: PathBuf::from("/v/sub/daily plan.md"),
            relative_path: PathBuf::from("sub/daily plan.md"),
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            fields: Vec::new(),
        };
        assert_eq!(note.name(), "daily plan");
    }
}

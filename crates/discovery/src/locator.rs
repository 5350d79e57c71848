use crate::vault::Vault;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker subdirectory whose presence identifies a vault.
pub const DEFAULT_MARKER_DIR: &str = ".obsidian";

/// Conventional vault locations under a home directory.
///
/// Roots that do not exist on a given machine are skipped at locate time,
/// so the full list is always safe to pass in.
pub fn default_search_roots(home: impl AsRef<Path>) -> Vec<PathBuf> {
    let home = home.as_ref();
    vec![
        // iCloud-synced vaults
        home.join("Library/Mobile Documents/iCloud~md~obsidian/Documents"),
        home.join("Documents"),
        home.join("Obsidian"),
    ]
}

/// Locator configuration, built by the caller.
///
/// The locator never consults the process environment; the boundary
/// component is responsible for sourcing env vars and turning them into a
/// config value.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Directories whose immediate subdirectories are checked for vaults.
    pub search_roots: Vec<PathBuf>,

    /// Name of the marker subdirectory identifying a vault.
    pub marker_dir: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            search_roots: Vec::new(),
            marker_dir: DEFAULT_MARKER_DIR.to_string(),
        }
    }
}

/// Finds vaults by scanning search roots for marker subdirectories.
pub struct VaultLocator {
    config: LocatorConfig,
}

impl VaultLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Scan all configured search roots.
    ///
    /// Non-existent roots are silently skipped; a machine without a given
    /// storage backend simply contributes nothing. Never fails, returns an
    /// empty list when nothing matches. Duplicate discoveries (overlapping
    /// roots, symlinked locations) are reported once.
    pub fn locate(&self) -> Vec<Vault> {
        let mut vaults: Vec<Vault> = Vec::new();

        for root in &self.config.search_roots {
            let entries = match fs::read_dir(root) {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("Skipping search root {}: {e}", root.display());
                    continue;
                }
            };

            for entry in entries.flatten() {
                let candidate = entry.path();
                if !candidate.is_dir() {
                    continue;
                }
                match Vault::open(&candidate, &self.config.marker_dir) {
                    Ok(vault) => {
                        if !vaults.iter().any(|v| v.root == vault.root) {
                            vaults.push(vault);
                        }
                    }
                    Err(_) => continue,
                }
            }
        }

        log::info!("Found {} vault(s)", vaults.len());
        vaults
    }

    /// Check a single explicit path, e.g. a user-supplied override.
    ///
    /// Returns `None` when the path is missing or lacks the marker.
    pub fn probe(&self, path: impl AsRef<Path>) -> Option<Vault> {
        match Vault::open(path.as_ref(), &self.config.marker_dir) {
            Ok(vault) => Some(vault),
            Err(e) => {
                log::warn!("Not a vault: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn make_vault(root: &Path, name: &str) -> PathBuf {
        let vault = root.join(name);
        fs::create_dir_all(vault.join(DEFAULT_MARKER_DIR)).unwrap();
        vault
    }

    #[test]
    fn finds_marked_subdirectories() {
        let temp = tempdir().unwrap();
        make_vault(temp.path(), "Personal");
        make_vault(temp.path(), "Work");
        fs::create_dir(temp.path().join("not-a-vault")).unwrap();
        fs::write(temp.path().join("stray.md"), b"x").unwrap();

        let locator = VaultLocator::new(LocatorConfig {
            search_roots: vec![temp.path().to_path_buf()],
            ..LocatorConfig::default()
        });
        let mut names: Vec<_> = locator.locate().into_iter().map(|v| v.name).collect();
        names.sort();

        assert_eq!(names, vec!["Personal", "Work"]);
    }

    #[test]
    fn empty_when_no_markers_anywhere() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("plain")).unwrap();

        let locator = VaultLocator::new(LocatorConfig {
            search_roots: vec![temp.path().to_path_buf()],
            ..LocatorConfig::default()
        });
        assert_eq!(locator.locate(), Vec::new());
    }

    #[test]
    fn nonexistent_roots_are_skipped() {
        let locator = VaultLocator::new(LocatorConfig {
            search_roots: vec![PathBuf::from("/nonexistent/notehub-test-root")],
            ..LocatorConfig::default()
        });
        assert_eq!(locator.locate(), Vec::new());
    }

    #[test]
    fn duplicate_roots_reported_once() {
        let temp = tempdir().unwrap();
        make_vault(temp.path(), "Solo");

        let locator = VaultLocator::new(LocatorConfig {
            search_roots: vec![temp.path().to_path_buf(), temp.path().to_path_buf()],
            ..LocatorConfig::default()
        });
        assert_eq!(locator.locate().len(), 1);
    }

    #[test]
    fn probe_accepts_only_marked_dirs() {
        let temp = tempdir().unwrap();
        let vault = make_vault(temp.path(), "Probe");
        let locator = VaultLocator::new(LocatorConfig::default());

        assert!(locator.probe(&vault).is_some());
        assert!(locator.probe(temp.path().join("missing")).is_none());
    }
}

use crate::frontmatter::parse_front_matter;
use crate::locator::DEFAULT_MARKER_DIR;
use crate::report::ExtractionReport;
use crate::vault::{Note, Vault};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

/// Extractor configuration.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Extension of note files, without the dot.
    pub note_extension: String,

    /// Marker subdirectory to exclude; its contents are vault internals,
    /// not notes.
    pub marker_dir: String,

    /// Whether to read note content and detect a front-matter preamble.
    pub parse_front_matter: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            note_extension: "md".to_string(),
            marker_dir: DEFAULT_MARKER_DIR.to_string(),
            parse_front_matter: true,
        }
    }
}

/// Walks a vault and builds one metadata record per note.
#[derive(Default)]
pub struct NoteExtractor {
    config: ExtractorConfig,
}

impl NoteExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract all notes under the vault root.
    ///
    /// A file that cannot be stat'd or read is recorded as a skip and never
    /// aborts the walk; a vault that vanishes mid-walk degrades to a
    /// partial (or empty) report the same way. Notes come back most
    /// recently modified first, ties broken by relative path.
    pub fn extract(&self, vault: &Vault) -> ExtractionReport {
        let mut report = ExtractionReport::new();

        let marker = self.config.marker_dir.clone();
        let mut builder = WalkBuilder::new(&vault.root);
        builder
            .standard_filters(false)
            .filter_entry(move |entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| name != marker)
                    .unwrap_or(true)
            });

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry in {}: {e}", vault.root.display());
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            if !self.is_note_file(path) {
                continue;
            }

            match self.build_note(path, vault) {
                Ok(note) => report.add_note(note),
                Err(reason) => {
                    log::warn!("Skipping {}: {reason}", path.display());
                    report.add_skip(path.to_path_buf(), reason);
                }
            }
        }

        report.notes.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        log::info!(
            "Vault {}: {} note(s), {} skipped",
            vault.name,
            report.notes.len(),
            report.skipped.len()
        );
        report
    }

    fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.note_extension))
    }

    /// Stat and optionally read one file. Errors come back as the skip
    /// reason, not as a failure of the extraction.
    fn build_note(&self, path: &Path, vault: &Vault) -> std::result::Result<Note, String> {
        let metadata = fs::metadata(path).map_err(|e| format!("stat failed: {e}"))?;
        if !metadata.is_file() {
            return Err("not a regular file".to_string());
        }
        let modified = metadata
            .modified()
            .map_err(|e| format!("no modification time: {e}"))?;

        let fields = if self.config.parse_front_matter {
            let content =
                fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
            parse_front_matter(&content)
        } else {
            Vec::new()
        };

        let relative_path = path
            .strip_prefix(&vault.root)
            .map_err(|_| format!("outside vault root: {}", path.display()))?
            .to_path_buf();

        Ok(Note {
            path: path.to_path_buf(),
            relative_path,
            size: metadata.len(),
            modified,
            fields,
        })
    }
}

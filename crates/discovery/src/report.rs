use crate::vault::Note;
use serde::Serialize;
use std::path::PathBuf;

/// A file the extractor could not turn into a note, with the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one vault extraction.
///
/// Per-file failures are accumulated here instead of being swallowed inside
/// the walk, so callers can inspect exactly what was left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Notes, most recently modified first.
    pub notes: Vec<Note>,

    /// Files matched by the walk but skipped, each with a reason.
    pub skipped: Vec<SkippedFile>,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn add_skip(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            path,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.skipped.is_empty()
    }
}

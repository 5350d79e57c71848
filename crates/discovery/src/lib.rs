//! # Notehub Discovery
//!
//! Vault and note discovery for catalog ingestion.
//!
//! ## Pipeline
//!
//! ```text
//! Search roots
//!     │
//!     ├──> Vault Locator (marker-dir detection)
//!     │      └─> Vaults
//!     │
//!     └──> Note Extractor (recursive walk, per-file stat + front matter)
//!            └─> ExtractionReport (notes + skipped files)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use notehub_discovery::{LocatorConfig, NoteExtractor, VaultLocator};
//!
//! let locator = VaultLocator::new(LocatorConfig::default());
//! let extractor = NoteExtractor::default();
//!
//! for vault in locator.locate() {
//!     let report = extractor.extract(&vault);
//!     println!("{}: {} notes", vault.name, report.notes.len());
//! }
//! ```
//!
//! Everything here is a pure filesystem read: no state outlives a run, and
//! a missing search root or an unreadable file degrades to an empty or
//! partial result rather than an error.

mod error;
mod extractor;
mod frontmatter;
mod locator;
mod report;
mod vault;

pub use error::{DiscoveryError, Result};
pub use extractor::{ExtractorConfig, NoteExtractor};
pub use frontmatter::{infer_field_type, parse_front_matter, FieldType, FrontMatterField};
pub use locator::{default_search_roots, LocatorConfig, VaultLocator, DEFAULT_MARKER_DIR};
pub use report::{ExtractionReport, SkippedFile};
pub use vault::{Note, Vault};

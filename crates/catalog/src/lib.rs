//! # Notehub Catalog
//!
//! Publishes note metadata to a DataHub-compatible catalog.
//!
//! Notes come in as [`notehub_discovery`] records; each one becomes a
//! catalog dataset, described by a set of aspects (properties, status,
//! ownership, schema, browse path, domain) and pushed to the catalog's
//! REST ingestion endpoint. A small GraphQL helper reads back domain
//! associations for verification.

mod aspects;
mod emitter;
mod error;
mod graphql;
mod urn;

pub use aspects::{
    browse_path, build_aspect, Aspect, MetadataChangeProposal, ASPECT_EMIT_ORDER,
};
pub use emitter::{CatalogConfig, RestEmitter, DEFAULT_GMS_URL};
pub use error::{CatalogError, Result};
pub use graphql::{check_domains, DomainAssociation, DomainReport};
pub use urn::{dataset_name, dataset_urn, domain_urn, PLATFORM, PLATFORM_URN};

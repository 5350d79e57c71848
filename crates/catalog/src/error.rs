use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Catalog rejected request ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("No domain configured")]
    NoDomain,
}

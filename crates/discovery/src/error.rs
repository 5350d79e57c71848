use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid vault path: {0}")]
    InvalidPath(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed taxonomy document: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

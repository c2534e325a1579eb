use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Content not found: {0}")]
    ContentNotFound(Uuid),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

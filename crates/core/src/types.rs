use thiserror::Error;

/// The main error type for descriptor operations
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type alias for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;

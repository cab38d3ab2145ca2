use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum ImportError {
    DataAccess(String),
    DataIntegrity(String),
    Codec(String),
    Configuration(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::DataAccess(msg) => write!(f, "Data access error: {}", msg),
            ImportError::DataIntegrity(msg) => write!(f, "Data integrity error: {}", msg),
            ImportError::Codec(msg) => write!(f, "Codec error: {}", msg),
            ImportError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

pub type Result<T> = std::result::Result<T, ImportError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid metadata for entity {entity}: {detail}")]
    InvalidMetadata { entity: String, detail: String },

    #[error("Naming policy misconfiguration: {0}")]
    PolicyMisconfiguration(String),

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema document error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    pub fn invalid(entity: &str, detail: impl Into<String>) -> Self {
        GenError::InvalidMetadata {
            entity: entity.to_string(),
            detail: detail.into(),
        }
    }
}

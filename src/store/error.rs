use thiserror::Error;

/// Errors produced by the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with this id in the collection.
    #[error("{collection} document not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    /// The backing service rejected or could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

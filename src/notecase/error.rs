use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotecaseError {
    /// A draft was rejected before touching the store (empty content, missing image).
    #[error("Invalid note: {0}")]
    Validation(String),

    #[error("No notes to export")]
    EmptyCollection,

    /// An import payload was not a `notes` array of note records.
    #[error("Invalid import file: {0}")]
    Format(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl NotecaseError {
    /// True for failures the user caused and can fix; nothing was written.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            NotecaseError::Validation(_)
                | NotecaseError::EmptyCollection
                | NotecaseError::Format(_)
                | NotecaseError::Api(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotecaseError>;

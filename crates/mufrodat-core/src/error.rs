/// Result alias for core operations that can fail in more than one way.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value for '{key}' is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Rejected user input. Messages are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The Arabic form and the meaning must not be empty.")]
    MissingRequiredField,

    #[error("Input must not be empty.")]
    EmptyInput,

    #[error("No vocabulary found, check the input format.")]
    NothingFound,

    #[error("Unknown Arabic font: {0}")]
    UnknownFont(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("At least {required} entries are needed to start (have {available}).")]
    NotEnoughEntries { required: usize, available: usize },

    #[error("Could not build a quiz from the saved vocabulary. Add more distinct entries.")]
    NoQuestions,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestPlusError {
    #[error("invalid fixture scope: {0:?} (expected \"func\" or \"class\")")]
    InvalidScope(String),

    #[error("fixture '{0}' is already registered")]
    DuplicateFixture(String),

    #[error("no fixture registered under '{0}'")]
    UnknownFixture(String),

    #[error("fixture '{fixture}' producer failed: {message}")]
    Producer { fixture: String, message: String },

    #[error("{0}")]
    Failure(String),
}

pub type Result<T> = std::result::Result<T, TestPlusError>;

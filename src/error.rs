use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdacError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("duplicate instance name: {0}")]
    DuplicateInstance(String),

    #[error("dangling net `{0}`")]
    DanglingNet(String),
}

pub type Result<T> = std::result::Result<T, CdacError>;

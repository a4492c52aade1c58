use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator rejected the request: {0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

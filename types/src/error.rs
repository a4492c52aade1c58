//! Errors raised by the shared value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid governance parameters: {0}")]
    InvalidParams(String),

    #[error("failed to encode action payload: {0}")]
    ActionEncode(String),

    #[error("failed to decode action payload: {0}")]
    ActionDecode(String),
}

//! Shared utilities for the civic governance crates.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
pub use time::{format_blocks, format_duration};

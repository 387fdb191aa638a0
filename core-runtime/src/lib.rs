//! # Core Runtime
//!
//! Ambient runtime infrastructure for the cleanup workspace: structured
//! logging bootstrap shared by host applications. Library crates emit
//! through `tracing` macros; hosts call [`init_logging`](logging::init_logging)
//! once at startup to choose format and filtering.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};

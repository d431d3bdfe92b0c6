//! Common utilities and types for the salviz visualization suite

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, SalvizError};
pub use logging::{init_default_logging, init_logging, LoggingConfig};

// src/utils/mod.rs

pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used items
pub use config::*;
pub use error::{AuthError, AuthResult, ErrorKind};
pub use logger::*;

//! Core module - infrastructural components
//!
//! - Configuration
//! - Error handling
//! - Application state

pub mod config;
pub mod error;
pub mod state;

// Re-exports to simplify imports
pub use config::Config;
pub use error::AppError;
pub use state::AppState;

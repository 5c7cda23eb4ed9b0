//! `cadence-core` — configuration and the shared error type used by every
//! cadence crate.

pub mod config;
pub mod error;

pub use config::CadenceConfig;
pub use error::{CadenceError, Result};

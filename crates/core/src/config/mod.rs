//! Configuration loading and schema definitions
//!
//! Shared configuration types for both droidci binaries.

mod loader;
mod schema;

pub use loader::{Config, expand_path};
pub use schema::*;

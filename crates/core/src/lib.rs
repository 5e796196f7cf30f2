//! Core utilities for droidci Android CI tools
//!
//! This crate provides shared functionality used by both binaries:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Process execution**: captured, logged, and cancellable command execution
//! - **Health reports**: ordered OK/WARN/FAIL verdicts and exit code policy
//! - **Versions**: dotted numeric version comparison
//! - **Cancellation**: a token shared between signal handlers and polling loops
//! - **Configuration**: TOML-based defaults for every CLI flag
//!
//! # Example
//!
//! ```rust
//! use droidci_core::health::HealthReport;
//! use droidci_core::version::version_ge;
//!
//! let mut report = HealthReport::new();
//! if version_ge("34.0.0", "35.0.0") {
//!     report.ok("build-tools", "34.0.0 satisfies 35.0.0");
//! } else {
//!     report.fail("build-tools", "34.0.0 is older than required 35.0.0");
//! }
//! assert_eq!(report.exit_code(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod health;
pub mod process;
pub mod version;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::error::{Error, ErrorCode, Result, exit_codes};
    pub use crate::health::{HealthCheck, HealthChecker, HealthReport, Severity, Verdict};
    pub use crate::version::{VersionTuple, latest_version, version_ge};
}

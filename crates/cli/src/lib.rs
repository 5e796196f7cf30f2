//! CLI utilities for droidci Android CI tools
//!
//! Provides shared CLI functionality:
//! - Global flags (config file, verbosity, color)
//! - Terminal output formatting for verdicts and summaries
//! - Progress spinners
//! - Diagnostic logging setup

#![warn(missing_docs)]

pub mod args;
pub mod logging;
pub mod output;
pub mod progress;

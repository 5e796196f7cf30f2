//! Progress indicators
//!
//! Spinners for the long waits of the emulator lifecycle. When stderr is not a
//! terminal (the usual CI case) indicatif hides them automatically.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.blue} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {}", message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Waiting for boot...");
        pb.set_message("still waiting");
        finish_success(&pb, "Booted");
        assert!(pb.is_finished());
    }

    #[test]
    fn test_finish_error() {
        let pb = spinner("Waiting for shutdown...");
        finish_error(&pb, "Timed out");
        assert!(pb.is_finished());
    }
}

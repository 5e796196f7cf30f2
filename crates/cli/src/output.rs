//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Every check or step prints
//! one line with a severity tag, and runs end with a summary block.

use droidci_core::health::{HealthReport, Severity, Verdict};
use owo_colors::{OwoColorize, Stream};

/// Status message helpers
///
/// Colors are dropped when the stream is not a terminal or `--no-color`
/// was given.
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        let counter = format!("[{}/{}]", step, total);
        println!("{} {}", counter.if_supports_color(Stream::Stdout, |t| t.dimmed()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Fixed-width severity tag, e.g. `[ OK ]`
pub fn severity_tag(severity: Severity) -> String {
    format!("[{:^4}]", severity.tag())
}

fn colored_tag(severity: Severity) -> String {
    let tag = severity_tag(severity);
    match severity {
        Severity::Ok => tag.if_supports_color(Stream::Stdout, |t| t.green()).to_string(),
        Severity::Warn => tag.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string(),
        Severity::Fail => tag
            .if_supports_color(Stream::Stdout, |t| t.red().bold().to_string())
            .to_string(),
    }
}

/// Plain-text rendering of one verdict line
pub fn format_verdict(verdict: &Verdict) -> String {
    format!("{} {}: {}", severity_tag(verdict.severity), verdict.check, verdict.message)
}

/// Print one verdict line to stdout
pub fn print_verdict(verdict: &Verdict) {
    println!(
        "{} {}: {}",
        colored_tag(verdict.severity),
        verdict.check.if_supports_color(Stream::Stdout, |t| t.bold()),
        verdict.message
    );
}

/// Print every verdict followed by the summary block
pub fn print_report(report: &HealthReport) {
    for verdict in &report.verdicts {
        print_verdict(verdict);
    }
    print_summary(report);
}

/// Print the summary block listing failures and warnings verbatim
pub fn print_summary(report: &HealthReport) {
    let failures: Vec<&Verdict> = report.failures().collect();
    let warnings: Vec<&Verdict> = report.warnings().collect();

    Status::header("Summary");

    if !failures.is_empty() {
        let count = format_count(failures.len(), "failure", "failures");
        println!("{}", count.if_supports_color(Stream::Stdout, |t| t.red().bold().to_string()));
        for verdict in &failures {
            println!("  - {}: {}", verdict.check, verdict.message);
        }
    }

    if !warnings.is_empty() {
        let count = format_count(warnings.len(), "warning", "warnings");
        println!("{}", count.if_supports_color(Stream::Stdout, |t| t.yellow()));
        for verdict in &warnings {
            println!("  - {}: {}", verdict.check, verdict.message);
        }
    }

    if failures.is_empty() {
        Status::success(&format!(
            "All required checks passed in {}",
            format_duration(std::time::Duration::from_millis(report.total_duration_ms))
        ));
    } else {
        Status::error("Environment is not ready for UI tests");
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

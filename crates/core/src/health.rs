//! Health check reporting
//!
//! Checks record [`Verdict`]s into a [`HealthReport`] that is threaded through
//! every check by `&mut`. The report keeps verdicts in the order they were
//! recorded and exposes the failures and warnings for the final summary.
//!
//! Only failures affect the exit code. Warnings are advisory.

use crate::error::exit_codes;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Severity of a single verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Requirement met, or informational
    Ok,
    /// Advisory problem that never fails the run
    Warn,
    /// Required check failed
    Fail,
}

impl Severity {
    /// Short tag used in text output
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
        }
    }
}

/// Overall status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Nothing but OK verdicts
    Healthy,
    /// Warnings but no failures
    Degraded,
    /// At least one failure
    Unhealthy,
}

/// One line of health check output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Severity of the verdict
    pub severity: Severity,
    /// Name of the check that produced it
    pub check: String,
    /// Human-readable message
    pub message: String,
}

impl Verdict {
    /// Create a verdict
    pub fn new(severity: Severity, check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            check: check.into(),
            message: message.into(),
        }
    }
}

/// How long a named check took
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckTiming {
    /// Name of the check
    pub check: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Accumulated verdicts from a health check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status, recomputed on every push
    pub status: HealthStatus,
    /// All verdicts in recording order
    pub verdicts: Vec<Verdict>,
    /// Per-check durations in execution order
    pub timings: Vec<CheckTiming>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
    /// Timestamp when the report was finished
    pub timestamp: String,
    /// Version of the tool
    pub version: String,
}

impl Default for HealthReport {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: HealthStatus::Healthy,
            verdicts: Vec::new(),
            timings: Vec::new(),
            total_duration_ms: 0,
            timestamp: String::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Record a verdict
    pub fn push(&mut self, verdict: Verdict) {
        tracing::debug!(
            check = %verdict.check,
            severity = verdict.severity.tag(),
            "{}",
            verdict.message
        );
        self.status = match (self.status, verdict.severity) {
            (_, Severity::Fail) | (HealthStatus::Unhealthy, _) => HealthStatus::Unhealthy,
            (_, Severity::Warn) | (HealthStatus::Degraded, _) => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        };
        self.verdicts.push(verdict);
    }

    /// Record an OK verdict
    pub fn ok(&mut self, check: &str, message: impl Into<String>) {
        self.push(Verdict::new(Severity::Ok, check, message));
    }

    /// Record a warning
    pub fn warn(&mut self, check: &str, message: impl Into<String>) {
        self.push(Verdict::new(Severity::Warn, check, message));
    }

    /// Record a failure
    pub fn fail(&mut self, check: &str, message: impl Into<String>) {
        self.push(Verdict::new(Severity::Fail, check, message));
    }

    /// Record how long a check took
    pub fn record_timing(&mut self, check: &str, duration: Duration) {
        self.timings.push(CheckTiming {
            check: check.to_string(),
            duration_ms: duration.as_millis() as u64,
        });
    }

    /// Stamp the total duration and completion time
    pub fn finish(&mut self, duration: Duration) {
        self.total_duration_ms = duration.as_millis() as u64;
        self.timestamp = chrono::Utc::now().to_rfc3339();
    }

    /// Warnings in recording order
    pub fn warnings(&self) -> impl Iterator<Item = &Verdict> {
        self.with_severity(Severity::Warn)
    }

    /// Failures in recording order
    pub fn failures(&self) -> impl Iterator<Item = &Verdict> {
        self.with_severity(Severity::Fail)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(move |v| v.severity == severity)
    }

    /// Returns true if any failure was recorded
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Process exit code for this report: 1 on any failure, else 0
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            exit_codes::FAILURE
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Trait for implementing health checks.
///
/// `C` is shared state that earlier checks may fill in for later ones
/// (for example a resolved SDK root).
pub trait HealthCheck<C> {
    /// Short name used to tag verdicts
    fn name(&self) -> &'static str;

    /// Perform the check, recording zero or more verdicts
    fn run(&self, ctx: &mut C, report: &mut HealthReport);
}

/// Runs an ordered list of checks without short-circuiting
pub struct HealthChecker<C> {
    checks: Vec<Box<dyn HealthCheck<C>>>,
}

impl<C> Default for HealthChecker<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> HealthChecker<C> {
    /// Create a new health checker with no checks
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a health check
    #[must_use]
    pub fn add_check(mut self, check: impl HealthCheck<C> + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names of the registered checks in execution order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check in order
    pub fn run(&self, ctx: &mut C) -> HealthReport {
        let start = Instant::now();
        let mut report = HealthReport::new();

        for check in &self.checks {
            let check_start = Instant::now();
            tracing::debug!(check = check.name(), "running check");
            check.run(ctx, &mut report);
            report.record_timing(check.name(), check_start.elapsed());
        }

        report.finish(start.elapsed());
        report
    }
}

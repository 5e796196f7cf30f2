//! Configuration schema definitions
//!
//! Every field has a default, so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[health]` table
    #[serde(default)]
    pub health: HealthConfig,

    /// `[runner]` table
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Defaults for `android-health-check`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthConfig {
    /// Explicit SDK root, takes precedence over environment variables
    #[serde(default)]
    pub sdk_root: Option<String>,

    /// Case-insensitive regex the Java vendor must match
    #[serde(default)]
    pub java_vendor: Option<String>,

    /// Exact Java runtime version
    #[serde(default)]
    pub java_version: Option<String>,

    /// Minimum build-tools version
    #[serde(default)]
    pub min_build_tools: Option<String>,

    /// Platform API levels that must be installed
    #[serde(default)]
    pub platform_apis: Vec<String>,

    /// Directory holding the Gradle wrapper
    #[serde(default)]
    pub project_dir: Option<String>,
}

/// Defaults for `android-ui-test`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// AVD to boot
    #[serde(default)]
    pub avd: Option<String>,

    /// Directory for emulator logs
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Seconds to wait for `sys.boot_completed`
    #[serde(default = "default_boot_timeout")]
    pub boot_timeout_secs: u64,

    /// Seconds between boot polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Seconds to wait for the emulator to disappear on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Gradle task that runs the connected tests
    #[serde(default = "default_task")]
    pub task: String,

    /// Directory holding the Gradle wrapper
    #[serde(default)]
    pub project_dir: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            avd: None,
            log_dir: default_log_dir(),
            boot_timeout_secs: default_boot_timeout(),
            poll_interval_secs: default_poll_interval(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            task: default_task(),
            project_dir: None,
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_boot_timeout() -> u64 {
    60
}

fn default_poll_interval() -> u64 {
    1
}

fn default_shutdown_timeout() -> u64 {
    60
}

fn default_task() -> String {
    "connectedAndroidTest".to_string()
}

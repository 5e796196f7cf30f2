//! Android CI health check
//!
//! Validates Java, Gradle, the Android SDK layout, build-tools, platforms and
//! licenses, printing one line per finding and a summary. Exits 1 if any
//! required check failed, 2 on a bad argument or config file.

use anyhow::{Context, Result};
use clap::Parser;
use droidci_android::doctor::{self, HealthCheckOptions};
use droidci_android::env::HostEnv;
use droidci_cli::args::CommonArgs;
use droidci_cli::output::{self, Status};
use droidci_core::config::{Config, HealthConfig, expand_path};
use droidci_core::error::exit_codes;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "android-health-check")]
#[command(about = "Validate the Android CI toolchain before UI tests run")]
#[command(version)]
struct Cli {
    /// Android SDK root (overrides ANDROID_SDK_ROOT and ANDROID_HOME)
    #[arg(long, env = "DROIDCI_SDK_ROOT", value_name = "PATH")]
    sdk_root: Option<PathBuf>,

    /// Case-insensitive regex the Java vendor must match
    #[arg(long, env = "DROIDCI_JAVA_VENDOR", value_name = "REGEX")]
    java_vendor: Option<String>,

    /// Exact Java runtime version required
    #[arg(long, env = "DROIDCI_JAVA_VERSION", value_name = "VERSION")]
    java_version: Option<String>,

    /// Minimum build-tools version
    #[arg(long, env = "DROIDCI_MIN_BUILD_TOOLS", value_name = "VERSION")]
    min_build_tools: Option<String>,

    /// Platform API level that must be installed (repeatable, comma-separated)
    #[arg(
        long = "platform-api",
        env = "DROIDCI_PLATFORM_API",
        value_name = "API",
        value_delimiter = ',',
        action = clap::ArgAction::Append
    )]
    platform_apis: Vec<String>,

    /// Directory containing the Gradle wrapper
    #[arg(long, env = "DROIDCI_PROJECT_DIR", value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    common: CommonArgs,
}

impl Cli {
    /// Merge flags over the config file. Flags (and their environment
    /// variables) win; the config fills whatever is unset.
    fn health_options(&self, config: &HealthConfig) -> Result<HealthCheckOptions> {
        let java_vendor = match self.java_vendor.as_deref().or(config.java_vendor.as_deref()) {
            Some(pattern) => Some(
                doctor::vendor_pattern(pattern)
                    .with_context(|| format!("invalid --java-vendor pattern '{}'", pattern))?,
            ),
            None => None,
        };

        let platform_apis = if self.platform_apis.is_empty() {
            config.platform_apis.clone()
        } else {
            self.platform_apis.clone()
        };

        Ok(HealthCheckOptions {
            sdk_root: self
                .sdk_root
                .clone()
                .or_else(|| config.sdk_root.as_deref().map(expand_path)),
            java_vendor,
            java_version: self.java_version.clone().or_else(|| config.java_version.clone()),
            min_build_tools: self
                .min_build_tools
                .clone()
                .or_else(|| config.min_build_tools.clone()),
            platform_apis: platform_apis
                .into_iter()
                .map(|api| api.trim().to_string())
                .filter(|api| !api.is_empty())
                .collect(),
            project_dir: self
                .project_dir
                .clone()
                .or_else(|| config.project_dir.as_deref().map(expand_path))
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

fn main() {
    let cli = Cli::parse();
    cli.common.init_output();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "configuration error");
            Status::error(&format!("{:#}", e));
            exit_codes::USAGE
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.common.config.as_deref()).context("loading configuration")?;
    let options = cli.health_options(&config.schema.health)?;
    tracing::debug!(?options, "health check options");

    if !cli.json {
        Status::header("Android CI environment health check");
    }

    let report = doctor::run_health_check(options, HostEnv::from_process());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }

    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("android-health-check").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_platform_api_repeat_and_comma() {
        let cli = parse(&["--platform-api", "33,34", "--platform-api", "35"]);
        assert_eq!(cli.platform_apis, ["33", "34", "35"]);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Cli::try_parse_from(["android-health-check", "--frobnicate"]).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USAGE);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&["--min-build-tools", "35.0.0", "--sdk-root", "/flag/sdk"]);
        let config = HealthConfig {
            sdk_root: Some("/config/sdk".into()),
            min_build_tools: Some("34.0.0".into()),
            java_version: Some("17.0.9".into()),
            platform_apis: vec!["34".into()],
            ..Default::default()
        };

        let options = cli.health_options(&config).unwrap();
        assert_eq!(options.sdk_root, Some(PathBuf::from("/flag/sdk")));
        assert_eq!(options.min_build_tools.as_deref(), Some("35.0.0"));
        assert_eq!(options.java_version.as_deref(), Some("17.0.9"));
        assert_eq!(options.platform_apis, ["34"]);
        assert_eq!(options.project_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_vendor_regex_is_error() {
        let cli = parse(&["--java-vendor", "(temurin"]);
        let err = cli.health_options(&HealthConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("--java-vendor"));
    }
}

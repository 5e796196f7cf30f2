//! Android CI environment health check
//!
//! Runs a fixed, ordered list of checks against the host. Every check runs
//! even when earlier ones fail, so one run shows every problem. Checks that
//! need the SDK root are skipped silently when it could not be resolved; the
//! SDK root check has already recorded that failure.

use crate::env::HostEnv;
use crate::gradle::{self, GradleInvocation};
use crate::java;
use crate::sdk::{self, SdkLayout};
use droidci_core::health::{HealthCheck, HealthChecker, HealthReport};
use droidci_core::version::{VersionTuple, version_ge};
use regex::Regex;
use std::path::PathBuf;

/// Requirements for a health check run
#[derive(Debug, Clone, Default)]
pub struct HealthCheckOptions {
    /// Explicit SDK root
    pub sdk_root: Option<PathBuf>,
    /// Case-insensitive vendor pattern
    pub java_vendor: Option<Regex>,
    /// Exact runtime version
    pub java_version: Option<String>,
    /// Minimum build-tools version
    pub min_build_tools: Option<String>,
    /// API levels that must be installed, matched independently
    pub platform_apis: Vec<String>,
    /// Directory holding the Gradle wrapper
    pub project_dir: PathBuf,
}

/// State shared between checks
#[derive(Debug)]
pub struct ProbeContext {
    pub options: HealthCheckOptions,
    pub env: HostEnv,
    /// Filled in by the SDK root check
    pub sdk: Option<SdkLayout>,
}

impl ProbeContext {
    pub fn new(options: HealthCheckOptions, env: HostEnv) -> Self {
        Self {
            options,
            env,
            sdk: None,
        }
    }
}

/// Build a case-insensitive vendor pattern
pub fn vendor_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    regex::RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// The checks in the order they run
pub fn health_checker() -> HealthChecker<ProbeContext> {
    HealthChecker::new()
        .add_check(JavaCheck)
        .add_check(GradleWrapperCheck)
        .add_check(SdkRootCheck)
        .add_check(SdkToolsCheck)
        .add_check(PlatformToolsCheck)
        .add_check(BuildToolsCheck)
        .add_check(PlatformsCheck)
        .add_check(LicensesCheck)
}

/// Run every check and return the accumulated report
pub fn run_health_check(options: HealthCheckOptions, env: HostEnv) -> HealthReport {
    let mut ctx = ProbeContext::new(options, env);
    health_checker().run(&mut ctx)
}

/// Java must be callable; optional vendor pattern and exact version
pub struct JavaCheck;

impl HealthCheck<ProbeContext> for JavaCheck {
    fn name(&self) -> &'static str {
        "java"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let name = self.name();
        let Some(runtime) = java::detect_java(&ctx.env) else {
            report.fail(name, "java not found (set JAVA_HOME or add java to PATH)");
            return;
        };
        report.ok(name, format!("java at {}", runtime.path.display()));

        let details = &runtime.details;
        match (&ctx.options.java_vendor, &details.vendor) {
            (Some(pattern), Some(vendor)) if pattern.is_match(vendor) => {
                report.ok(name, format!("vendor '{}' matches /{}/", vendor, pattern.as_str()));
            }
            (Some(pattern), Some(vendor)) => {
                report.fail(
                    name,
                    format!("vendor '{}' does not match /{}/", vendor, pattern.as_str()),
                );
            }
            (Some(pattern), None) => {
                report.fail(
                    name,
                    format!("vendor unknown, required to match /{}/", pattern.as_str()),
                );
            }
            (None, _) => report.ok(name, format!("vendor: {}", details.vendor_display())),
        }

        match (&ctx.options.java_version, &details.version) {
            (Some(required), Some(version)) if required == version => {
                report.ok(name, format!("version {} matches required version", version));
            }
            (Some(required), _) => {
                report.fail(
                    name,
                    format!(
                        "version {} does not equal required {}",
                        details.version_display(),
                        required
                    ),
                );
            }
            (None, _) => report.ok(name, format!("version: {}", details.version_display())),
        }
    }
}

/// Project wrapper preferred; system Gradle is a warning
pub struct GradleWrapperCheck;

impl HealthCheck<ProbeContext> for GradleWrapperCheck {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let project_dir = &ctx.options.project_dir;
        match gradle::locate_gradle(project_dir, &ctx.env) {
            GradleInvocation::Wrapper(path) => {
                report.ok(self.name(), format!("wrapper at {}", path.display()));
            }
            GradleInvocation::System(path) => report.warn(
                self.name(),
                format!(
                    "no executable {} in {}; falling back to system gradle at {}",
                    gradle::wrapper_name(),
                    project_dir.display(),
                    path.display()
                ),
            ),
            GradleInvocation::Missing => report.fail(
                self.name(),
                format!(
                    "no executable {} in {} and no gradle on PATH",
                    gradle::wrapper_name(),
                    project_dir.display()
                ),
            ),
        }
    }
}

/// Resolve the SDK root for the checks that follow
pub struct SdkRootCheck;

impl HealthCheck<ProbeContext> for SdkRootCheck {
    fn name(&self) -> &'static str {
        "sdk-root"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        match sdk::resolve_sdk_root(ctx.options.sdk_root.as_deref(), &ctx.env) {
            Ok(layout) => {
                report.ok(
                    self.name(),
                    format!("{} (from {})", layout.root.display(), layout.source),
                );
                ctx.sdk = Some(layout);
            }
            Err(e) => {
                let mut message = e.message.clone();
                if let Some(suggestion) = &e.suggestion {
                    message.push_str(&format!(" ({})", suggestion));
                }
                report.fail(self.name(), message);
            }
        }
    }
}

/// `adb` and `emulator` in the SDK; `sdkmanager`/`avdmanager` on PATH or cmdline-tools
pub struct SdkToolsCheck;

impl HealthCheck<ProbeContext> for SdkToolsCheck {
    fn name(&self) -> &'static str {
        "sdk-tools"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let Some(sdk) = &ctx.sdk else { return };

        for (tool, path) in [("adb", sdk.adb()), ("emulator", sdk.emulator())] {
            if path.is_file() {
                report.ok(self.name(), format!("{}: {}", tool, path.display()));
            } else {
                report.fail(self.name(), format!("{} missing at {}", tool, path.display()));
            }
        }

        for tool in ["sdkmanager", "avdmanager"] {
            match sdk.find_manager_tool(&ctx.env, tool) {
                Some(path) => report.ok(self.name(), format!("{}: {}", tool, path.display())),
                None => report.fail(
                    self.name(),
                    format!(
                        "{} not found on PATH or under {}/*/bin",
                        tool,
                        sdk.cmdline_tools_dir().display()
                    ),
                ),
            }
        }
    }
}

/// Platform-tools revision; unknown is only a warning
pub struct PlatformToolsCheck;

impl HealthCheck<ProbeContext> for PlatformToolsCheck {
    fn name(&self) -> &'static str {
        "platform-tools"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let Some(sdk) = &ctx.sdk else { return };

        match sdk.platform_tools_version() {
            Some(version) => report.ok(self.name(), format!("platform-tools {}", version)),
            None => report.warn(
                self.name(),
                format!(
                    "platform-tools version unknown (no Pkg.Revision in {})",
                    sdk.platform_tools_properties().display()
                ),
            ),
        }
    }
}

/// Latest build-tools and optional minimum
pub struct BuildToolsCheck;

impl HealthCheck<ProbeContext> for BuildToolsCheck {
    fn name(&self) -> &'static str {
        "build-tools"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let Some(sdk) = &ctx.sdk else { return };
        let dir = sdk.build_tools_dir();

        let versions = match sdk.build_tools_versions() {
            Ok(versions) => versions,
            Err(_) => {
                report.fail(self.name(), format!("no build-tools directory at {}", dir.display()));
                return;
            }
        };
        let Some(latest) = droidci_core::version::latest_version(&versions) else {
            report.fail(
                self.name(),
                format!("no build-tools versions installed in {}", dir.display()),
            );
            return;
        };

        report.ok(
            self.name(),
            format!("latest build-tools {} (installed: {})", latest, versions.join(", ")),
        );

        if let Some(minimum) = &ctx.options.min_build_tools {
            if version_ge(latest, minimum) {
                report.ok(
                    self.name(),
                    format!("build-tools {} satisfies minimum {}", latest, minimum),
                );
            } else {
                report.fail(
                    self.name(),
                    format!(
                        "build-tools {} is older than required {} (compared as {} < {})",
                        latest,
                        minimum,
                        VersionTuple::parse(latest),
                        VersionTuple::parse(minimum)
                    ),
                );
            }
        }
    }
}

/// Installed API levels and required ones
pub struct PlatformsCheck;

impl HealthCheck<ProbeContext> for PlatformsCheck {
    fn name(&self) -> &'static str {
        "platforms"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let Some(sdk) = &ctx.sdk else { return };
        let dir = sdk.platforms_dir();

        let installed = match sdk.platform_apis() {
            Ok(apis) if !apis.is_empty() => apis,
            Ok(_) => {
                report.fail(
                    self.name(),
                    format!("no android-<api> platforms installed in {}", dir.display()),
                );
                return;
            }
            Err(_) => {
                report.fail(self.name(), format!("no platforms directory at {}", dir.display()));
                return;
            }
        };

        report.ok(
            self.name(),
            format!("installed API levels: {}", installed.join(", ")),
        );

        for required in &ctx.options.platform_apis {
            let api = required.trim();
            let api = api.strip_prefix("android-").unwrap_or(api);
            if installed.iter().any(|a| a == api) {
                report.ok(self.name(), format!("API {} installed", api));
            } else {
                report.fail(self.name(), format!("API {} not installed", api));
            }
        }
    }
}

/// SDK license required; preview license optional
pub struct LicensesCheck;

impl LicensesCheck {
    const SDK_LICENSE: &'static str = "android-sdk-license";
    const PREVIEW_LICENSE: &'static str = "android-sdk-preview-license";
}

impl HealthCheck<ProbeContext> for LicensesCheck {
    fn name(&self) -> &'static str {
        "licenses"
    }

    fn run(&self, ctx: &mut ProbeContext, report: &mut HealthReport) {
        let Some(sdk) = &ctx.sdk else { return };
        let dir = sdk.licenses_dir();

        if sdk::is_non_empty_file(&dir.join(Self::SDK_LICENSE)) {
            report.ok(self.name(), format!("{} accepted", Self::SDK_LICENSE));
        } else {
            report.fail(
                self.name(),
                format!(
                    "{} missing or empty in {} (run: sdkmanager --licenses)",
                    Self::SDK_LICENSE,
                    dir.display()
                ),
            );
        }

        if sdk::is_non_empty_file(&dir.join(Self::PREVIEW_LICENSE)) {
            report.ok(self.name(), format!("{} accepted", Self::PREVIEW_LICENSE));
        } else {
            report.warn(
                self.name(),
                format!("{} missing or empty (optional)", Self::PREVIEW_LICENSE),
            );
        }
    }
}

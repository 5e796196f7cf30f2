//! Java runtime detection
//!
//! Version and vendor are read from `java -XshowSettings:properties -version`
//! first. When that output lacks either value the human-readable
//! `java -version` banner fills the gaps. A value neither source yields stays
//! `None` and is shown as "unknown".

use crate::env::{HostEnv, exe_name};
use droidci_core::process::run_command;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

static BANNER_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"version\s+"([^"]+)""#).expect("valid regex"));

static RUNTIME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>.*?)\s*Runtime Environment\s*(?P<rest>.*)$").expect("valid regex")
});

/// Runtime version and vendor as far as they could be determined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JavaDetails {
    pub version: Option<String>,
    pub vendor: Option<String>,
}

impl JavaDetails {
    /// Fill missing fields from a lower-priority source
    #[must_use]
    pub fn or(self, fallback: JavaDetails) -> JavaDetails {
        JavaDetails {
            version: self.version.or(fallback.version),
            vendor: self.vendor.or(fallback.vendor),
        }
    }

    fn is_complete(&self) -> bool {
        self.version.is_some() && self.vendor.is_some()
    }

    /// Version for display
    pub fn version_display(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }

    /// Vendor for display
    pub fn vendor_display(&self) -> &str {
        self.vendor.as_deref().unwrap_or("unknown")
    }
}

/// A located Java runtime
#[derive(Debug, Clone, Serialize)]
pub struct JavaRuntime {
    pub path: PathBuf,
    pub details: JavaDetails,
}

/// Find the `java` binary: `$JAVA_HOME/bin/java` if present, else `PATH`
pub fn locate_java(env: &HostEnv) -> Option<PathBuf> {
    if let Some(home) = env.var_path("JAVA_HOME") {
        let candidate = home.join("bin").join(exe_name("java"));
        if candidate.is_file() {
            return Some(candidate);
        }
        tracing::debug!(path = %candidate.display(), "JAVA_HOME does not contain bin/java");
    }
    env.find_in_path("java")
}

/// Locate Java and query its version and vendor
pub fn detect_java(env: &HostEnv) -> Option<JavaRuntime> {
    let path = locate_java(env)?;

    let from_properties = run_command(&path, &["-XshowSettings:properties", "-version"])
        .map(|out| parse_settings_properties(&out.combined_output()))
        .unwrap_or_default();

    let details = if from_properties.is_complete() {
        from_properties
    } else {
        let from_banner = run_command(&path, &["-version"])
            .map(|out| parse_version_banner(&out.combined_output()))
            .unwrap_or_default();
        from_properties.or(from_banner)
    };

    tracing::debug!(
        path = %path.display(),
        version = details.version_display(),
        vendor = details.vendor_display(),
        "detected java"
    );
    Some(JavaRuntime { path, details })
}

/// Parse the `Property settings:` dump printed by `-XshowSettings:properties`
pub fn parse_settings_properties(text: &str) -> JavaDetails {
    let mut details = JavaDetails::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "java.version" => details.version = Some(value.to_string()),
            "java.vendor" => details.vendor = Some(value.to_string()),
            _ => {}
        }
    }
    details
}

/// Parse the `java -version` banner.
///
/// ```text
/// openjdk version "17.0.9" 2023-10-17
/// OpenJDK Runtime Environment Temurin-17.0.9+9 (build 17.0.9+9)
/// ```
///
/// The vendor is the distribution name after `Runtime Environment` with its
/// version suffix removed, or the text before it when nothing follows.
pub fn parse_version_banner(text: &str) -> JavaDetails {
    let version = BANNER_VERSION
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let vendor = text
        .lines()
        .find_map(|line| RUNTIME_LINE.captures(line.trim()))
        .and_then(|caps| {
            let rest = caps.name("rest").map_or("", |m| m.as_str());
            let rest = rest.split("(build").next().unwrap_or("").trim();
            let distribution = rest.split('-').next().unwrap_or("").trim();
            if !distribution.is_empty() {
                return Some(distribution.to_string());
            }
            let prefix = caps.name("prefix").map_or("", |m| m.as_str()).trim();
            (!prefix.is_empty()).then(|| prefix.to_string())
        });

    JavaDetails { version, vendor }
}

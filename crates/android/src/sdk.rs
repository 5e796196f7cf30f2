//! Android SDK root resolution and layout
//!
//! The SDK root is taken from, in order:
//! 1. An explicit override (authoritative, never falls through)
//! 2. `ANDROID_SDK_ROOT`
//! 3. `ANDROID_HOME`
//! 4. Conventional install locations
//!
//! The first candidate that is an existing directory wins.

use crate::env::{HostEnv, exe_name};
use droidci_core::error::{Error, ErrorCode, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that may point at the SDK, in precedence order
pub const SDK_ROOT_VARS: [&str; 2] = ["ANDROID_SDK_ROOT", "ANDROID_HOME"];

/// Where the SDK root came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SdkRootSource {
    /// `--sdk-root` or the config file
    Override,
    /// One of [`SDK_ROOT_VARS`]
    EnvVar(&'static str),
    /// A conventional install path
    Conventional,
}

impl fmt::Display for SdkRootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkRootSource::Override => write!(f, "override"),
            SdkRootSource::EnvVar(var) => write!(f, "{}", var),
            SdkRootSource::Conventional => write!(f, "conventional location"),
        }
    }
}

/// Conventional SDK install paths for this host
pub fn conventional_sdk_paths(env: &HostEnv) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = env.home() {
        paths.push(home.join("Android/Sdk"));
        paths.push(home.join("Library/Android/sdk"));
    }
    if let Some(local) = env.var_path("LOCALAPPDATA") {
        paths.push(local.join("Android/Sdk"));
    }
    paths.extend(
        ["/opt/android-sdk", "/usr/local/android-sdk", "/usr/lib/android-sdk"]
            .into_iter()
            .map(PathBuf::from),
    );
    paths
}

/// Resolve the SDK root
pub fn resolve_sdk_root(override_root: Option<&Path>, env: &HostEnv) -> Result<SdkLayout> {
    if let Some(root) = override_root {
        return if root.is_dir() {
            Ok(SdkLayout::new(root, SdkRootSource::Override))
        } else {
            Err(Error::new(
                ErrorCode::DirectoryNotFound,
                format!("SDK root override {} does not exist", root.display()),
            ))
        };
    }

    for var in SDK_ROOT_VARS {
        match env.var_path(var) {
            Some(root) if root.is_dir() => return Ok(SdkLayout::new(root, SdkRootSource::EnvVar(var))),
            Some(root) => {
                tracing::debug!(var, path = %root.display(), "SDK root variable points at a missing directory");
            }
            None => {}
        }
    }

    conventional_sdk_paths(env)
        .into_iter()
        .find(|p| p.is_dir())
        .map(|root| SdkLayout::new(root, SdkRootSource::Conventional))
        .ok_or_else(|| {
            Error::new(ErrorCode::SdkError, "Android SDK root not found")
                .with_suggestion("Set ANDROID_SDK_ROOT or pass --sdk-root")
        })
}

/// Paths inside a resolved SDK root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkLayout {
    pub root: PathBuf,
    pub source: SdkRootSource,
}

impl SdkLayout {
    /// Wrap an SDK root directory
    pub fn new(root: impl Into<PathBuf>, source: SdkRootSource) -> Self {
        Self {
            root: root.into(),
            source,
        }
    }

    pub fn platform_tools_dir(&self) -> PathBuf {
        self.root.join("platform-tools")
    }

    pub fn adb(&self) -> PathBuf {
        self.platform_tools_dir().join(exe_name("adb"))
    }

    pub fn emulator(&self) -> PathBuf {
        self.root.join("emulator").join(exe_name("emulator"))
    }

    pub fn platform_tools_properties(&self) -> PathBuf {
        self.platform_tools_dir().join("source.properties")
    }

    pub fn build_tools_dir(&self) -> PathBuf {
        self.root.join("build-tools")
    }

    pub fn platforms_dir(&self) -> PathBuf {
        self.root.join("platforms")
    }

    pub fn licenses_dir(&self) -> PathBuf {
        self.root.join("licenses")
    }

    pub fn cmdline_tools_dir(&self) -> PathBuf {
        self.root.join("cmdline-tools")
    }

    /// `cmdline-tools/<ver>/bin` for the lexicographically-last version
    /// directory, ignoring a directory named `bin`
    pub fn cmdline_tools_bin(&self) -> Option<PathBuf> {
        let version = subdirectories(&self.cmdline_tools_dir())
            .ok()?
            .into_iter()
            .filter(|name| name != "bin")
            .max()?;
        Some(self.cmdline_tools_dir().join(version).join("bin"))
    }

    /// Find an SDK manager tool on `PATH`, then under `cmdline-tools`
    pub fn find_manager_tool(&self, env: &HostEnv, name: &str) -> Option<PathBuf> {
        if let Some(path) = env.find_in_path(name) {
            return Some(path);
        }
        let file = if cfg!(windows) {
            format!("{}.bat", name)
        } else {
            name.to_string()
        };
        self.cmdline_tools_bin()
            .map(|bin| bin.join(file))
            .filter(|p| p.is_file())
    }

    /// `Pkg.Revision` from `platform-tools/source.properties`
    pub fn platform_tools_version(&self) -> Option<String> {
        let text = fs::read_to_string(self.platform_tools_properties()).ok()?;
        parse_properties(&text)
            .remove("Pkg.Revision")
            .filter(|v| !v.is_empty())
    }

    /// Installed build-tools version directories, sorted by name
    pub fn build_tools_versions(&self) -> std::io::Result<Vec<String>> {
        subdirectories(&self.build_tools_dir())
    }

    /// Installed platform API levels (`platforms/android-<api>`), sorted
    pub fn platform_apis(&self) -> std::io::Result<Vec<String>> {
        let mut apis: Vec<String> = subdirectories(&self.platforms_dir())?
            .into_iter()
            .filter_map(|name| name.strip_prefix("android-").map(String::from))
            .filter(|api| !api.is_empty())
            .collect();
        apis.sort_by(|a, b| api_sort_key(a).cmp(&api_sort_key(b)));
        Ok(apis)
    }
}

/// Numeric API levels first in ascending order, then codenames by name
fn api_sort_key(api: &str) -> (u8, u64, &str) {
    match api.parse::<u64>() {
        Ok(level) => (0, level, ""),
        Err(_) => (1, 0, api),
    }
}

/// Names of the direct subdirectories of `dir`, sorted
pub fn subdirectories(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    Ok(names)
}

/// Whether `path` is a regular file with at least one byte
pub fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// Parse a Java-style `key=value` properties file.
///
/// Blank lines and `#`/`!` comments are skipped. The first `=` or `:` splits
/// key from value; both sides are trimmed. Later keys overwrite earlier ones.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let split = line.find(['=', ':'])?;
            let key = line[..split].trim();
            let value = line[split + 1..].trim();
            (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::testing::touch;
    use tempfile::TempDir;

    fn layout(dir: &TempDir) -> SdkLayout {
        SdkLayout::new(dir.path(), SdkRootSource::Override)
    }

    #[test]
    fn test_override_wins_over_env() {
        let sdk = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let env = HostEnv::empty("/").with_var("ANDROID_SDK_ROOT", other.path());

        let resolved = resolve_sdk_root(Some(sdk.path()), &env).unwrap();
        assert_eq!(resolved.root, sdk.path());
        assert_eq!(resolved.source, SdkRootSource::Override);
    }

    #[test]
    fn test_missing_override_does_not_fall_through() {
        let other = TempDir::new().unwrap();
        let env = HostEnv::empty("/").with_var("ANDROID_SDK_ROOT", other.path());

        let err = resolve_sdk_root(Some(Path::new("/nonexistent/sdk-12345")), &env).unwrap_err();
        assert_eq!(err.code, ErrorCode::DirectoryNotFound);
    }

    #[test]
    fn test_env_var_precedence() {
        let sdk_root = TempDir::new().unwrap();
        let android_home = TempDir::new().unwrap();
        let env = HostEnv::empty("/")
            .with_var("ANDROID_SDK_ROOT", sdk_root.path())
            .with_var("ANDROID_HOME", android_home.path());

        let resolved = resolve_sdk_root(None, &env).unwrap();
        assert_eq!(resolved.root, sdk_root.path());
        assert_eq!(resolved.source, SdkRootSource::EnvVar("ANDROID_SDK_ROOT"));
    }

    #[test]
    fn test_nonexistent_env_var_falls_through() {
        let android_home = TempDir::new().unwrap();
        let env = HostEnv::empty("/")
            .with_var("ANDROID_SDK_ROOT", "/nonexistent/sdk-12345")
            .with_var("ANDROID_HOME", android_home.path());

        let resolved = resolve_sdk_root(None, &env).unwrap();
        assert_eq!(resolved.source, SdkRootSource::EnvVar("ANDROID_HOME"));
    }

    #[test]
    fn test_conventional_path_under_home() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join("Android/Sdk")).unwrap();
        let env = HostEnv::empty("/").with_home(home.path());

        let resolved = resolve_sdk_root(None, &env).unwrap();
        assert_eq!(resolved.root, home.path().join("Android/Sdk"));
        assert_eq!(resolved.source, SdkRootSource::Conventional);
    }

    #[test]
    fn test_conventional_paths_include_system_locations() {
        let paths = conventional_sdk_paths(&HostEnv::empty("/"));
        assert!(paths.contains(&PathBuf::from("/opt/android-sdk")));
    }

    #[test]
    fn test_binaries_paths() {
        let sdk = SdkLayout::new("/sdk", SdkRootSource::Override);
        assert_eq!(sdk.adb(), Path::new("/sdk/platform-tools").join(exe_name("adb")));
        assert_eq!(sdk.emulator(), Path::new("/sdk/emulator").join(exe_name("emulator")));
    }

    #[test]
    fn test_cmdline_tools_bin_picks_last_version_ignoring_bin() {
        let dir = TempDir::new().unwrap();
        for name in ["9.0", "12.0", "bin"] {
            fs::create_dir_all(dir.path().join("cmdline-tools").join(name)).unwrap();
        }
        // "9.0" sorts after "12.0" as a string
        assert_eq!(
            layout(&dir).cmdline_tools_bin(),
            Some(dir.path().join("cmdline-tools/9.0/bin"))
        );
    }

    #[test]
    fn test_cmdline_tools_bin_prefers_latest_dir() {
        let dir = TempDir::new().unwrap();
        for name in ["11.0", "latest"] {
            fs::create_dir_all(dir.path().join("cmdline-tools").join(name)).unwrap();
        }
        assert_eq!(
            layout(&dir).cmdline_tools_bin(),
            Some(dir.path().join("cmdline-tools/latest/bin"))
        );
    }

    #[test]
    fn test_find_manager_tool_under_cmdline_tools() {
        let dir = TempDir::new().unwrap();
        let name = if cfg!(windows) { "sdkmanager.bat" } else { "sdkmanager" };
        let tool = dir.path().join("cmdline-tools/latest/bin").join(name);
        touch(&tool);

        let env = HostEnv::empty(dir.path());
        assert_eq!(layout(&dir).find_manager_tool(&env, "sdkmanager"), Some(tool));
        assert!(layout(&dir).find_manager_tool(&env, "avdmanager").is_none());
    }

    #[test]
    fn test_parse_properties() {
        let props = parse_properties(
            "### Comment\nPkg.UserSrc=false\nPkg.Revision = 35.0.1\n! other\n\nPkg.Desc: Android SDK Platform-Tools\nnovalue\n",
        );
        assert_eq!(props.get("Pkg.Revision").map(String::as_str), Some("35.0.1"));
        assert_eq!(props.get("Pkg.UserSrc").map(String::as_str), Some("false"));
        assert_eq!(
            props.get("Pkg.Desc").map(String::as_str),
            Some("Android SDK Platform-Tools")
        );
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn test_platform_tools_version() {
        let dir = TempDir::new().unwrap();
        let sdk = layout(&dir);
        assert!(sdk.platform_tools_version().is_none());

        fs::create_dir_all(sdk.platform_tools_dir()).unwrap();
        fs::write(sdk.platform_tools_properties(), "Pkg.Desc=Platform tools\n").unwrap();
        assert!(sdk.platform_tools_version().is_none());

        fs::write(sdk.platform_tools_properties(), "Pkg.Revision=34.0.5\n").unwrap();
        assert_eq!(sdk.platform_tools_version().as_deref(), Some("34.0.5"));
    }

    #[test]
    fn test_build_tools_versions_skip_files() {
        let dir = TempDir::new().unwrap();
        for v in ["30.0.0", "34.0.0", "29.9.2"] {
            fs::create_dir_all(dir.path().join("build-tools").join(v)).unwrap();
        }
        touch(&dir.path().join("build-tools/99.0.0.txt"));

        let sdk = layout(&dir);
        assert_eq!(sdk.build_tools_versions().unwrap(), ["29.9.2", "30.0.0", "34.0.0"]);
    }

    #[test]
    fn test_platform_apis_sorted_numerically() {
        let dir = TempDir::new().unwrap();
        for name in ["android-34", "android-9", "android-TiramisuPrivacySandbox", "android-33", "sources"] {
            fs::create_dir_all(dir.path().join("platforms").join(name)).unwrap();
        }

        let apis = layout(&dir).platform_apis().unwrap();
        assert_eq!(apis, ["9", "33", "34", "TiramisuPrivacySandbox"]);
    }

    #[test]
    fn test_missing_directories_are_errors() {
        let dir = TempDir::new().unwrap();
        let sdk = layout(&dir);
        assert!(sdk.build_tools_versions().is_err());
        assert!(sdk.platform_apis().is_err());
    }

    #[test]
    fn test_is_non_empty_file() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("android-sdk-license");
        let full = dir.path().join("android-sdk-preview-license");
        touch(&empty);
        fs::write(&full, "\n84831b9409646a918e30573bab4c9c91346d8abd").unwrap();

        assert!(!is_non_empty_file(&empty));
        assert!(is_non_empty_file(&full));
        assert!(!is_non_empty_file(dir.path()));
        assert!(!is_non_empty_file(&dir.path().join("missing")));
    }
}

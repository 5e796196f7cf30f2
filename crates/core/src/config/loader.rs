//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings, all defaults when no file was found
    pub schema: ConfigSchema,
    /// File the settings came from
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a discovered file, or defaults.
    ///
    /// An explicit path that does not exist is an error. A missing
    /// discovered file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        if let Some(p) = &config_path {
            tracing::debug!(path = %p.display(), "loaded configuration");
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations under `base`
fn find_config_file(base: &Path) -> Option<PathBuf> {
    let candidates = [".droidci.toml", "droidci.toml", ".config/droidci.toml"];

    candidates
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("Parsing config file {}", path.display()))
    })
}

/// Expand `~` and `$VAR` in a configured path.
///
/// Unknown variables leave the value untouched rather than failing.
pub fn expand_path(value: &str) -> PathBuf {
    match shellexpand::full(value) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(value).as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.runner.log_dir, "logs");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ci.toml");
        fs::write(&path, "[runner]\nlog_dir = \"build/emulator-logs\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.schema.runner.log_dir, "build/emulator-logs");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[runner\nlog_dir = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_find_config_file_order() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        fs::create_dir(dir.path().join(".config")).unwrap();
        fs::write(dir.path().join(".config/droidci.toml"), "").unwrap();
        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join(".config/droidci.toml"))
        );

        fs::write(dir.path().join(".droidci.toml"), "").unwrap();
        assert_eq!(find_config_file(dir.path()), Some(dir.path().join(".droidci.toml")));
    }

    #[test]
    fn test_expand_path_plain() {
        assert_eq!(expand_path("/opt/android-sdk"), PathBuf::from("/opt/android-sdk"));
        assert_eq!(
            expand_path("$DROIDCI_SURELY_UNSET_VAR/sdk"),
            PathBuf::from("$DROIDCI_SURELY_UNSET_VAR/sdk")
        );
    }
}

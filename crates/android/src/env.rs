//! Host environment snapshot
//!
//! Probes read environment variables, the home directory and `PATH` through a
//! [`HostEnv`] instead of the process globals, so a probe can be pointed at a
//! fake SDK tree or a fake `java` without touching the real environment.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Environment variables, home directory and working directory for probes
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    vars: HashMap<OsString, OsString>,
    home: Option<PathBuf>,
    cwd: PathBuf,
}

impl HostEnv {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
            home: dirs::home_dir(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// An environment with no variables and no home directory
    pub fn empty(cwd: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            home: None,
            cwd: cwd.into(),
        }
    }

    /// Set a variable
    #[must_use]
    pub fn with_var(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Set the home directory
    #[must_use]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Value of a variable, treating an empty value as unset
    pub fn var(&self, key: &str) -> Option<&OsStr> {
        self.vars
            .get(OsStr::new(key))
            .map(OsString::as_os_str)
            .filter(|v| !v.is_empty())
    }

    /// Variable interpreted as a path
    pub fn var_path(&self, key: &str) -> Option<PathBuf> {
        self.var(key).map(PathBuf::from)
    }

    /// Home directory, if known
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Working directory used for relative lookups
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Look a program up on this environment's `PATH`
    pub fn find_in_path(&self, program: &str) -> Option<PathBuf> {
        let path = self.var("PATH")?;
        which::which_in(program, Some(path), &self.cwd).ok()
    }
}

/// Whether `path` is a file with an execute bit set
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Platform-specific executable file name
pub fn exe_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

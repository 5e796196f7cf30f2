//! Error handling with codes, context and recovery suggestions
//!
//! Every fallible operation in the droidci crates returns [`Result`]. Errors carry:
//! - An [`ErrorCode`] for programmatic handling
//! - Optional context describing what was being attempted
//! - An optional recovery suggestion shown to the operator

use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Cancelled by a termination signal
    Interrupted = 1004,

    // IO errors (2xxx)
    /// Any other IO failure
    IoError = 2000,
    /// File does not exist
    FileNotFound = 2001,
    /// Not allowed to read or write
    PermissionDenied = 2002,
    /// Directory does not exist
    DirectoryNotFound = 2004,

    // Configuration errors (3xxx)
    /// Invalid configuration
    ConfigError = 3000,
    /// Explicit config file is missing
    ConfigNotFound = 3001,
    /// Config file is not valid TOML for the schema
    ConfigParseError = 3002,

    // Process errors (5xxx)
    /// Spawning or waiting on a child failed
    ProcessError = 5000,
    /// Executable not found
    CommandNotFound = 5001,
    /// Command exited unsuccessfully
    CommandFailed = 5002,

    // Platform-specific errors (8xxx)
    /// Android SDK missing or unusable
    SdkError = 8001,
    /// Emulator or adb misbehaved
    EmulatorError = 8003,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit config file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .droidci.toml file or drop the --config flag")
    }

    /// Failure spawning or waiting on a child process
    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessError, message)
    }

    /// Executable could not be located
    pub fn command_not_found(cmd: &str) -> Self {
        Self::new(
            ErrorCode::CommandNotFound,
            format!("Command not found: {}", cmd),
        )
        .with_suggestion(format!("Install {} and ensure it's in your PATH", cmd))
    }

    /// Command exited non-zero; trimmed stderr is appended when present
    pub fn command_failed(cmd: &str, exit_code: i32, stderr: &str) -> Self {
        let detail = stderr.trim();
        let message = if detail.is_empty() {
            format!("{} exited with code {}", cmd, exit_code)
        } else {
            format!("{} exited with code {}: {}", cmd, exit_code, detail)
        };
        Self::new(ErrorCode::CommandFailed, message)
    }

    /// Cancelled by a signal
    pub fn interrupted() -> Self {
        Self::new(ErrorCode::Interrupted, "Interrupted by signal")
    }

    /// Emulator or adb failure
    pub fn emulator(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmulatorError, message)
    }

    /// Whether the error was caused by cancellation rather than a failure
    pub fn is_interrupted(&self) -> bool {
        self.code == ErrorCode::Interrupted
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes shared by the droidci binaries
pub mod exit_codes {
    /// Every required check or step succeeded
    pub const SUCCESS: i32 = 0;
    /// A check failed, the AVD is missing, or the emulator did not boot
    pub const FAILURE: i32 = 1;
    /// Bad or missing command-line argument or configuration value
    pub const USAGE: i32 = 2;
    /// A required external program could not be found
    pub const COMMAND_NOT_FOUND: i32 = 127;
    /// Terminated by SIGINT/SIGTERM
    pub const INTERRUPTED: i32 = 130;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

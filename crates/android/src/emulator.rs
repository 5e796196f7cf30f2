//! Android emulator and device bridge commands
//!
//! [`EmulatorHost`] is everything the lifecycle controller needs from the
//! outside world. [`EmulatorTools`] implements it by shelling out to the SDK's
//! `emulator` and `adb` binaries.

use crate::env::HostEnv;
use crate::sdk;
use droidci_core::error::{Error, Result};
use droidci_core::process::{run_command, spawn_logged};
use std::path::{Path, PathBuf};
use std::process::Child;

/// Device property that reads `1` once Android has finished booting
pub const BOOT_COMPLETED_PROP: &str = "sys.boot_completed";

/// External operations on a single emulator instance
pub trait EmulatorHost {
    /// Names of the AVDs the emulator tool knows about
    fn list_avds(&self) -> Result<Vec<String>>;

    /// Start `avd` in the background with all output written to `log_path`
    fn spawn_emulator(&self, avd: &str, log_path: &Path) -> Result<Child>;

    /// Whether the device reports boot completion.
    ///
    /// A device that is not reachable yet is `Ok(false)`, not an error.
    fn boot_completed(&self) -> Result<bool>;

    /// State reported by the device bridge, `None` when no device is attached
    fn device_state(&self) -> Option<String>;

    /// Toggle the on-screen touch indicator
    fn set_show_touches(&self, enabled: bool) -> Result<()>;

    /// Ask the running emulator to shut down
    fn kill_emulator(&self) -> Result<()>;
}

/// Paths to the `emulator` and `adb` executables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorTools {
    pub emulator: PathBuf,
    pub adb: PathBuf,
}

impl EmulatorTools {
    /// Take the tools from the SDK layout when present, otherwise from `PATH`
    pub fn resolve(env: &HostEnv) -> Result<Self> {
        let layout = match sdk::resolve_sdk_root(None, env) {
            Ok(layout) => Some(layout),
            Err(e) => {
                tracing::debug!(error = %e.message, "no SDK root, looking up emulator tools on PATH");
                None
            }
        };

        let find = |name: &str, in_sdk: Option<PathBuf>| -> Result<PathBuf> {
            in_sdk
                .filter(|p| p.is_file())
                .or_else(|| env.find_in_path(name))
                .ok_or_else(|| {
                    Error::command_not_found(name)
                        .with_suggestion("Install the Android SDK and set ANDROID_SDK_ROOT")
                })
        };

        let tools = Self {
            emulator: find("emulator", layout.as_ref().map(|l| l.emulator()))?,
            adb: find("adb", layout.as_ref().map(|l| l.adb()))?,
        };
        tracing::debug!(
            emulator = %tools.emulator.display(),
            adb = %tools.adb.display(),
            "resolved emulator tools"
        );
        Ok(tools)
    }

    fn adb_shell(&self, command: &[&str]) -> Result<droidci_core::process::CommandResult> {
        let mut args = vec!["shell"];
        args.extend_from_slice(command);
        run_command(&self.adb, args.as_slice())
    }
}

impl EmulatorHost for EmulatorTools {
    fn list_avds(&self) -> Result<Vec<String>> {
        let result = run_command(&self.emulator, &["-list-avds"])?.into_success("emulator -list-avds")?;
        Ok(parse_avd_list(&result.stdout))
    }

    fn spawn_emulator(&self, avd: &str, log_path: &Path) -> Result<Child> {
        tracing::info!(avd, log = %log_path.display(), "launching emulator");
        spawn_logged(&self.emulator, &["-avd", avd, "-no-snapshot-load"], log_path)
    }

    fn boot_completed(&self) -> Result<bool> {
        let result = self.adb_shell(&["getprop", BOOT_COMPLETED_PROP])?;
        Ok(result.success && parse_boot_completed(&result.stdout))
    }

    fn device_state(&self) -> Option<String> {
        let result = run_command(&self.adb, &["get-state"]).ok()?;
        let state = result.stdout.trim();
        (result.success && !state.is_empty()).then(|| state.to_string())
    }

    fn set_show_touches(&self, enabled: bool) -> Result<()> {
        let value = if enabled { "1" } else { "0" };
        self.adb_shell(&["settings", "put", "system", "show_touches", value])?
            .into_success("adb shell settings put system show_touches")?;
        Ok(())
    }

    fn kill_emulator(&self) -> Result<()> {
        run_command(&self.adb, &["emu", "kill"])?.into_success("adb emu kill")?;
        Ok(())
    }
}

/// Parse `emulator -list-avds` output.
///
/// AVD names never contain whitespace, so diagnostic lines such as
/// `INFO    | Storing crashdata in: ...` are dropped.
pub fn parse_avd_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .filter(|line| !line.chars().any(char::is_whitespace))
        .map(String::from)
        .collect()
}

/// Whether `getprop sys.boot_completed` output means "booted"
pub fn parse_boot_completed(output: &str) -> bool {
    output.trim_matches(|c: char| c.is_whitespace() || c == '\r') == "1"
}

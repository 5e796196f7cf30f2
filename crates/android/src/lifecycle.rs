//! Emulator lifecycle controller
//!
//! Drives a single emulator instance through
//! `NotStarted → Launched → Booted → RunningTests → Terminating → Terminated`.
//!
//! The controller owns the spawned emulator process. Teardown runs from
//! [`EmulatorController::shutdown`] and again from `Drop`, guarded by a
//! one-shot flag, so every exit path (success, step failure, cancellation,
//! panic unwinding) shuts the emulator down exactly once.

use crate::emulator::EmulatorHost;
use chrono::NaiveDateTime;
use droidci_core::cancel::CancelToken;
use droidci_core::error::{Error, ErrorCode, exit_codes};
use droidci_core::process::tail_lines;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

/// Number of emulator log lines shown when boot fails
pub const LOG_TAIL_LINES: usize = 50;

/// Settings for one emulator run
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// AVD name, matched exactly
    pub avd: String,
    /// Created on launch; holds the emulator log
    pub log_dir: PathBuf,
    /// Overall limit for boot completion
    pub boot_timeout: Duration,
    /// Time between boot and shutdown checks
    pub poll_interval: Duration,
    /// Limit for the emulator to go away after `emu kill`
    pub shutdown_timeout: Duration,
}

impl LifecycleOptions {
    /// Options with the default timeouts
    pub fn new(avd: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            avd: avd.into(),
            log_dir: log_dir.into(),
            boot_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(60),
        }
    }
}

/// Where the controller is in the emulator's life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    NotStarted,
    Launched,
    Booted,
    RunningTests,
    Terminating,
    Terminated,
}

/// Why the emulator could not be brought up or used
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("AVD '{name}' not found")]
    AvdNotFound { name: String, available: Vec<String> },

    #[error("emulator exited before boot completed ({status})")]
    EmulatorExited {
        status: ExitStatus,
        log_path: PathBuf,
        log_tail: Vec<String>,
    },

    #[error("emulator did not finish booting within {timeout_secs}s")]
    BootTimeout {
        timeout_secs: u64,
        log_path: PathBuf,
        log_tail: Vec<String>,
    },

    #[error("interrupted by signal")]
    Interrupted,

    #[error(transparent)]
    Tool(#[from] Error),
}

impl LifecycleError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            LifecycleError::Interrupted => exit_codes::INTERRUPTED,
            LifecycleError::Tool(e) if e.is_interrupted() => exit_codes::INTERRUPTED,
            LifecycleError::Tool(e) if e.code == ErrorCode::CommandNotFound => {
                exit_codes::COMMAND_NOT_FOUND
            }
            _ => exit_codes::FAILURE,
        }
    }

    /// Captured emulator log lines, if this failure has them
    pub fn log_tail(&self) -> Option<(&Path, &[String])> {
        match self {
            LifecycleError::EmulatorExited {
                log_path, log_tail, ..
            }
            | LifecycleError::BootTimeout {
                log_path, log_tail, ..
            } => Some((log_path, log_tail)),
            _ => None,
        }
    }
}

/// Name of the log file for one run
pub fn log_file_name(avd: &str, started: NaiveDateTime) -> String {
    format!("emulator-{}-{}.log", avd, started.format("%Y%m%d-%H%M%S"))
}

/// Owns one emulator instance from launch to teardown
pub struct EmulatorController<H: EmulatorHost> {
    host: H,
    options: LifecycleOptions,
    cancel: CancelToken,
    state: LifecycleState,
    child: Option<Child>,
    log_path: Option<PathBuf>,
    cleaned_up: bool,
}

impl<H: EmulatorHost> EmulatorController<H> {
    pub fn new(host: H, options: LifecycleOptions, cancel: CancelToken) -> Self {
        Self {
            host,
            options,
            cancel,
            state: LifecycleState::NotStarted,
            child: None,
            log_path: None,
            cleaned_up: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn options(&self) -> &LifecycleOptions {
        &self.options
    }

    /// Log file of the launched emulator
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// The configured AVD must be listed by the emulator tool (exact match)
    pub fn verify_avd(&self) -> Result<(), LifecycleError> {
        let available = self.host.list_avds()?;
        if available.iter().any(|name| *name == self.options.avd) {
            Ok(())
        } else {
            Err(LifecycleError::AvdNotFound {
                name: self.options.avd.clone(),
                available,
            })
        }
    }

    /// Verify the AVD and start the emulator in the background.
    ///
    /// Nothing is spawned and no log file is created when the AVD is missing.
    pub fn launch(&mut self) -> Result<(), LifecycleError> {
        self.verify_avd()?;

        let log_dir = &self.options.log_dir;
        fs::create_dir_all(log_dir).map_err(|e| {
            Error::from(e).with_context(format!("Creating log directory {}", log_dir.display()))
        })?;
        let log_path = log_dir.join(log_file_name(
            &self.options.avd,
            chrono::Local::now().naive_local(),
        ));

        let child = self.host.spawn_emulator(&self.options.avd, &log_path)?;
        tracing::info!(
            avd = %self.options.avd,
            pid = child.id(),
            log = %log_path.display(),
            "emulator launched"
        );
        self.child = Some(child);
        self.log_path = Some(log_path);
        self.state = LifecycleState::Launched;
        Ok(())
    }

    /// Poll until the device reports boot completion.
    ///
    /// The deadline is fixed on entry. Each round checks for cancellation,
    /// then whether the emulator process is still alive, then the boot
    /// property, then the deadline.
    pub fn wait_for_boot(&mut self) -> Result<(), LifecycleError> {
        let deadline = Instant::now() + self.options.boot_timeout;
        let mut polls = 0u32;

        loop {
            if self.cancel.is_cancelled() {
                return Err(LifecycleError::Interrupted);
            }

            let Some(child) = self.child.as_mut() else {
                return Err(Error::emulator("emulator has not been launched").into());
            };
            if let Some(status) = child.try_wait().map_err(Error::from)? {
                self.child = None;
                let (log_path, log_tail) = self.captured_log();
                return Err(LifecycleError::EmulatorExited {
                    status,
                    log_path,
                    log_tail,
                });
            }

            polls += 1;
            match self.host.boot_completed() {
                Ok(true) => {
                    tracing::info!(polls, "boot completed");
                    self.state = LifecycleState::Booted;
                    return Ok(());
                }
                Ok(false) => tracing::trace!(polls, "boot not completed yet"),
                Err(e) => tracing::debug!(polls, error = %e, "boot property query failed"),
            }

            let now = Instant::now();
            if now >= deadline {
                let (log_path, log_tail) = self.captured_log();
                return Err(LifecycleError::BootTimeout {
                    timeout_secs: self.options.boot_timeout.as_secs(),
                    log_path,
                    log_tail,
                });
            }
            if self.cancel.wait_until((now + self.options.poll_interval).min(deadline)) {
                return Err(LifecycleError::Interrupted);
            }
        }
    }

    /// Turn on touch indicators; failure is only a warning
    pub fn enable_show_touches(&mut self) {
        if let Err(e) = self.host.set_show_touches(true) {
            tracing::warn!(error = %e, "could not enable show_touches");
        }
    }

    /// Run the test command against the booted device.
    ///
    /// Returns the command's exit code.
    pub fn run_tests<F>(&mut self, run: F) -> Result<i32, LifecycleError>
    where
        F: FnOnce(&CancelToken) -> droidci_core::Result<i32>,
    {
        self.state = LifecycleState::RunningTests;
        match run(&self.cancel) {
            Ok(code) => Ok(code),
            Err(e) if e.is_interrupted() => Err(LifecycleError::Interrupted),
            Err(e) => Err(e.into()),
        }
    }

    /// Tear the emulator down.
    ///
    /// Runs at most once; returns false if cleanup already ran. Every step
    /// is best-effort. One shutdown deadline covers both waiting for the
    /// device to disappear and waiting for the process to exit, and it is
    /// not cut short by cancellation. The process is only force-killed once
    /// that deadline has passed, or straight away if no stop request was
    /// accepted.
    pub fn shutdown(&mut self) -> bool {
        if self.cleaned_up {
            return false;
        }
        self.cleaned_up = true;

        if self.state == LifecycleState::NotStarted {
            self.state = LifecycleState::Terminated;
            return true;
        }
        self.state = LifecycleState::Terminating;
        tracing::debug!("cleaning up emulator");

        if let Err(e) = self.host.set_show_touches(false) {
            tracing::debug!(error = %e, "could not disable show_touches");
        }

        let started = Instant::now();
        let deadline = started + self.options.shutdown_timeout;
        // Without an accepted stop request the process is killed right away.
        let mut exit_deadline = started;
        if let Some(state) = self.host.device_state() {
            tracing::info!(%state, "stopping emulator");
            match self.host.kill_emulator() {
                Ok(()) => exit_deadline = deadline,
                Err(e) => {
                    tracing::warn!(error = %e, "emulator kill request failed");
                    self.reap_child(exit_deadline);
                }
            }
            self.wait_for_device_gone(deadline);
        }

        self.reap_child(exit_deadline);
        self.state = LifecycleState::Terminated;
        true
    }

    fn wait_for_device_gone(&self, deadline: Instant) {
        while self.host.device_state().is_some() {
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    timeout_secs = self.options.shutdown_timeout.as_secs(),
                    "emulator still attached after shutdown timeout"
                );
                return;
            }
            thread::sleep(self.options.poll_interval.min(deadline - now));
        }
        tracing::info!("emulator stopped");
    }

    /// Wait for the emulator process to exit on its own until `deadline`,
    /// then kill it.
    fn reap_child(&mut self, deadline: Instant) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!(%status, "emulator process exited");
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "could not poll emulator process");
                    break;
                }
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.options.poll_interval.min(deadline - now));
        }
        tracing::warn!(pid = child.id(), "emulator process still running, killing it");
        let _ = child.kill();
        let _ = child.wait();
    }

    fn captured_log(&self) -> (PathBuf, Vec<String>) {
        let path = self.log_path.clone().unwrap_or_default();
        let tail = tail_lines(&path, LOG_TAIL_LINES);
        (path, tail)
    }
}

impl<H: EmulatorHost> Drop for EmulatorController<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_log_file_name() {
        let started = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            log_file_name("Pixel_7_API_34", started),
            "emulator-Pixel_7_API_34-20240102-030405.log"
        );
    }

    #[test]
    fn test_exit_codes() {
        let missing = LifecycleError::AvdNotFound {
            name: "x".into(),
            available: vec![],
        };
        assert_eq!(missing.exit_code(), 1);
        assert!(missing.log_tail().is_none());
        assert_eq!(LifecycleError::Interrupted.exit_code(), 130);
        assert_eq!(LifecycleError::from(Error::interrupted()).exit_code(), 130);
        assert_eq!(LifecycleError::from(Error::command_not_found("gradlew")).exit_code(), 127);
        assert_eq!(LifecycleError::from(Error::emulator("adb failed")).exit_code(), 1);
    }

    #[cfg(unix)]
    mod with_fake_host {
        use super::*;
        use droidci_core::process::spawn_logged;
        use droidci_core::Result;
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;
        use tempfile::TempDir;

        /// What the fake host was asked to do
        #[derive(Default)]
        struct Calls {
            spawned: Cell<u32>,
            boot_polls: Cell<u32>,
            kills: Cell<u32>,
            touches: RefCell<Vec<bool>>,
            device_attached: Cell<bool>,
        }

        /// Fake emulator that keeps running until `emu kill` is requested
        const RUNS_UNTIL_KILLED: &str = r#"while [ ! -e "$1" ]; do sleep 0.02; done"#;

        struct FakeHost {
            avds: Vec<String>,
            /// Shell command standing in for the emulator process; `$1` is
            /// the marker file created by `kill_emulator`
            process: &'static str,
            kill_marker: PathBuf,
            /// Boot completes on this poll, never if `None`
            boot_on_poll: Option<u32>,
            /// Device ignores `emu kill`
            stubborn: bool,
            fail_touches: bool,
            calls: Rc<Calls>,
        }

        impl FakeHost {
            fn new(dir: &Path, process: &'static str) -> (Self, Rc<Calls>) {
                let calls = Rc::new(Calls::default());
                let host = Self {
                    avds: vec!["Pixel_7_API_34".into(), "pixel_5".into()],
                    process,
                    kill_marker: dir.join("emu-kill"),
                    boot_on_poll: None,
                    stubborn: false,
                    fail_touches: false,
                    calls: Rc::clone(&calls),
                };
                (host, calls)
            }
        }

        impl EmulatorHost for FakeHost {
            fn list_avds(&self) -> Result<Vec<String>> {
                Ok(self.avds.clone())
            }

            fn spawn_emulator(&self, _avd: &str, log_path: &Path) -> Result<Child> {
                self.calls.spawned.set(self.calls.spawned.get() + 1);
                self.calls.device_attached.set(true);
                let marker = self.kill_marker.to_string_lossy();
                spawn_logged("sh", &["-c", self.process, "fake-emulator", &marker], log_path)
            }

            fn boot_completed(&self) -> Result<bool> {
                let polls = self.calls.boot_polls.get() + 1;
                self.calls.boot_polls.set(polls);
                Ok(self.boot_on_poll.is_some_and(|n| polls >= n))
            }

            fn device_state(&self) -> Option<String> {
                self.calls.device_attached.get().then(|| "device".to_string())
            }

            fn set_show_touches(&self, enabled: bool) -> Result<()> {
                self.calls.touches.borrow_mut().push(enabled);
                if self.fail_touches {
                    return Err(Error::command_failed("adb", 1, "error: closed"));
                }
                Ok(())
            }

            fn kill_emulator(&self) -> Result<()> {
                self.calls.kills.set(self.calls.kills.get() + 1);
                if !self.stubborn {
                    self.calls.device_attached.set(false);
                    std::fs::write(&self.kill_marker, "")?;
                }
                Ok(())
            }
        }

        fn options(dir: &Path, avd: &str) -> LifecycleOptions {
            LifecycleOptions {
                avd: avd.into(),
                log_dir: dir.join("logs"),
                boot_timeout: Duration::from_secs(10),
                poll_interval: Duration::from_millis(20),
                shutdown_timeout: Duration::from_secs(2),
            }
        }

        #[test]
        fn test_missing_avd_spawns_nothing() {
            let dir = TempDir::new().unwrap();
            let (host, calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "pixel_7"), CancelToken::new());

            let err = controller.launch().unwrap_err();
            match &err {
                LifecycleError::AvdNotFound { name, available } => {
                    assert_eq!(name, "pixel_7");
                    assert_eq!(available, &["Pixel_7_API_34", "pixel_5"]);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(err.exit_code(), 1);
            assert_eq!(calls.spawned.get(), 0);
            assert!(!dir.path().join("logs").exists());
            assert!(controller.log_path().is_none());

            assert!(controller.shutdown());
            assert_eq!(controller.state(), LifecycleState::Terminated);
            assert_eq!(calls.kills.get(), 0);
            assert!(calls.touches.borrow().is_empty());
        }

        #[test]
        fn test_avd_match_is_case_sensitive() {
            let dir = TempDir::new().unwrap();
            let (host, _calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            let controller =
                EmulatorController::new(host, options(dir.path(), "PIXEL_5"), CancelToken::new());
            assert!(matches!(
                controller.verify_avd(),
                Err(LifecycleError::AvdNotFound { .. })
            ));
        }

        #[test]
        fn test_successful_boot_and_single_cleanup() {
            let dir = TempDir::new().unwrap();
            let (mut host, calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            host.boot_on_poll = Some(3);
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "Pixel_7_API_34"), CancelToken::new());

            controller.launch().unwrap();
            assert_eq!(controller.state(), LifecycleState::Launched);
            let log_path = controller.log_path().unwrap().to_path_buf();
            assert!(log_path.starts_with(dir.path().join("logs")));
            assert!(log_path.is_file());

            controller.wait_for_boot().unwrap();
            assert_eq!(controller.state(), LifecycleState::Booted);
            assert_eq!(calls.boot_polls.get(), 3);

            controller.enable_show_touches();
            let code = controller.run_tests(|_| Ok(0)).unwrap();
            assert_eq!(code, 0);
            assert_eq!(controller.state(), LifecycleState::RunningTests);

            assert!(controller.shutdown());
            assert!(!controller.shutdown());
            drop(controller);

            assert_eq!(calls.spawned.get(), 1);
            assert_eq!(calls.kills.get(), 1);
            assert_eq!(*calls.touches.borrow(), [true, false]);
            assert!(!calls.device_attached.get());
        }

        #[test]
        fn test_process_death_reports_log_tail() {
            let dir = TempDir::new().unwrap();
            let (host, calls) = FakeHost::new(
                dir.path(),
                "echo 'starting'; echo 'PANIC: missing system image'; exit 3",
            );
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "pixel_5"), CancelToken::new());

            controller.launch().unwrap();
            let start = Instant::now();
            let err = controller.wait_for_boot().unwrap_err();
            assert!(start.elapsed() < Duration::from_secs(5));

            let LifecycleError::EmulatorExited { status, .. } = &err else {
                panic!("unexpected error: {err:?}");
            };
            assert_eq!(status.code(), Some(3));
            let (path, tail) = err.log_tail().unwrap();
            assert_eq!(path, controller.log_path().unwrap());
            assert_eq!(tail, ["starting", "PANIC: missing system image"]);
            assert_eq!(err.exit_code(), 1);

            assert!(controller.shutdown());
            assert!(!controller.shutdown());
            assert_eq!(calls.kills.get(), 1);
        }

        #[test]
        fn test_boot_timeout() {
            let dir = TempDir::new().unwrap();
            let (host, calls) = FakeHost::new(
                dir.path(),
                r#"echo 'waiting for device'; while [ ! -e "$1" ]; do sleep 0.02; done"#,
            );
            let mut opts = options(dir.path(), "pixel_5");
            opts.boot_timeout = Duration::from_millis(200);
            opts.poll_interval = Duration::from_millis(50);
            let mut controller = EmulatorController::new(host, opts, CancelToken::new());

            controller.launch().unwrap();
            let start = Instant::now();
            let err = controller.wait_for_boot().unwrap_err();
            let elapsed = start.elapsed();

            assert!(matches!(err, LifecycleError::BootTimeout { .. }), "{err:?}");
            assert!(elapsed >= Duration::from_millis(200));
            assert!(elapsed < Duration::from_secs(5));
            assert!(calls.boot_polls.get() >= 2);
            assert_eq!(err.exit_code(), 1);
        }

        #[test]
        fn test_cancel_interrupts_boot_wait() {
            let dir = TempDir::new().unwrap();
            let (host, calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            let cancel = CancelToken::new();
            let mut opts = options(dir.path(), "pixel_5");
            opts.poll_interval = Duration::from_secs(5);
            let mut controller = EmulatorController::new(host, opts, cancel.clone());

            controller.launch().unwrap();
            let canceller = {
                let cancel = cancel.clone();
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(50));
                    cancel.cancel();
                })
            };

            let start = Instant::now();
            let err = controller.wait_for_boot().unwrap_err();
            canceller.join().unwrap();
            assert!(matches!(err, LifecycleError::Interrupted));
            assert!(start.elapsed() < Duration::from_secs(4));
            assert_eq!(err.exit_code(), 130);

            drop(controller);
            assert_eq!(calls.kills.get(), 1);
        }

        #[test]
        fn test_shutdown_timeout_only_warns() {
            let dir = TempDir::new().unwrap();
            let (mut host, calls) = FakeHost::new(dir.path(), "sleep 30");
            host.stubborn = true;
            let mut opts = options(dir.path(), "pixel_5");
            opts.shutdown_timeout = Duration::from_millis(100);
            let mut controller = EmulatorController::new(host, opts, CancelToken::new());

            controller.launch().unwrap();
            let start = Instant::now();
            assert!(controller.shutdown());
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_millis(100));
            assert!(elapsed < Duration::from_secs(5));
            assert_eq!(controller.state(), LifecycleState::Terminated);
            assert_eq!(calls.kills.get(), 1);
        }

        #[test]
        fn test_shutdown_waits_for_emulator_to_exit() {
            let dir = TempDir::new().unwrap();
            // Keeps writing its snapshot after the device has detached.
            let (host, calls) = FakeHost::new(
                dir.path(),
                r#"while [ ! -e "$1" ]; do sleep 0.02; done; sleep 0.3; echo saved > "$1.snapshot""#,
            );
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "pixel_5"), CancelToken::new());

            controller.launch().unwrap();
            assert!(controller.shutdown());
            assert_eq!(calls.kills.get(), 1);

            let snapshot = fs::read_to_string(dir.path().join("emu-kill.snapshot")).unwrap();
            assert_eq!(snapshot.trim(), "saved");
        }

        #[test]
        fn test_show_touches_failure_is_not_fatal() {
            let dir = TempDir::new().unwrap();
            let (mut host, calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            host.boot_on_poll = Some(1);
            host.fail_touches = true;
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "pixel_5"), CancelToken::new());

            controller.launch().unwrap();
            controller.wait_for_boot().unwrap();
            controller.enable_show_touches();
            assert_eq!(controller.run_tests(|_| Ok(4)).unwrap(), 4);
            assert!(controller.shutdown());
            assert_eq!(calls.kills.get(), 1);
        }

        #[test]
        fn test_interrupted_test_command() {
            let dir = TempDir::new().unwrap();
            let (mut host, _calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            host.boot_on_poll = Some(1);
            let mut controller =
                EmulatorController::new(host, options(dir.path(), "pixel_5"), CancelToken::new());

            controller.launch().unwrap();
            controller.wait_for_boot().unwrap();
            let err = controller
                .run_tests(|_| Err(Error::interrupted()))
                .unwrap_err();
            assert!(matches!(err, LifecycleError::Interrupted));
        }

        #[test]
        fn test_drop_runs_cleanup() {
            let dir = TempDir::new().unwrap();
            let (mut host, calls) = FakeHost::new(dir.path(), RUNS_UNTIL_KILLED);
            host.boot_on_poll = Some(1);
            {
                let mut controller =
                    EmulatorController::new(host, options(dir.path(), "pixel_5"), CancelToken::new());
                controller.launch().unwrap();
                controller.wait_for_boot().unwrap();
            }
            assert_eq!(calls.kills.get(), 1);
            assert_eq!(*calls.touches.borrow(), [false]);
        }
    }
}

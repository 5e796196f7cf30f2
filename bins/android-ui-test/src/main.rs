//! Android UI test runner
//!
//! Boots an emulator AVD, waits for it to finish booting, enables touch
//! indicators, runs the connected-device Gradle task and shuts the emulator
//! down again on every exit path, including SIGINT/SIGTERM.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use droidci_android::emulator::{EmulatorHost, EmulatorTools};
use droidci_android::env::HostEnv;
use droidci_android::gradle;
use droidci_android::lifecycle::{EmulatorController, LifecycleError, LifecycleOptions};
use droidci_cli::args::CommonArgs;
use droidci_cli::output::Status;
use droidci_cli::progress;
use droidci_core::cancel::CancelToken;
use droidci_core::config::{Config, RunnerConfig, expand_path};
use droidci_core::error::exit_codes;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "android-ui-test")]
#[command(about = "Boot an Android emulator, run connected tests, and always shut it down")]
#[command(version)]
struct Cli {
    /// AVD to boot (required here or in the config file)
    #[arg(long, env = "DROIDCI_AVD", value_name = "NAME")]
    avd: Option<String>,

    /// Directory for emulator logs [default: logs]
    #[arg(long, env = "DROIDCI_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Seconds to wait for boot completion [default: 60]
    #[arg(long, env = "DROIDCI_BOOT_TIMEOUT", value_name = "SECS")]
    boot_timeout: Option<u64>,

    /// Seconds between boot checks [default: 1]
    #[arg(
        long,
        env = "DROIDCI_POLL_INTERVAL",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval: Option<u64>,

    /// Seconds to wait for the emulator to go away on shutdown [default: 60]
    #[arg(long, env = "DROIDCI_SHUTDOWN_TIMEOUT", value_name = "SECS")]
    shutdown_timeout: Option<u64>,

    /// Gradle task that runs the tests [default: connectedAndroidTest]
    #[arg(long, env = "DROIDCI_TASK", value_name = "TASK")]
    task: Option<String>,

    /// Directory containing the Gradle wrapper [default: .]
    #[arg(long, env = "DROIDCI_PROJECT_DIR", value_name = "DIR")]
    project_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Everything one run needs after flags and config are merged
#[derive(Debug)]
struct RunSettings {
    lifecycle: LifecycleOptions,
    task: String,
    project_dir: PathBuf,
}

impl Cli {
    /// Flags (and their environment variables) win over the config file.
    ///
    /// Returns `None` when no AVD was given anywhere.
    fn settings(&self, config: &RunnerConfig) -> Option<RunSettings> {
        let avd = self
            .avd
            .clone()
            .or_else(|| config.avd.clone())
            .filter(|avd| !avd.is_empty())?;

        let secs = |flag: Option<u64>, configured: u64| Duration::from_secs(flag.unwrap_or(configured));

        Some(RunSettings {
            lifecycle: LifecycleOptions {
                avd,
                log_dir: self
                    .log_dir
                    .clone()
                    .unwrap_or_else(|| expand_path(&config.log_dir)),
                boot_timeout: secs(self.boot_timeout, config.boot_timeout_secs),
                poll_interval: secs(self.poll_interval, config.poll_interval_secs.max(1)),
                shutdown_timeout: secs(self.shutdown_timeout, config.shutdown_timeout_secs),
            },
            task: self.task.clone().unwrap_or_else(|| config.task.clone()),
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

    let config = match Config::load(cli.common.config.as_deref()).context("loading configuration") {
        Ok(config) => config,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            std::process::exit(exit_codes::USAGE);
        }
    };

    let Some(settings) = cli.settings(&config.schema.runner) else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided:\n  --avd <NAME>",
            )
            .exit();
    };

    let cancel = CancelToken::new();
    if let Err(e) = install_signal_handler(&cancel) {
        tracing::warn!(error = %format!("{:#}", e), "running without signal cleanup");
    }

    let code = run(settings, &cancel);
    std::process::exit(code);
}

/// SIGINT, SIGTERM and SIGHUP only request cancellation; cleanup happens on
/// the main thread.
fn install_signal_handler(cancel: &CancelToken) -> Result<()> {
    let cancel = cancel.clone();
    ctrlc::set_handler(move || {
        tracing::warn!("termination signal received, shutting down");
        cancel.cancel();
    })
    .context("installing signal handler")
}

fn run(settings: RunSettings, cancel: &CancelToken) -> i32 {
    let tools = match EmulatorTools::resolve(&HostEnv::from_process()) {
        Ok(tools) => tools,
        Err(e) => {
            tracing::error!(step = "resolve-tools", error = %e, "step failed");
            Status::error(&e.to_string());
            return exit_codes::COMMAND_NOT_FOUND;
        }
    };

    let mut controller = EmulatorController::new(tools, settings.lifecycle.clone(), cancel.clone());
    let outcome = run_steps(&mut controller, &settings);
    controller.shutdown();

    let code = match outcome {
        Ok(0) => {
            Status::success("Tests passed");
            exit_codes::SUCCESS
        }
        Ok(code) => {
            Status::error(&format!("Test task exited with code {}", code));
            code
        }
        Err((step, e)) => {
            report_failure(step, &e);
            e.exit_code()
        }
    };

    if cancel.is_cancelled() {
        exit_codes::INTERRUPTED
    } else {
        code
    }
}

type StepError = (&'static str, LifecycleError);

fn run_steps<H: EmulatorHost>(
    controller: &mut EmulatorController<H>,
    settings: &RunSettings,
) -> std::result::Result<i32, StepError> {
    let avd = &settings.lifecycle.avd;

    Status::step(1, 4, &format!("Launching emulator for AVD '{}'", avd));
    controller.launch().map_err(|e| ("launch", e))?;
    if let Some(log) = controller.log_path() {
        Status::info(&format!("Emulator log: {}", log.display()));
    }

    Status::step(2, 4, "Waiting for boot to complete");
    let spinner = progress::spinner(&format!("Booting {}", avd));
    match controller.wait_for_boot() {
        Ok(()) => progress::finish_success(&spinner, "Boot completed"),
        Err(e) => {
            progress::finish_error(&spinner, "Boot failed");
            return Err(("wait-for-boot", e));
        }
    }

    Status::step(3, 4, "Enabling touch indicators");
    controller.enable_show_touches();

    Status::step(4, 4, &format!("Running {} {}", gradle::wrapper_name(), settings.task));
    controller
        .run_tests(|cancel| gradle::run_task(&settings.project_dir, &settings.task, cancel))
        .map_err(|e| ("run-tests", e))
}

fn report_failure(step: &str, error: &LifecycleError) {
    tracing::error!(step, error = %error, "step failed");
    Status::error(&format!("{} failed: {}", step, error));

    match error {
        LifecycleError::AvdNotFound { available, .. } if available.is_empty() => {
            println!("No AVDs are available. Create one with avdmanager.");
        }
        LifecycleError::AvdNotFound { available, .. } => {
            println!("Available AVDs:");
            for name in available {
                println!("  {}", name);
            }
        }
        _ => {}
    }

    if let Some((path, lines)) = error.log_tail() {
        println!("Last {} lines of {}:", lines.len(), path.display());
        for line in lines {
            println!("  {}", line);
        }
    }
}

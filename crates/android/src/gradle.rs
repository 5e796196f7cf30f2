//! Gradle build system integration
//!
//! Locates the project's Gradle wrapper and runs test tasks through it.

use crate::env::{HostEnv, is_executable};
use droidci_core::cancel::CancelToken;
use droidci_core::error::{Error, Result};
use droidci_core::process::{exit_code_of, spawn_inherited, wait_cancellable};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default task for instrumented tests on a connected device
pub const CONNECTED_TEST_TASK: &str = "connectedAndroidTest";

/// File name of the Gradle wrapper script
pub fn wrapper_name() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "gradlew" }
}

/// The project's executable Gradle wrapper, if any
pub fn find_wrapper(project_dir: &Path) -> Option<PathBuf> {
    let wrapper = project_dir.join(wrapper_name());
    is_executable(&wrapper).then_some(wrapper)
}

/// How Gradle can be invoked for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradleInvocation {
    /// `./gradlew` in the project directory
    Wrapper(PathBuf),
    /// A system-wide `gradle` on `PATH`
    System(PathBuf),
    /// Neither is available
    Missing,
}

/// Prefer the project wrapper, then a system-wide Gradle
pub fn locate_gradle(project_dir: &Path, env: &HostEnv) -> GradleInvocation {
    if let Some(wrapper) = find_wrapper(project_dir) {
        return GradleInvocation::Wrapper(wrapper);
    }
    match env.find_in_path("gradle") {
        Some(gradle) => GradleInvocation::System(gradle),
        None => GradleInvocation::Missing,
    }
}

/// Run a Gradle task through the project wrapper in the foreground.
///
/// Output is inherited. Returns the task's exit code (`128 + signal` if it
/// was killed by a signal). Cancellation kills the task and returns an
/// interrupted error.
pub fn run_task(project_dir: &Path, task: &str, cancel: &CancelToken) -> Result<i32> {
    let wrapper = find_wrapper(project_dir).ok_or_else(|| {
        Error::command_not_found(wrapper_name())
            .with_context(format!("Looking for the Gradle wrapper in {}", project_dir.display()))
    })?;
    // Relative program paths combined with current_dir are ambiguous.
    let wrapper = std::path::absolute(&wrapper).unwrap_or(wrapper);

    tracing::info!(wrapper = %wrapper.display(), task, "running gradle task");
    let mut child = spawn_inherited(&wrapper, &[task], project_dir)?;
    let status = wait_cancellable(&mut child, cancel, Duration::from_millis(200))?;
    Ok(exit_code_of(status))
}

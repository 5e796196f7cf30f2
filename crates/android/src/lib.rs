//! Android tooling for droidci
//!
//! - [`doctor`]: the ordered environment health checks
//! - [`sdk`], [`java`], [`gradle`]: probes for the individual toolchain parts
//! - [`emulator`]: `emulator`/`adb` commands behind the [`emulator::EmulatorHost`] seam
//! - [`lifecycle`]: launch, boot-wait and guaranteed teardown of one emulator

pub mod doctor;
pub mod emulator;
pub mod env;
pub mod gradle;
pub mod java;
pub mod lifecycle;
pub mod sdk;

pub use doctor::{HealthCheckOptions, run_health_check};
pub use emulator::{EmulatorHost, EmulatorTools};
pub use env::HostEnv;
pub use lifecycle::{EmulatorController, LifecycleError, LifecycleOptions, LifecycleState};

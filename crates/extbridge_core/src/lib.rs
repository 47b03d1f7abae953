//! Core hand-off logic for the module registration bridge.
//! This crate is the single source of truth for the slot invariants.

pub mod bootstrap;
pub mod descriptor;
pub mod logging;
pub mod resolve;
pub mod slot;

pub use bootstrap::{BootstrapOutcome, ModuleBridge, RegistrationError};
pub use descriptor::{
    DescriptorError, ModuleDescriptor, ModuleHook, MODULE_HOOK_CAP, MODULE_NAME_CAP,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use resolve::{resolve, DescriptorFactory};
pub use slot::{RegistrationSlot, SlotState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

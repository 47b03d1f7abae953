//! C ABI crate exporting the registration slot and bootstrap entry points.
//!
//! # Responsibility
//! - Instantiate the one process-wide bridge over the exported slot symbol.
//! - Keep every export panic-free and stable in return-value meaning.

mod guard;
pub mod api;

pub use api::{
    extbridge_bootstrap, extbridge_init_logging, extbridge_module_entry,
    extbridge_module_entry_ref, extbridge_register_factory, extbridge_slot_state,
    EXTBRIDGE_ERR_ALREADY_REGISTERED, EXTBRIDGE_ERR_BOOTSTRAP_ALREADY_RAN, EXTBRIDGE_ERR_INTERNAL,
    EXTBRIDGE_ERR_INVALID_ARGUMENT, EXTBRIDGE_ERR_NULL_ARGUMENT, EXTBRIDGE_OK,
};

//! Exported ABI surface for the host loader and the producer.
//!
//! # Responsibility
//! - Export the fixed-name registration slot the host loader reads.
//! - Expose the explicit bootstrap and producer-registration entry points.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Return codes are stable: slot state codes are non-negative, errors are
//!   negative.
//! - The host must not read the slot from multiple threads before bootstrap
//!   completes; that precondition is documented, not enforced.

use crate::guard::guard_with_default;
use extbridge_core::{
    init_logging, DescriptorFactory, ModuleBridge, ModuleDescriptor, RegistrationError,
    RegistrationSlot,
};
use std::ffi::{c_char, CStr};

/// Registration succeeded.
pub const EXTBRIDGE_OK: i32 = 0;
/// A descriptor factory was already registered.
pub const EXTBRIDGE_ERR_ALREADY_REGISTERED: i32 = -1;
/// Bootstrap already ran; a late registration can never take effect.
pub const EXTBRIDGE_ERR_BOOTSTRAP_ALREADY_RAN: i32 = -2;
/// A required pointer argument was null.
pub const EXTBRIDGE_ERR_NULL_ARGUMENT: i32 = -3;
/// Invalid argument contents (bad encoding, unsupported value).
pub const EXTBRIDGE_ERR_INVALID_ARGUMENT: i32 = -4;
/// A panic was caught at the boundary.
pub const EXTBRIDGE_ERR_INTERNAL: i32 = -128;

/// The fixed-name symbol the host loader resolves to read extension
/// metadata. Its bytes are exactly a [`ModuleDescriptor`]: the zero sentinel
/// until bootstrap publishes a descriptor, the final descriptor afterwards.
// Lower-case name is the externally agreed symbol spelling.
#[allow(non_upper_case_globals)]
#[no_mangle]
pub static extbridge_module_entry: RegistrationSlot = RegistrationSlot::zeroed();

static BRIDGE: ModuleBridge = ModuleBridge::new(&extbridge_module_entry);

/// Registers the producer's descriptor factory.
///
/// # FFI contract
/// - Must be called before `extbridge_bootstrap`.
/// - Never panics; returns `EXTBRIDGE_OK` or a negative error code.
#[no_mangle]
pub extern "C" fn extbridge_register_factory(factory: Option<DescriptorFactory>) -> i32 {
    guard_with_default("extbridge_register_factory", EXTBRIDGE_ERR_INTERNAL, || {
        let Some(factory) = factory else {
            return EXTBRIDGE_ERR_NULL_ARGUMENT;
        };
        match BRIDGE.register_factory(factory) {
            Ok(()) => EXTBRIDGE_OK,
            Err(RegistrationError::FactoryAlreadyRegistered) => EXTBRIDGE_ERR_ALREADY_REGISTERED,
            Err(RegistrationError::BootstrapAlreadyRan) => EXTBRIDGE_ERR_BOOTSTRAP_ALREADY_RAN,
        }
    })
}

/// Runs the one-shot hand-off from resolver to slot.
///
/// Whatever drives the loading sequence calls this strictly before the
/// host's first read of `extbridge_module_entry`. The internal once guard
/// keeps repeated calls from any code path harmless.
///
/// # FFI contract
/// - Idempotent; the slot never changes after the first completion.
/// - Never panics; returns the terminal slot state code
///   (`1` zero sentinel, `2` populated) or `EXTBRIDGE_ERR_INTERNAL`.
#[no_mangle]
pub extern "C" fn extbridge_bootstrap() -> i32 {
    guard_with_default("extbridge_bootstrap", EXTBRIDGE_ERR_INTERNAL, || {
        BRIDGE.bootstrap();
        BRIDGE.slot_state().code()
    })
}

/// Reports where the slot is in its lifecycle.
///
/// # FFI contract
/// - Pure query; never changes bridge state.
/// - Never panics; returns `0` uninitialized, `1` zero sentinel,
///   `2` populated, or `EXTBRIDGE_ERR_INTERNAL`.
#[no_mangle]
pub extern "C" fn extbridge_slot_state() -> i32 {
    guard_with_default("extbridge_slot_state", EXTBRIDGE_ERR_INTERNAL, || {
        BRIDGE.slot_state().code()
    })
}

/// Returns a read pointer to the slot, bootstrapping first.
///
/// Lazy alternative for hosts that resolve the entry through a call: the
/// once guard makes this path equivalent to an up-front bootstrap.
///
/// # FFI contract
/// - The returned pointer is valid for the process lifetime.
/// - Never panics; never returns null.
#[no_mangle]
pub extern "C" fn extbridge_module_entry_ref() -> *const ModuleDescriptor {
    guard_with_default(
        "extbridge_module_entry_ref",
        std::ptr::null(),
        || {
            BRIDGE.bootstrap();
            (BRIDGE.slot() as *const RegistrationSlot).cast::<ModuleDescriptor>()
        },
    )
}

/// Initializes bridge file logging.
///
/// Observability only; the hand-off works identically without it.
///
/// # FFI contract
/// - `level` and `log_dir` must be NUL-terminated UTF-8.
/// - Idempotent for the same configuration; conflicts are rejected.
/// - Never panics; returns `EXTBRIDGE_OK` or a negative error code.
///
/// # Safety
/// Both pointers must be null or point to valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn extbridge_init_logging(
    level: *const c_char,
    log_dir: *const c_char,
) -> i32 {
    guard_with_default("extbridge_init_logging", EXTBRIDGE_ERR_INTERNAL, || {
        if level.is_null() || log_dir.is_null() {
            return EXTBRIDGE_ERR_NULL_ARGUMENT;
        }
        let (Ok(level), Ok(log_dir)) = (
            unsafe { CStr::from_ptr(level) }.to_str(),
            unsafe { CStr::from_ptr(log_dir) }.to_str(),
        ) else {
            return EXTBRIDGE_ERR_INVALID_ARGUMENT;
        };
        match init_logging(level, log_dir) {
            Ok(()) => EXTBRIDGE_OK,
            Err(err) => {
                log::warn!("event=logging_init module=ffi status=rejected reason={err}");
                EXTBRIDGE_ERR_INVALID_ARGUMENT
            }
        }
    })
}

//! Early initializer driving the resolver-to-slot hand-off.
//!
//! # Responsibility
//! - Run the resolver exactly once per process and publish its result.
//! - Give the explicit bootstrap entry point a run-exactly-once guard, so
//!   the ordering property holds even when bootstrap is reachable from
//!   several code paths.
//!
//! # Invariants
//! - The slot is written at most once, and only before the recorded outcome
//!   becomes observable.
//! - Re-invocation after the first completion returns the recorded outcome
//!   and leaves the slot untouched.
//! - Both terminal states are final: there is no path back to
//!   `Uninitialized` and no path between `Populated` and `ZeroSentinel`
//!   within one process lifetime.

use crate::descriptor::ModuleDescriptor;
use crate::resolve::{resolve, DescriptorFactory};
use crate::slot::{RegistrationSlot, SlotState};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Terminal result of the one-shot bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The resolver produced a descriptor and it was published to the slot.
    Populated,
    /// The resolver reported absence; the slot stays at the zero sentinel.
    Absent,
}

impl BootstrapOutcome {
    /// Stable string id used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Populated => "populated",
            Self::Absent => "absent",
        }
    }
}

/// Factory registration errors.
///
/// These surface producer-side wiring mistakes; they are never part of the
/// host-facing hand-off, which only ever sees the slot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// A factory was already registered for this process.
    FactoryAlreadyRegistered,
    /// Bootstrap already ran; the outcome is final and a late factory could
    /// never take effect.
    BootstrapAlreadyRan,
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactoryAlreadyRegistered => {
                write!(f, "descriptor factory already registered for this process")
            }
            Self::BootstrapAlreadyRan => {
                write!(f, "bootstrap already ran; registration can no longer take effect")
            }
        }
    }
}

impl Error for RegistrationError {}

/// One-shot bridge from the descriptor resolver to a `'static` slot.
///
/// This is the explicit singleton replacing a bare mutable global: the
/// write-once discipline lives in the API instead of in caller convention.
/// The ffi crate instantiates exactly one bridge over the exported slot;
/// tests instantiate as many as they need over local static slots.
pub struct ModuleBridge {
    slot: &'static RegistrationSlot,
    factory: OnceCell<DescriptorFactory>,
    outcome: OnceCell<BootstrapOutcome>,
}

impl ModuleBridge {
    /// Creates an uninitialized bridge over `slot`.
    pub const fn new(slot: &'static RegistrationSlot) -> Self {
        Self {
            slot,
            factory: OnceCell::new(),
            outcome: OnceCell::new(),
        }
    }

    /// Registers the producer's factory ahead of bootstrap.
    ///
    /// # Errors
    /// - `FactoryAlreadyRegistered` on a second registration.
    /// - `BootstrapAlreadyRan` when the outcome is already final.
    pub fn register_factory(&self, factory: DescriptorFactory) -> Result<(), RegistrationError> {
        if self.outcome.get().is_some() {
            return Err(RegistrationError::BootstrapAlreadyRan);
        }
        self.factory
            .set(factory)
            .map_err(|_| RegistrationError::FactoryAlreadyRegistered)
    }

    /// Runs the one-shot hand-off and returns the terminal outcome.
    ///
    /// The first call resolves the descriptor and, on success, publishes it
    /// into the slot before the outcome is recorded. Every later call
    /// returns the recorded outcome without touching the slot. A missing
    /// factory and a factory returning the zero sentinel both resolve to
    /// `Absent`: the sentinel must stay unambiguous for the host.
    pub fn bootstrap(&self) -> BootstrapOutcome {
        *self.outcome.get_or_init(|| {
            let resolved = self
                .factory
                .get()
                .copied()
                .and_then(resolve)
                .filter(|descriptor| !descriptor.is_zero());
            match resolved {
                Some(descriptor) => {
                    // Publishing inside the once guard keeps this the single
                    // write, sequenced before the outcome is observable.
                    unsafe { self.slot.publish(&descriptor) };
                    info!(
                        "event=bridge_bootstrap module=bootstrap status=ok name={} version={} hooks={}",
                        descriptor.name(),
                        descriptor.version,
                        descriptor.hook_count
                    );
                    BootstrapOutcome::Populated
                }
                None => {
                    info!("event=bridge_bootstrap module=bootstrap status=absent");
                    BootstrapOutcome::Absent
                }
            }
        })
    }

    /// Returns where the slot is in its lifecycle.
    pub fn slot_state(&self) -> SlotState {
        match self.outcome.get() {
            None => SlotState::Uninitialized,
            Some(BootstrapOutcome::Absent) => SlotState::ZeroSentinel,
            Some(BootstrapOutcome::Populated) => SlotState::Populated,
        }
    }

    /// Copies the current slot contents out by value.
    pub fn descriptor(&self) -> ModuleDescriptor {
        self.slot.snapshot()
    }

    /// The slot this bridge publishes into.
    pub fn slot(&self) -> &'static RegistrationSlot {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::{BootstrapOutcome, ModuleBridge, RegistrationError};
    use crate::descriptor::ModuleDescriptor;
    use crate::slot::{RegistrationSlot, SlotState};
    use once_cell::sync::OnceCell;

    unsafe extern "C" fn absent_factory() -> *const ModuleDescriptor {
        std::ptr::null()
    }

    unsafe extern "C" fn zero_factory() -> *const ModuleDescriptor {
        &ModuleDescriptor::ZERO
    }

    unsafe extern "C" fn sample_factory() -> *const ModuleDescriptor {
        static DESCRIPTOR: OnceCell<ModuleDescriptor> = OnceCell::new();
        DESCRIPTOR.get_or_init(|| {
            ModuleDescriptor::new("sample", 3, &[]).expect("sample descriptor builds")
        })
    }

    #[test]
    fn bootstrap_without_factory_settles_on_the_sentinel() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        static BRIDGE: ModuleBridge = ModuleBridge::new(&SLOT);

        assert_eq!(BRIDGE.slot_state(), SlotState::Uninitialized);
        assert_eq!(BRIDGE.bootstrap(), BootstrapOutcome::Absent);
        assert_eq!(BRIDGE.slot_state(), SlotState::ZeroSentinel);
        assert!(BRIDGE.descriptor().is_zero());
    }

    #[test]
    fn bootstrap_publishes_the_resolved_descriptor() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        static BRIDGE: ModuleBridge = ModuleBridge::new(&SLOT);

        BRIDGE
            .register_factory(sample_factory)
            .expect("first registration succeeds");
        assert_eq!(BRIDGE.bootstrap(), BootstrapOutcome::Populated);
        assert_eq!(BRIDGE.slot_state(), SlotState::Populated);
        assert_eq!(BRIDGE.descriptor().name(), "sample");
        assert_eq!(BRIDGE.descriptor().version, 3);
    }

    #[test]
    fn zero_descriptor_from_the_producer_counts_as_absence() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        static BRIDGE: ModuleBridge = ModuleBridge::new(&SLOT);

        BRIDGE
            .register_factory(zero_factory)
            .expect("registration succeeds");
        assert_eq!(BRIDGE.bootstrap(), BootstrapOutcome::Absent);
        assert_eq!(BRIDGE.slot_state(), SlotState::ZeroSentinel);
    }

    #[test]
    fn second_registration_is_rejected() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        static BRIDGE: ModuleBridge = ModuleBridge::new(&SLOT);

        BRIDGE
            .register_factory(sample_factory)
            .expect("first registration succeeds");
        let err = BRIDGE
            .register_factory(absent_factory)
            .expect_err("second registration must fail");
        assert_eq!(err, RegistrationError::FactoryAlreadyRegistered);
    }

    #[test]
    fn registration_after_bootstrap_is_rejected() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        static BRIDGE: ModuleBridge = ModuleBridge::new(&SLOT);

        assert_eq!(BRIDGE.bootstrap(), BootstrapOutcome::Absent);
        let err = BRIDGE
            .register_factory(sample_factory)
            .expect_err("late registration must fail");
        assert_eq!(err, RegistrationError::BootstrapAlreadyRan);
    }
}

//! Registration slot: the fixed-layout storage the host loader reads.
//!
//! # Responsibility
//! - Hold exactly one [`ModuleDescriptor`] for the whole process lifetime.
//! - Keep the exported symbol's binary layout identical to the descriptor.
//!
//! # Invariants
//! - The slot starts as the zero sentinel and is written at most once.
//! - A reader observes either the zero sentinel or a complete descriptor
//!   copy; no intermediate state exists on any read path.
//! - The host must not trigger extension loading from multiple threads
//!   before bootstrap completes; that precondition is external and not
//!   enforced here.

use crate::descriptor::ModuleDescriptor;
use std::cell::UnsafeCell;

/// Process-wide storage cell with exactly the layout of [`ModuleDescriptor`].
///
/// `repr(transparent)` keeps the exported symbol readable by the host as raw
/// descriptor bytes, without any call into this bridge. Write access is
/// crate-internal and reserved for the bootstrap path.
#[repr(transparent)]
pub struct RegistrationSlot(UnsafeCell<ModuleDescriptor>);

// One writer exists (the bootstrap path) and it completes before the host
// starts reading; see the module invariants above.
unsafe impl Sync for RegistrationSlot {}

impl RegistrationSlot {
    /// A slot holding the zero sentinel, suitable for `static` initializers.
    pub const fn zeroed() -> Self {
        Self(UnsafeCell::new(ModuleDescriptor::ZERO))
    }

    /// Copies the current slot contents out by value.
    ///
    /// Before bootstrap this returns the zero sentinel; afterwards it
    /// returns the published descriptor. Both are complete values.
    pub fn snapshot(&self) -> ModuleDescriptor {
        // The single write is sequenced before any read per the module
        // invariants, so this raw read never races.
        unsafe { *self.0.get() }
    }

    /// Publishes a descriptor copy into the slot.
    ///
    /// # Safety
    /// Caller must be the one-shot bootstrap path: the slot must still hold
    /// the zero sentinel and no reader may run concurrently with the write.
    pub(crate) unsafe fn publish(&self, descriptor: &ModuleDescriptor) {
        *self.0.get() = *descriptor;
    }
}

/// Bridge-side view of where the slot is in its lifecycle.
///
/// This is bookkeeping for diagnostics and tests; it is not part of the
/// exported symbol's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotState {
    /// Bootstrap has not run; the slot holds the zero sentinel.
    Uninitialized = 0,
    /// Bootstrap ran and the resolver reported absence; the sentinel is
    /// final for this process.
    ZeroSentinel = 1,
    /// Bootstrap ran and published a descriptor; the slot is final.
    Populated = 2,
}

impl SlotState {
    /// Stable string id used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::ZeroSentinel => "zero_sentinel",
            Self::Populated => "populated",
        }
    }

    /// Stable numeric code used across the FFI boundary.
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistrationSlot, SlotState};
    use crate::descriptor::ModuleDescriptor;

    #[test]
    fn zeroed_slot_snapshots_the_sentinel() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        assert!(SLOT.snapshot().is_zero());
    }

    #[test]
    fn publish_makes_the_full_copy_visible() {
        static SLOT: RegistrationSlot = RegistrationSlot::zeroed();
        let descriptor = ModuleDescriptor::new("sample", 4, &[]).expect("descriptor builds");

        unsafe { SLOT.publish(&descriptor) };

        assert_eq!(SLOT.snapshot(), descriptor);
    }

    #[test]
    fn state_codes_are_stable() {
        assert_eq!(SlotState::Uninitialized.code(), 0);
        assert_eq!(SlotState::ZeroSentinel.code(), 1);
        assert_eq!(SlotState::Populated.code(), 2);
        assert_eq!(SlotState::Populated.as_str(), "populated");
    }
}

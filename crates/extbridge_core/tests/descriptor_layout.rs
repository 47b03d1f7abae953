//! Layout locks for the binary symbol contract.
//!
//! The host loader reads the exported slot as raw descriptor bytes, so the
//! field order and sizes agreed with it must never drift.

use extbridge_core::{ModuleDescriptor, ModuleHook, RegistrationSlot, MODULE_HOOK_CAP, MODULE_NAME_CAP};
use std::mem::{align_of, offset_of, size_of};

fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) / align * align
}

#[test]
fn field_offsets_match_the_agreed_order() {
    assert_eq!(offset_of!(ModuleDescriptor, name), 0);
    assert_eq!(offset_of!(ModuleDescriptor, version), MODULE_NAME_CAP);
    assert_eq!(offset_of!(ModuleDescriptor, hook_count), MODULE_NAME_CAP + 4);

    let hooks_offset = align_up(MODULE_NAME_CAP + 8, align_of::<Option<ModuleHook>>());
    assert_eq!(offset_of!(ModuleDescriptor, hooks), hooks_offset);
}

#[test]
fn descriptor_size_is_exactly_the_agreed_layout() {
    let hooks_offset = align_up(MODULE_NAME_CAP + 8, align_of::<Option<ModuleHook>>());
    let end = hooks_offset + MODULE_HOOK_CAP * size_of::<Option<ModuleHook>>();
    assert_eq!(
        size_of::<ModuleDescriptor>(),
        align_up(end, align_of::<ModuleDescriptor>())
    );
}

#[test]
fn null_hook_entries_cost_nothing_extra() {
    // The hook table relies on the null-pointer niche: a null entry is
    // exactly a zero pointer in the exported bytes.
    assert_eq!(size_of::<Option<ModuleHook>>(), size_of::<ModuleHook>());
}

#[test]
fn slot_layout_is_transparent_over_the_descriptor() {
    assert_eq!(size_of::<RegistrationSlot>(), size_of::<ModuleDescriptor>());
    assert_eq!(align_of::<RegistrationSlot>(), align_of::<ModuleDescriptor>());
}

#[test]
fn zero_sentinel_is_all_zero_bytes() {
    let sentinel = ModuleDescriptor::ZERO;
    let bytes = unsafe {
        std::slice::from_raw_parts(
            (&sentinel as *const ModuleDescriptor).cast::<u8>(),
            size_of::<ModuleDescriptor>(),
        )
    };
    assert!(bytes.iter().all(|byte| *byte == 0));
}

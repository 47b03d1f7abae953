//! Descriptor resolver: thin lookup over the producer's factory.

use crate::descriptor::ModuleDescriptor;

/// Producer contract: a single entry point returning a pointer to a
/// descriptor, or null when the producer has nothing to offer.
///
/// The pointee only needs to stay valid for the duration of the call; the
/// resolver copies it by value immediately.
pub type DescriptorFactory = unsafe extern "C" fn() -> *const ModuleDescriptor;

/// Invokes `factory` once and copies its descriptor out by value.
///
/// Returns `None` when the factory reports absence via a null pointer. This
/// is a pure query: it never touches the registration slot.
pub fn resolve(factory: DescriptorFactory) -> Option<ModuleDescriptor> {
    // The producer contract guarantees the returned pointer is null or valid
    // for the duration of the call.
    let raw = unsafe { factory() };
    if raw.is_null() {
        return None;
    }
    Some(unsafe { *raw })
}

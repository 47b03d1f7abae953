//! Panic guards for exported `extern "C"` functions.
//!
//! A panic must never unwind across the C boundary; every export funnels
//! its body through [`guard_with_default`] and falls back to a value the
//! host can treat as an internal error.

use log::error;

/// Extracts a readable message from a panic payload.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "non-string panic payload".to_string()
}

/// Runs `f`, returning `default` if it panics.
pub(crate) fn guard_with_default<T>(op: &'static str, default: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            error!(
                "event=ffi_panic module=ffi status=error op={} payload={}",
                op,
                panic_message(payload)
            );
            default
        }
    }
}

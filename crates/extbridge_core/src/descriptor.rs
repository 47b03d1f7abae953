//! Module descriptor value type shared with the host loader.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Capacity of the descriptor name field, including the NUL terminator.
pub const MODULE_NAME_CAP: usize = 64;
/// Capacity of the descriptor hook table.
pub const MODULE_HOOK_CAP: usize = 16;

/// One lifecycle/command hook exposed through the descriptor's function
/// table. The host invokes hooks directly; the bridge never calls them.
pub type ModuleHook = unsafe extern "C" fn() -> i32;

/// Fixed-layout record describing one extension to the host loader.
///
/// Field order and sizes are a frozen binary contract with the host; they
/// are locked by the layout tests in `tests/descriptor_layout.rs`. The
/// all-zero value ([`ModuleDescriptor::ZERO`]) is the sentinel the host must
/// read as "no descriptor available". [`ModuleDescriptor::new`] rejects
/// empty names and zero versions, so a successfully constructed descriptor
/// never compares equal to the sentinel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// NUL-terminated UTF-8 extension name (at most `MODULE_NAME_CAP - 1`
    /// usable bytes).
    pub name: [u8; MODULE_NAME_CAP],
    /// Version/ABI tag agreed with the host.
    pub version: u32,
    /// Number of populated entries at the front of `hooks`.
    pub hook_count: u32,
    /// Hook table; entries at index `hook_count` and beyond are null.
    pub hooks: [Option<ModuleHook>; MODULE_HOOK_CAP],
}

impl ModuleDescriptor {
    /// The zero sentinel: every field of every entry is zero.
    pub const ZERO: Self = Self {
        name: [0u8; MODULE_NAME_CAP],
        version: 0,
        hook_count: 0,
        hooks: [None; MODULE_HOOK_CAP],
    };

    /// Builds a validated descriptor from owned parts.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to nothing.
    /// - `NameTooLong` when `name` exceeds `MODULE_NAME_CAP - 1` bytes.
    /// - `EmbeddedNul` when `name` contains an interior NUL byte.
    /// - `ZeroVersion` when `version` is `0` (reserved for the sentinel).
    /// - `TooManyHooks` when more than `MODULE_HOOK_CAP` hooks are given.
    pub fn new(name: &str, version: u32, hooks: &[ModuleHook]) -> Result<Self, DescriptorError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if trimmed.len() > MODULE_NAME_CAP - 1 {
            return Err(DescriptorError::NameTooLong(trimmed.len()));
        }
        if trimmed.bytes().any(|byte| byte == 0) {
            return Err(DescriptorError::EmbeddedNul);
        }
        if version == 0 {
            return Err(DescriptorError::ZeroVersion);
        }
        if hooks.len() > MODULE_HOOK_CAP {
            return Err(DescriptorError::TooManyHooks(hooks.len()));
        }

        let mut descriptor = Self::ZERO;
        descriptor.name[..trimmed.len()].copy_from_slice(trimmed.as_bytes());
        descriptor.version = version;
        descriptor.hook_count = hooks.len() as u32;
        for (entry, hook) in descriptor.hooks.iter_mut().zip(hooks) {
            *entry = Some(*hook);
        }
        Ok(descriptor)
    }

    /// Returns the name up to the first NUL terminator.
    ///
    /// Foreign producers are not forced through [`ModuleDescriptor::new`],
    /// so malformed UTF-8 degrades to an empty string instead of panicking.
    pub fn name(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(MODULE_NAME_CAP);
        std::str::from_utf8(&self.name[..end]).unwrap_or("")
    }

    /// Returns the populated front of the hook table.
    pub fn active_hooks(&self) -> &[Option<ModuleHook>] {
        let count = (self.hook_count as usize).min(MODULE_HOOK_CAP);
        &self.hooks[..count]
    }

    /// True when this value equals the zero sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Construction-time validation errors for [`ModuleDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorError {
    EmptyName,
    NameTooLong(usize),
    EmbeddedNul,
    ZeroVersion,
    TooManyHooks(usize),
}

impl Display for DescriptorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "descriptor name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "descriptor name is {len} bytes; at most {} fit the fixed layout",
                MODULE_NAME_CAP - 1
            ),
            Self::EmbeddedNul => write!(f, "descriptor name contains an interior NUL byte"),
            Self::ZeroVersion => write!(f, "descriptor version 0 is reserved for the sentinel"),
            Self::TooManyHooks(len) => write!(
                f,
                "descriptor declares {len} hooks; the fixed table holds {MODULE_HOOK_CAP}"
            ),
        }
    }
}

impl Error for DescriptorError {}

//! Secret strings kept in library memory.

use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;

use zeroize::Zeroizing;

use crate::Ots;
use crate::cstr::SecretCString;
use crate::error::OtsResult;
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::call;

/// A secret string (seed phrase, password) stored by the library and wiped
/// when freed.
///
/// There is no `Display` and `Debug` is redacted. [`WipeableString::reveal`]
/// is the only way to read the text.
pub struct WipeableString {
    handle: ForeignHandle,
}

impl WipeableString {
    /// Copy `text` into library owned secret storage.
    pub fn new(ots: &Ots, text: &str) -> OtsResult<Self> {
        let text = SecretCString::new(text)?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_wipeable_string_create(text.as_ptr())
        })?;
        Ok(WipeableString::from_handle(value.into_handle()))
    }

    /// # Panics
    ///
    /// If `handle` is not a wipeable string.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        WipeableString {
            handle: handle.expect_kind(HandleKind::WipeableString),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    /// Copy the secret out. The copy is wiped when dropped.
    pub fn reveal(&self) -> OtsResult<Zeroizing<String>> {
        let text = unsafe { self.handle.abi().ots_wipeable_string_c_str(self.handle.as_ptr()?) };
        assert!(!text.is_null(), "library returned a null string");
        let text = unsafe { CStr::from_ptr(text) };
        Ok(Zeroizing::new(text.to_str()?.to_owned()))
    }

    /// Compare two secrets inside the library without revealing either.
    pub fn compare(&self, other: &WipeableString) -> OtsResult<Ordering> {
        let abi = self.handle.abi();
        let value = call(abi, unsafe {
            abi.ots_wipeable_string_compare(self.handle.as_ptr()?, other.handle.as_ptr()?)
        })?;
        Ok(value.comparison())
    }

    pub fn equals(&self, other: &WipeableString) -> OtsResult<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }
}

impl fmt::Debug for WipeableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WipeableString(<redacted>)")
    }
}

#[cfg(test)]
#[path = "wipeable_string_tests.rs"]
mod tests;

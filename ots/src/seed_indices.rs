//! Seed word values.
//!
//! A seed phrase is a list of word indices. [`SeedIndices`] holds such a list
//! in library memory and combines lists with a self inverse merge (XOR of the
//! values), so `a.merge(&b)?.merge(&b)?` has the values of `a`. That is what
//! seed splitting and password offsets are built on.

use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;
use std::slice;

use tracing::debug;
use zeroize::Zeroizing;

use crate::Ots;
use crate::cstr::{SecretCString, cstring};
use crate::error::OtsResult;
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::{Abi, call};

pub struct SeedIndices {
    handle: ForeignHandle,
}

impl SeedIndices {
    pub fn new(ots: &Ots, values: &[u16]) -> OtsResult<Self> {
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_indices_create(values.as_ptr(), values.len())
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Parse four digit decimal values joined by `separator`.
    ///
    /// An empty separator means the values are concatenated.
    pub fn from_string(ots: &Ots, text: &str, separator: &str) -> OtsResult<Self> {
        let (text, separator) = (SecretCString::new(text)?, cstring(separator)?);
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_indices_create_from_string(text.as_ptr(), separator.as_ptr())
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Parse four digit hex values joined by `separator`.
    pub fn from_hex(ots: &Ots, hex: &str, separator: &str) -> OtsResult<Self> {
        let (hex, separator) = (SecretCString::new(hex)?, cstring(separator)?);
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_indices_create_from_hex(hex.as_ptr(), separator.as_ptr())
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// # Panics
    ///
    /// If `handle` is not a seed indices handle.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        SeedIndices {
            handle: handle.expect_kind(HandleKind::SeedIndices),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    fn abi(&self) -> &Abi {
        self.handle.abi()
    }

    pub fn values(&self) -> OtsResult<Zeroizing<Vec<u16>>> {
        let handle = self.handle.as_ptr()?;
        unsafe {
            let count = self.abi().ots_seed_indices_count(handle);
            let values = self.abi().ots_seed_indices_values(handle);
            if count == 0 || values.is_null() {
                return Ok(Zeroizing::new(Vec::new()));
            }
            Ok(Zeroizing::new(slice::from_raw_parts(values, count).to_vec()))
        }
    }

    pub fn len(&self) -> OtsResult<usize> {
        Ok(unsafe { self.abi().ots_seed_indices_count(self.handle.as_ptr()?) })
    }

    pub fn is_empty(&self) -> OtsResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Wipe and remove every value.
    pub fn clear(&self) -> OtsResult<()> {
        unsafe { self.abi().ots_seed_indices_clear(self.handle.as_ptr()?) };
        Ok(())
    }

    pub fn append(&self, value: u16) -> OtsResult<()> {
        unsafe { self.abi().ots_seed_indices_append(self.handle.as_ptr()?, value) };
        Ok(())
    }

    /// Four digit decimal values joined by `separator`.
    pub fn numeric(&self, separator: &str) -> OtsResult<Zeroizing<String>> {
        let separator = cstring(separator)?;
        let text = unsafe {
            self.abi().ots_seed_indices_numeric(self.handle.as_ptr()?, separator.as_ptr())
        };
        self.take_string(text)
    }

    /// Four digit hex values joined by `separator`.
    pub fn hex(&self, separator: &str) -> OtsResult<Zeroizing<String>> {
        let separator = cstring(separator)?;
        let text = unsafe {
            self.abi().ots_seed_indices_hex(self.handle.as_ptr()?, separator.as_ptr())
        };
        self.take_string(text)
    }

    /// Copy out and free a string the library allocated for us.
    fn take_string(&self, mut text: *mut c_char) -> OtsResult<Zeroizing<String>> {
        assert!(!text.is_null(), "library returned a null string");
        let copied = std::str::from_utf8(unsafe { CStr::from_ptr(text) }.to_bytes())
            .map(|s| Zeroizing::new(s.to_owned()));
        unsafe { self.abi().ots_free_string(&mut text) };
        Ok(copied?)
    }

    /// Element wise merge with a list of the same length.
    pub fn merge(&self, other: &SeedIndices) -> OtsResult<SeedIndices> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_indices_merge_values(self.handle.as_ptr()?, other.handle.as_ptr()?)
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Merge with values derived from `password`.
    pub fn merge_with_password(&self, password: &str) -> OtsResult<SeedIndices> {
        let password = SecretCString::new(password)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_indices_merge_with_password(
                self.handle.as_ptr()?,
                password.as_ptr(),
            )
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Merge two or more lists of `elements` values each.
    pub fn merge_multiple(
        ots: &Ots,
        lists: &[&SeedIndices],
        elements: usize,
    ) -> OtsResult<SeedIndices> {
        let handles = lists.iter().map(|l| l.handle.as_ptr()).collect::<OtsResult<Vec<_>>>()?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_indices_merge_multiple_values(
                handles.as_ptr(),
                elements,
                handles.len(),
            )
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Like [`SeedIndices::merge`], wiping both inputs.
    pub fn merge_and_zero(self, other: SeedIndices) -> OtsResult<SeedIndices> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_indices_merge_values_and_zero(
                self.handle.as_ptr()?,
                other.handle.as_ptr()?,
                false,
            )
        })?;
        debug!("merged and wiped 2 seed indices");
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Like [`SeedIndices::merge_with_password`], wiping the input.
    pub fn merge_with_password_and_zero(self, password: &str) -> OtsResult<SeedIndices> {
        let password = SecretCString::new(password)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_indices_merge_with_password_and_zero(
                self.handle.as_ptr()?,
                password.as_ptr(),
                false,
            )
        })?;
        debug!("merged and wiped seed indices with a password");
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    /// Like [`SeedIndices::merge_multiple`], wiping every input.
    pub fn merge_multiple_and_zero(
        ots: &Ots,
        lists: Vec<SeedIndices>,
        elements: usize,
    ) -> OtsResult<SeedIndices> {
        let handles = lists.iter().map(|l| l.handle.as_ptr()).collect::<OtsResult<Vec<_>>>()?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_indices_merge_multiple_values_and_zero(
                handles.as_ptr(),
                elements,
                handles.len(),
                false,
            )
        })?;
        debug!(count = lists.len(), "merged and wiped seed indices");
        Ok(SeedIndices::from_handle(value.into_handle()))
    }
}

impl fmt::Debug for SeedIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SeedIndices(<redacted>)")
    }
}

#[cfg(test)]
#[path = "seed_indices_tests.rs"]
mod tests;

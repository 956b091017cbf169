//! Seed phrase languages.
//!
//! Languages are static objects inside the library, so every [`SeedLanguage`]
//! is a borrowed view.

use std::fmt;

use crate::Ots;
use crate::cstr::cstring;
use crate::error::OtsResult;
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::{Abi, call};
use crate::types::SeedType;

pub struct SeedLanguage {
    handle: ForeignHandle,
}

impl SeedLanguage {
    /// # Panics
    ///
    /// If `handle` is not a seed language.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        SeedLanguage {
            handle: handle.expect_kind(HandleKind::SeedLanguage),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    fn abi(&self) -> &Abi {
        self.handle.abi()
    }

    fn list(value: crate::result::ResultValue) -> Vec<SeedLanguage> {
        value.into_handles().into_iter().map(SeedLanguage::from_handle).collect()
    }

    pub fn all(ots: &Ots) -> OtsResult<Vec<SeedLanguage>> {
        let value = call(ots.abi(), unsafe { ots.abi().ots_seed_languages() })?;
        Ok(Self::list(value))
    }

    /// Languages that can encode seeds of `seed_type`.
    pub fn for_type(ots: &Ots, seed_type: SeedType) -> OtsResult<Vec<SeedLanguage>> {
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_languages_for_type(seed_type.to_raw())
        })?;
        Ok(Self::list(value))
    }

    pub fn default_for(ots: &Ots, seed_type: SeedType) -> OtsResult<SeedLanguage> {
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_language_default(seed_type.to_raw())
        })?;
        Ok(SeedLanguage::from_handle(value.into_handle()))
    }

    /// Make this language the default for `seed_type`.
    pub fn set_default(&self, seed_type: SeedType) -> OtsResult<()> {
        call(self.abi(), unsafe {
            self.abi().ots_seed_language_set_default(seed_type.to_raw(), self.handle.as_ptr()?)
        })?;
        Ok(())
    }

    pub fn from_code(ots: &Ots, code: &str) -> OtsResult<SeedLanguage> {
        let code = cstring(code)?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_language_from_code(code.as_ptr())
        })?;
        Ok(SeedLanguage::from_handle(value.into_handle()))
    }

    pub fn from_name(ots: &Ots, name: &str) -> OtsResult<SeedLanguage> {
        let name = cstring(name)?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_language_from_name(name.as_ptr())
        })?;
        Ok(SeedLanguage::from_handle(value.into_handle()))
    }

    pub fn from_english_name(ots: &Ots, name: &str) -> OtsResult<SeedLanguage> {
        let name = cstring(name)?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_seed_language_from_english_name(name.as_ptr())
        })?;
        Ok(SeedLanguage::from_handle(value.into_handle()))
    }

    pub fn code(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_seed_language_code(self.handle.as_ptr()?)
        })?
        .string()
    }

    /// Name in the language itself.
    pub fn name(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_seed_language_name(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn english_name(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_seed_language_english_name(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn supports(&self, seed_type: SeedType) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_language_supported(self.handle.as_ptr()?, seed_type.to_raw())
        })?;
        Ok(value.boolean())
    }

    pub fn is_default_for(&self, seed_type: SeedType) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_language_is_default(self.handle.as_ptr()?, seed_type.to_raw())
        })?;
        Ok(value.boolean())
    }

    pub fn equals(&self, other: &SeedLanguage) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_language_equals(self.handle.as_ptr()?, other.handle.as_ptr()?)
        })?;
        Ok(value.boolean())
    }

    pub fn equals_code(&self, code: &str) -> OtsResult<bool> {
        let code = cstring(code)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_language_equals_code(self.handle.as_ptr()?, code.as_ptr())
        })?;
        Ok(value.boolean())
    }
}

impl fmt::Debug for SeedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Ok(code) => write!(f, "SeedLanguage({})", code),
            Err(_) => f.write_str("SeedLanguage(?)"),
        }
    }
}

#[cfg(test)]
#[path = "seed_language_tests.rs"]
mod tests;

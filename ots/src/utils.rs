//! Library wide utilities and settings, exposed on [`Ots`].

use std::os::raw::c_char;

use tracing::debug;
use zeroize::Zeroizing;

use crate::Ots;
use crate::cstr::cstring;
use crate::error::{OtsError, OtsResult};
use crate::result::call;
use crate::types::Network;

impl Ots {
    /// Version string of the library.
    pub fn version(&self) -> OtsResult<String> {
        call(self.abi(), unsafe { self.abi().ots_version() })?.string()
    }

    /// `(major, minor, patch)` of the library.
    pub fn version_components(&self) -> OtsResult<(u32, u32, u32)> {
        let parts = call(self.abi(), unsafe { self.abi().ots_version_components() })?.ints();
        match parts.as_slice() {
            [major, minor, patch, ..] => Ok((*major as u32, *minor as u32, *patch as u32)),
            _ => panic!("library returned {} version components", parts.len()),
        }
    }

    /// Block height at `timestamp` (seconds since the epoch), estimated from
    /// the target block time.
    pub fn height_from_timestamp(&self, timestamp: u64, network: Network) -> OtsResult<u64> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_height_from_timestamp(timestamp, network.to_raw())
        })?
        .unsigned())
    }

    pub fn timestamp_from_height(&self, height: u64, network: Network) -> OtsResult<u64> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_timestamp_from_height(height, network.to_raw())
        })?
        .unsigned())
    }

    /// `size` bytes from the library's random source.
    ///
    /// While entropy is enforced, a draw below the required level fails.
    pub fn random_bytes(&self, size: usize) -> OtsResult<Zeroizing<Vec<u8>>> {
        Ok(call(self.abi(), unsafe { self.abi().ots_random_bytes(size) })?.secret_bytes())
    }

    pub fn random_32(&self) -> OtsResult<Zeroizing<[u8; 32]>> {
        let bytes = call(self.abi(), unsafe { self.abi().ots_random_32() })?.secret_bytes();
        let mut out = Zeroizing::new([0u8; 32]);
        if bytes.len() != out.len() {
            return Err(OtsError::InvalidArgument(format!(
                "expected 32 random bytes, got {}",
                bytes.len()
            )));
        }
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Whether `data` has less than `min_entropy` bits of entropy per byte.
    pub fn check_low_entropy(&self, data: &[u8], min_entropy: f64) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_check_low_entropy(data.as_ptr(), data.len(), min_entropy)
        })?;
        Ok(value.boolean())
    }

    /// Shannon entropy of `data` in bits per byte.
    pub fn entropy_level(&self, data: &[u8]) -> OtsResult<f64> {
        let text = call(self.abi(), unsafe {
            self.abi().ots_entropy_level(data.as_ptr(), data.len())
        })?
        .string()?;
        text.trim()
            .parse()
            .map_err(|_| OtsError::InvalidArgument(format!(
                "library returned a non numeric entropy level {:?}",
                text
            )))
    }

    pub fn set_enforce_entropy(&self, enforce: bool) {
        unsafe { self.abi().ots_set_enforce_entropy(enforce) };
        debug!(enforce, "set entropy enforcement");
    }

    pub fn set_enforce_entropy_level(&self, level: f64) {
        unsafe { self.abi().ots_set_enforce_entropy_level(level) };
        debug!(level, "set enforced entropy level");
    }

    /// How many accounts address searches scan by default.
    pub fn set_max_account_depth(&self, depth: u32) {
        unsafe { self.abi().ots_set_max_account_depth(depth) };
    }

    /// How many subaddresses per account address searches scan by default.
    pub fn set_max_index_depth(&self, depth: u32) {
        unsafe { self.abi().ots_set_max_index_depth(depth) };
    }

    pub fn set_max_depth(&self, account_depth: u32, index_depth: u32) {
        unsafe { self.abi().ots_set_max_depth(account_depth, index_depth) };
        debug!(account_depth, index_depth, "set address search depth");
    }

    /// Restore the library's default search depths.
    pub fn reset_max_depth(&self) {
        unsafe { self.abi().ots_reset_max_depth() };
    }

    pub fn max_account_depth(&self) -> u32 {
        unsafe { self.abi().ots_get_max_account_depth(0) }
    }

    pub fn max_index_depth(&self) -> u32 {
        unsafe { self.abi().ots_get_max_index_depth(0) }
    }

    /// Check a message signature against `address` without a wallet.
    pub fn verify_data(&self, data: &[u8], address: &str, signature: &str) -> OtsResult<bool> {
        let (address, signature) = (cstring(address)?, cstring(signature)?);
        let value = call(self.abi(), unsafe {
            self.abi().ots_verify_data(
                data.as_ptr() as *const c_char,
                data.len(),
                address.as_ptr(),
                signature.as_ptr(),
            )
        })?;
        Ok(value.boolean())
    }
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;

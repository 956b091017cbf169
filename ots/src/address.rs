//! Monero addresses.

use std::fmt;

use crate::Ots;
use crate::cstr::cstring;
use crate::error::OtsResult;
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::{Abi, call};
use crate::types::{AddressType, Network};

pub struct Address {
    handle: ForeignHandle,
}

impl Address {
    /// Parse an address.
    ///
    /// Fails with the library's diagnostic for malformed input.
    pub fn new(ots: &Ots, address: &str) -> OtsResult<Self> {
        let address = cstring(address)?;
        let value = call(ots.abi(), unsafe { ots.abi().ots_address_create(address.as_ptr()) })?;
        Ok(Address::from_handle(value.into_handle()))
    }

    /// # Panics
    ///
    /// If `handle` is not an address.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        Address {
            handle: handle.expect_kind(HandleKind::Address),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    fn abi(&self) -> &Abi {
        self.handle.abi()
    }

    pub fn address_type(&self) -> OtsResult<AddressType> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_address_type(self.handle.as_ptr()?)
        })?
        .address_type())
    }

    pub fn network(&self) -> OtsResult<Network> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_address_network(self.handle.as_ptr()?)
        })?
        .network())
    }

    /// Short identifier of the address.
    pub fn fingerprint(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_address_fingerprint(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn is_integrated(&self) -> OtsResult<bool> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_address_is_integrated(self.handle.as_ptr()?)
        })?
        .boolean())
    }

    /// Payment id of an integrated address, empty otherwise.
    pub fn payment_id(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_address_payment_id(self.handle.as_ptr()?)
        })?
        .string()
    }

    /// Standard address an integrated address was built from.
    pub fn base_address(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_address_from_integrated(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn len(&self) -> OtsResult<usize> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_address_length(self.handle.as_ptr()?)
        })?;
        Ok(value.unsigned() as usize)
    }

    pub fn is_empty(&self) -> OtsResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn to_base58(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_address_base58_string(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn equals(&self, other: &Address) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_address_equal(self.handle.as_ptr()?, other.handle.as_ptr()?)
        })?;
        Ok(value.boolean())
    }

    pub fn equals_str(&self, other: &str) -> OtsResult<bool> {
        let other = cstring(other)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_address_equal_string(self.handle.as_ptr()?, other.as_ptr())
        })?;
        Ok(value.boolean())
    }

    /// Whether `address` is a valid address on `network`.
    pub fn is_valid(ots: &Ots, address: &str, network: Network) -> OtsResult<bool> {
        let address = cstring(address)?;
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_address_string_valid(address.as_ptr(), network.to_raw())
        })?;
        Ok(value.boolean())
    }

    pub fn network_of(ots: &Ots, address: &str) -> OtsResult<Network> {
        let address = cstring(address)?;
        Ok(call(ots.abi(), unsafe {
            ots.abi().ots_address_string_network(address.as_ptr())
        })?
        .network())
    }

    pub fn type_of(ots: &Ots, address: &str) -> OtsResult<AddressType> {
        let address = cstring(address)?;
        Ok(call(ots.abi(), unsafe {
            ots.abi().ots_address_string_type(address.as_ptr())
        })?
        .address_type())
    }

    pub fn fingerprint_of(ots: &Ots, address: &str) -> OtsResult<String> {
        let address = cstring(address)?;
        call(ots.abi(), unsafe {
            ots.abi().ots_address_string_fingerprint(address.as_ptr())
        })?
        .string()
    }

    pub fn is_integrated_str(ots: &Ots, address: &str) -> OtsResult<bool> {
        let address = cstring(address)?;
        Ok(call(ots.abi(), unsafe {
            ots.abi().ots_address_string_is_integrated(address.as_ptr())
        })?
        .boolean())
    }

    pub fn payment_id_of(ots: &Ots, address: &str) -> OtsResult<String> {
        let address = cstring(address)?;
        call(ots.abi(), unsafe {
            ots.abi().ots_address_string_payment_id(address.as_ptr())
        })?
        .string()
    }

    /// Standard address behind an integrated address string.
    pub fn integrated_of(ots: &Ots, address: &str) -> OtsResult<String> {
        let address = cstring(address)?;
        call(ots.abi(), unsafe {
            ots.abi().ots_address_string_integrated(address.as_ptr())
        })?
        .string()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_base58() {
            Ok(text) => write!(f, "Address({})", text),
            Err(_) => f.write_str("Address(?)"),
        }
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;

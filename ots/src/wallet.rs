//! Wallets: keys, addresses, transaction and message signing.

use std::fmt;
use std::os::raw::c_char;

use tracing::debug;
use zeroize::Zeroizing;

use crate::Ots;
use crate::address::Address;
use crate::cstr::cstring;
use crate::error::{OtsError, OtsResult};
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::{Abi, call};
use crate::transaction::{TxDescription, TxWarning};
use crate::types::{AddressIndex, Network};

/// Length of the spend key [`Wallet::new`] takes.
pub const WALLET_KEY_BYTES: usize = 32;

pub struct Wallet {
    handle: ForeignHandle,
}

fn data_ptr(data: &[u8]) -> *const c_char {
    data.as_ptr() as *const c_char
}

fn addresses(value: crate::result::ResultValue) -> Vec<Address> {
    value.into_handles().into_iter().map(Address::from_handle).collect()
}

impl Wallet {
    /// Wallet from a 32 byte secret spend key.
    pub fn new(ots: &Ots, key: &[u8], height: u64, network: Network) -> OtsResult<Self> {
        if key.len() != WALLET_KEY_BYTES {
            return Err(OtsError::InvalidArgument(format!(
                "expected a {} byte key, got {}",
                WALLET_KEY_BYTES,
                key.len()
            )));
        }
        let value = call(ots.abi(), unsafe {
            ots.abi().ots_wallet_create(key.as_ptr(), height, network.to_raw())
        })?;
        Ok(Wallet::from_handle(value.into_handle()))
    }

    /// # Panics
    ///
    /// If `handle` is not a wallet.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        Wallet {
            handle: handle.expect_kind(HandleKind::Wallet),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    fn abi(&self) -> &Abi {
        self.handle.abi()
    }

    pub fn height(&self) -> OtsResult<u64> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_wallet_height(self.handle.as_ptr()?)
        })?
        .unsigned())
    }

    /// Primary address.
    pub fn address(&self) -> OtsResult<Address> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_address(self.handle.as_ptr()?)
        })?;
        Ok(Address::from_handle(value.into_handle()))
    }

    pub fn subaddress(&self, account: u32, index: u32) -> OtsResult<Address> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_subaddress(self.handle.as_ptr()?, account, index)
        })?;
        Ok(Address::from_handle(value.into_handle()))
    }

    /// Main addresses of accounts `offset..offset + max`.
    pub fn accounts(&self, max: u32, offset: u32) -> OtsResult<Vec<Address>> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_accounts(self.handle.as_ptr()?, max, offset)
        })?;
        Ok(addresses(value))
    }

    /// Subaddresses `offset..offset + max` of `account`.
    pub fn subaddresses(&self, account: u32, max: u32, offset: u32) -> OtsResult<Vec<Address>> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_subaddresses(self.handle.as_ptr()?, account, max, offset)
        })?;
        Ok(addresses(value))
    }

    /// Whether `address` belongs to this wallet within the given search
    /// depths. A depth of 0 uses the library default.
    pub fn has_address(
        &self,
        address: &Address,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> OtsResult<bool> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_has_address(
                self.handle.as_ptr()?,
                address.handle().as_ptr()?,
                max_account_depth,
                max_index_depth,
            )
        })?;
        Ok(value.boolean())
    }

    pub fn has_address_str(
        &self,
        address: &str,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> OtsResult<bool> {
        let address = cstring(address)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_has_address_string(
                self.handle.as_ptr()?,
                address.as_ptr(),
                max_account_depth,
                max_index_depth,
            )
        })?;
        Ok(value.boolean())
    }

    /// Account and index `address` was derived at.
    pub fn address_index(
        &self,
        address: &Address,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> OtsResult<AddressIndex> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_address_index(
                self.handle.as_ptr()?,
                address.handle().as_ptr()?,
                max_account_depth,
                max_index_depth,
            )
        })?;
        Ok(value.address_index())
    }

    pub fn address_index_str(
        &self,
        address: &str,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> OtsResult<AddressIndex> {
        let address = cstring(address)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_address_string_index(
                self.handle.as_ptr()?,
                address.as_ptr(),
                max_account_depth,
                max_index_depth,
            )
        })?;
        Ok(value.address_index())
    }

    // Keys

    pub fn secret_view_key(&self) -> OtsResult<Zeroizing<String>> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_secret_view_key(self.handle.as_ptr()?)
        })?
        .secret_string()
    }

    pub fn public_view_key(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_public_view_key(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn secret_spend_key(&self) -> OtsResult<Zeroizing<String>> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_secret_spend_key(self.handle.as_ptr()?)
        })?
        .secret_string()
    }

    pub fn public_spend_key(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_public_spend_key(self.handle.as_ptr()?)
        })?
        .string()
    }

    // Offline signing

    /// Import outputs exported by a view only wallet. Returns how many were
    /// imported.
    pub fn import_outputs(&self, outputs: &[u8]) -> OtsResult<u64> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_import_outputs(
                self.handle.as_ptr()?,
                data_ptr(outputs),
                outputs.len(),
            )
        })?;
        debug!(bytes = outputs.len(), "imported outputs");
        Ok(value.unsigned())
    }

    pub fn export_key_images(&self) -> OtsResult<Vec<u8>> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_wallet_export_key_images(self.handle.as_ptr()?)
        })?
        .bytes())
    }

    pub fn describe_tx(&self, unsigned_tx: &[u8]) -> OtsResult<TxDescription> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_describe_tx(
                self.handle.as_ptr()?,
                data_ptr(unsigned_tx),
                unsigned_tx.len(),
            )
        })?;
        TxDescription::from_handle(value.into_handle())
    }

    /// Warnings the library raises for an unsigned transaction set.
    ///
    /// The set is validated like [`describe_tx`](Self::describe_tx) does.
    pub fn check_tx(&self, unsigned_tx: &[u8]) -> OtsResult<Vec<TxWarning>> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_check_tx_string(
                self.handle.as_ptr()?,
                data_ptr(unsigned_tx),
                unsigned_tx.len(),
            )
        })?;
        TxWarning::from_handles(value.into_handles())
    }

    /// Describe an unsigned transaction set and check the description for
    /// warnings, parsing the set once.
    pub fn describe_and_check_tx(
        &self,
        unsigned_tx: &[u8],
    ) -> OtsResult<(TxDescription, Vec<TxWarning>)> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_describe_tx(
                self.handle.as_ptr()?,
                data_ptr(unsigned_tx),
                unsigned_tx.len(),
            )
        })?;
        let description = value.into_handle().expect_kind(HandleKind::TxDescription);
        let checked = call(self.abi(), unsafe {
            self.abi().ots_wallet_check_tx(self.handle.as_ptr()?, description.as_ptr()?)
        })?;
        let warnings = TxWarning::from_handles(checked.into_handles())?;
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "transaction raised warnings");
        }
        Ok((TxDescription::read(&description)?, warnings))
    }

    /// Sign an unsigned transaction set, returning the signed set.
    pub fn sign_transaction(&self, unsigned_tx: &[u8]) -> OtsResult<Vec<u8>> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_sign_transaction(
                self.handle.as_ptr()?,
                data_ptr(unsigned_tx),
                unsigned_tx.len(),
            )
        })?;
        debug!(bytes = unsigned_tx.len(), "signed transaction");
        Ok(value.bytes())
    }

    // Message signing

    /// Sign `data` with the primary address.
    pub fn sign_data(&self, data: &[u8]) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_sign_data(self.handle.as_ptr()?, data_ptr(data), data.len())
        })?
            .string()
    }

    pub fn sign_data_with_index(&self, data: &[u8], account: u32, index: u32) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_wallet_sign_data_with_index(
                self.handle.as_ptr()?,
                data_ptr(data),
                data.len(),
                account,
                index,
            )
        })?
        .string()
    }

    /// Sign with one of this wallet's addresses.
    pub fn sign_data_with_address(&self, data: &[u8], address: &str) -> OtsResult<String> {
        let address = cstring(address)?;
        call(self.abi(), unsafe {
            self.abi().ots_wallet_sign_data_with_address_string(
                self.handle.as_ptr()?,
                data_ptr(data),
                data.len(),
                address.as_ptr(),
            )
        })?
        .string()
    }

    /// Check a signature made with the primary address.
    ///
    /// With `legacy_fallback` older signature versions are accepted too.
    pub fn verify_data(
        &self,
        data: &[u8],
        signature: &str,
        legacy_fallback: bool,
    ) -> OtsResult<bool> {
        let signature = cstring(signature)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_verify_data(
                self.handle.as_ptr()?,
                data_ptr(data),
                data.len(),
                signature.as_ptr(),
                legacy_fallback,
            )
        })?;
        Ok(value.boolean())
    }

    pub fn verify_data_with_index(
        &self,
        data: &[u8],
        account: u32,
        index: u32,
        signature: &str,
        legacy_fallback: bool,
    ) -> OtsResult<bool> {
        let signature = cstring(signature)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_verify_data_with_index(
                self.handle.as_ptr()?,
                data_ptr(data),
                data.len(),
                account,
                index,
                signature.as_ptr(),
                legacy_fallback,
            )
        })?;
        Ok(value.boolean())
    }

    pub fn verify_data_with_address(
        &self,
        data: &[u8],
        address: &str,
        signature: &str,
        legacy_fallback: bool,
    ) -> OtsResult<bool> {
        let (address, signature) = (cstring(address)?, cstring(signature)?);
        let value = call(self.abi(), unsafe {
            self.abi().ots_wallet_verify_data_with_address_string(
                self.handle.as_ptr()?,
                data_ptr(data),
                data.len(),
                address.as_ptr(),
                signature.as_ptr(),
                legacy_fallback,
            )
        })?;
        Ok(value.boolean())
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
#[path = "wallet_tests.rs"]
mod tests;

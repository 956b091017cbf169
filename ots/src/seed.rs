//! Decrypted seeds.
//!
//! A [`Seed`] either owns its library object or is a view of a seed held by
//! the [`SeedJar`](crate::SeedJar). Jar views stop working, with
//! [`OtsError::StaleReference`](crate::OtsError::StaleReference), once their
//! entry leaves the jar.

use std::fmt;

use crate::Ots;
use crate::address::Address;
use crate::cstr::{SecretCString, cstring};
use crate::error::{OtsError, OtsResult};
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::{Abi, ResultValue, call};
use crate::seed_indices::SeedIndices;
use crate::seed_language::SeedLanguage;
use crate::types::{Network, SeedType};
use crate::wallet::Wallet;
use crate::wipeable_string::WipeableString;

/// Random input length of [`Seed::monero_create`].
pub const MONERO_RANDOM_BYTES: usize = 32;
/// Random input length of [`Seed::polyseed_create`].
pub const POLYSEED_RANDOM_BYTES: usize = 19;

pub struct Seed {
    handle: ForeignHandle,
}

fn seed(value: ResultValue) -> Seed {
    Seed::from_handle(value.into_handle())
}

fn check_random(random: &[u8], expected: usize) -> OtsResult<()> {
    if random.len() != expected {
        return Err(OtsError::InvalidArgument(format!(
            "expected {} random bytes, got {}",
            expected,
            random.len()
        )));
    }
    Ok(())
}

impl Seed {
    /// # Panics
    ///
    /// If `handle` is not a seed.
    pub fn from_handle(handle: ForeignHandle) -> Self {
        Seed {
            handle: handle.expect_kind(HandleKind::Seed),
        }
    }

    pub fn handle(&self) -> &ForeignHandle {
        &self.handle
    }

    pub(crate) fn handle_mut(&mut self) -> &mut ForeignHandle {
        &mut self.handle
    }

    pub(crate) fn into_handle(self) -> ForeignHandle {
        self.handle
    }

    /// Whether this is a view of a seed held by the jar.
    pub fn is_borrowed(&self) -> bool {
        self.handle.is_borrowed()
    }

    fn abi(&self) -> &Abi {
        self.handle.abi()
    }

    // Monero seeds

    /// Monero seed from 32 bytes of caller supplied randomness.
    pub fn monero_create(
        ots: &Ots,
        random: &[u8],
        height: u64,
        time: u64,
        network: Network,
    ) -> OtsResult<Seed> {
        check_random(random, MONERO_RANDOM_BYTES)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_monero_seed_create(random.as_ptr(), height, time, network.to_raw())
        })?))
    }

    pub fn monero_generate(ots: &Ots, height: u64, time: u64, network: Network) -> OtsResult<Seed> {
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_monero_seed_generate(height, time, network.to_raw())
        })?))
    }

    pub fn monero_decode(
        ots: &Ots,
        phrase: &str,
        height: u64,
        time: u64,
        network: Network,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let (phrase, passphrase) = (SecretCString::new(phrase)?, SecretCString::new(passphrase)?);
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_monero_seed_decode(
                phrase.as_ptr(),
                height,
                time,
                network.to_raw(),
                passphrase.as_ptr(),
            )
        })?))
    }

    pub fn monero_decode_indices(
        ots: &Ots,
        indices: &SeedIndices,
        height: u64,
        time: u64,
        network: Network,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_monero_seed_decode_indices(
                indices.handle().as_ptr()?,
                height,
                time,
                network.to_raw(),
                passphrase.as_ptr(),
            )
        })?))
    }

    /// Decode a 13 word legacy (MyMonero) seed.
    pub fn legacy_decode(
        ots: &Ots,
        phrase: &str,
        height: u64,
        time: u64,
        network: Network,
    ) -> OtsResult<Seed> {
        let phrase = SecretCString::new(phrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_legacy_seed_decode(phrase.as_ptr(), height, time, network.to_raw())
        })?))
    }

    pub fn legacy_decode_indices(
        ots: &Ots,
        indices: &SeedIndices,
        height: u64,
        time: u64,
        network: Network,
    ) -> OtsResult<Seed> {
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_legacy_seed_decode_indices(
                indices.handle().as_ptr()?,
                height,
                time,
                network.to_raw(),
            )
        })?))
    }

    // Polyseeds

    /// Polyseed from 19 bytes of caller supplied randomness.
    pub fn polyseed_create(
        ots: &Ots,
        random: &[u8],
        network: Network,
        time: u64,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        check_random(random, POLYSEED_RANDOM_BYTES)?;
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_create(random.as_ptr(), network.to_raw(), time, passphrase.as_ptr())
        })?))
    }

    pub fn polyseed_generate(
        ots: &Ots,
        network: Network,
        time: u64,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_generate(network.to_raw(), time, passphrase.as_ptr())
        })?))
    }

    pub fn polyseed_decode(
        ots: &Ots,
        phrase: &str,
        network: Network,
        password: &str,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let phrase = SecretCString::new(phrase)?;
        let password = SecretCString::new(password)?;
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_decode(
                phrase.as_ptr(),
                network.to_raw(),
                password.as_ptr(),
                passphrase.as_ptr(),
            )
        })?))
    }

    pub fn polyseed_decode_indices(
        ots: &Ots,
        indices: &SeedIndices,
        network: Network,
        password: &str,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let password = SecretCString::new(password)?;
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_decode_indices(
                indices.handle().as_ptr()?,
                network.to_raw(),
                password.as_ptr(),
                passphrase.as_ptr(),
            )
        })?))
    }

    pub fn polyseed_decode_with_language(
        ots: &Ots,
        phrase: &str,
        language: &SeedLanguage,
        network: Network,
        password: &str,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let phrase = SecretCString::new(phrase)?;
        let password = SecretCString::new(password)?;
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_decode_with_language(
                phrase.as_ptr(),
                language.handle().as_ptr()?,
                network.to_raw(),
                password.as_ptr(),
                passphrase.as_ptr(),
            )
        })?))
    }

    pub fn polyseed_decode_with_language_code(
        ots: &Ots,
        phrase: &str,
        language_code: &str,
        network: Network,
        password: &str,
        passphrase: &str,
    ) -> OtsResult<Seed> {
        let phrase = SecretCString::new(phrase)?;
        let code = cstring(language_code)?;
        let password = SecretCString::new(password)?;
        let passphrase = SecretCString::new(passphrase)?;
        let abi = ots.abi();
        Ok(seed(call(abi, unsafe {
            abi.ots_polyseed_decode_with_language_code(
                phrase.as_ptr(),
                code.as_ptr(),
                network.to_raw(),
                password.as_ptr(),
                passphrase.as_ptr(),
            )
        })?))
    }

    /// Monero seed with the same keys as this polyseed.
    pub fn convert_to_monero(&self) -> OtsResult<Seed> {
        Ok(seed(call(self.abi(), unsafe {
            self.abi().ots_polyseed_convert_to_monero_seed(self.handle.as_ptr()?)
        })?))
    }

    // Accessors

    /// Phrase in `language`, optionally offset by `password`.
    pub fn phrase(&self, language: &SeedLanguage, password: &str) -> OtsResult<WipeableString> {
        let password = SecretCString::new(password)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_phrase(
                self.handle.as_ptr()?,
                language.handle().as_ptr()?,
                password.as_ptr(),
            )
        })?;
        Ok(WipeableString::from_handle(value.into_handle()))
    }

    pub fn phrase_for_language_code(
        &self,
        language_code: &str,
        password: &str,
    ) -> OtsResult<WipeableString> {
        let code = cstring(language_code)?;
        let password = SecretCString::new(password)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_phrase_for_language_code(
                self.handle.as_ptr()?,
                code.as_ptr(),
                password.as_ptr(),
            )
        })?;
        Ok(WipeableString::from_handle(value.into_handle()))
    }

    pub fn indices(&self, password: &str) -> OtsResult<SeedIndices> {
        let password = SecretCString::new(password)?;
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_indices(self.handle.as_ptr()?, password.as_ptr())
        })?;
        Ok(SeedIndices::from_handle(value.into_handle()))
    }

    pub fn fingerprint(&self) -> OtsResult<String> {
        call(self.abi(), unsafe {
            self.abi().ots_seed_fingerprint(self.handle.as_ptr()?)
        })?
        .string()
    }

    pub fn is_legacy(&self) -> OtsResult<bool> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_seed_is_legacy(self.handle.as_ptr()?)
        })?
        .boolean())
    }

    pub fn seed_type(&self) -> OtsResult<SeedType> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_seed_type(self.handle.as_ptr()?)
        })?
        .seed_type())
    }

    /// Standard address of the seed's wallet.
    pub fn address(&self) -> OtsResult<Address> {
        let value = call(self.abi(), unsafe {
            self.abi().ots_seed_address(self.handle.as_ptr()?)
        })?;
        Ok(Address::from_handle(value.into_handle().inherit_lease(&self.handle)))
    }

    pub fn timestamp(&self) -> OtsResult<u64> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_seed_timestamp(self.handle.as_ptr()?)
        })?
        .unsigned())
    }

    /// Restore height.
    pub fn height(&self) -> OtsResult<u64> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_seed_height(self.handle.as_ptr()?)
        })?
        .unsigned())
    }

    pub fn network(&self) -> OtsResult<Network> {
        Ok(call(self.abi(), unsafe {
            self.abi().ots_seed_network(self.handle.as_ptr()?)
        })?
        .network())
    }

    /// Wallet of this seed. For a seed in the jar the wallet belongs to the
    /// entry and goes stale with it.
    pub fn wallet(&self) -> OtsResult<Wallet> {
        let value = call(self.abi(), unsafe { self.abi().ots_seed_wallet(self.handle.as_ptr()?) })?;
        Ok(Wallet::from_handle(value.into_handle().inherit_lease(&self.handle)))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;

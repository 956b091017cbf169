//! Test helper functions and utilities

use std::rc::Rc;

use crate::fake::FakeAbi;
use crate::fake::model::{FakeSeed, stream};
use ots_sys::*;

/// A fresh fake library shared through an `Rc`.
pub fn fake_abi() -> Rc<FakeAbi> {
    Rc::new(FakeAbi::new())
}

/// Deterministic bytes with high entropy.
pub fn random_bytes(label: &str, len: usize) -> Vec<u8> {
    stream(label.as_bytes(), 0, len)
}

/// Bytes every entropy check rejects.
pub fn low_entropy_bytes(len: usize) -> Vec<u8> {
    vec![7u8; len]
}

/// Word values of a Monero seed derived from `label`.
pub fn monero_values(label: &str) -> Vec<u16> {
    random_bytes(label, 2 * OTS_MONERO_SEED_WORDS)
        .chunks(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]) % 1626)
        .collect()
}

/// Word values of a polyseed derived from `label`.
pub fn polyseed_values(label: &str) -> Vec<u16> {
    random_bytes(label, 2 * OTS_POLYSEED_WORDS)
        .chunks(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]) % 2048)
        .collect()
}

/// A phrase the fake decodes into `values` for the language with `code`.
pub fn phrase_of(code: &str, values: &[u16]) -> String {
    values.iter().map(|v| format!("{}{:04}", code, v)).collect::<Vec<_>>().join(" ")
}

/// Address the fake derives for a Monero seed decoded from `values`.
pub fn monero_seed_address(values: &[u16], network: OTS_NETWORK, passphrase: &str) -> String {
    let seed = FakeSeed::new(values.to_vec(), OTS_SEED_TYPE_MONERO, network, 0, 0, passphrase);
    seed.wallet().address()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::model::entropy;

    #[test]
    fn test_random_bytes_are_deterministic() {
        assert_eq!(random_bytes("a", 32), random_bytes("a", 32));
        assert_ne!(random_bytes("a", 32), random_bytes("b", 32));
        assert!(entropy(&random_bytes("a", 32)) > 3.5);
        assert!(entropy(&low_entropy_bytes(32)) < 1.0);
    }

    #[test]
    fn test_seed_values() {
        assert_eq!(monero_values("x").len(), OTS_MONERO_SEED_WORDS);
        assert!(monero_values("x").iter().all(|v| *v < 1626));
        assert_eq!(polyseed_values("x").len(), OTS_POLYSEED_WORDS);
        assert_eq!(phrase_of("en", &[1, 22]), "en0001 en0022");
    }
}

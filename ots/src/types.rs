//! Plain value types shared by the façades.

use std::fmt;
use std::str::FromStr;

use ots_sys::*;
use serde::{Deserialize, Serialize};

use crate::error::OtsError;

/// Monero network an address, seed or wallet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    Stage,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Stage];

    pub fn to_raw(self) -> OTS_NETWORK {
        match self {
            Network::Main => OTS_NETWORK_MAIN,
            Network::Test => OTS_NETWORK_TEST,
            Network::Stage => OTS_NETWORK_STAGE,
        }
    }

    pub fn from_raw(raw: OTS_NETWORK) -> Option<Self> {
        Network::ALL.into_iter().find(|n| n.to_raw() == raw)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Stage => "stage",
        })
    }
}

impl FromStr for Network {
    type Err = OtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "stage" | "stagenet" => Ok(Network::Stage),
            _ => Err(OtsError::InvalidArgument(format!("unknown network '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Standard,
    Subaddress,
    Integrated,
}

impl AddressType {
    pub const ALL: [AddressType; 3] = [
        AddressType::Standard,
        AddressType::Subaddress,
        AddressType::Integrated,
    ];

    pub fn to_raw(self) -> OTS_ADDRESS_TYPE {
        match self {
            AddressType::Standard => OTS_ADDRESS_TYPE_STANDARD,
            AddressType::Subaddress => OTS_ADDRESS_TYPE_SUBADDRESS,
            AddressType::Integrated => OTS_ADDRESS_TYPE_INTEGRATED,
        }
    }

    pub fn from_raw(raw: OTS_ADDRESS_TYPE) -> Option<Self> {
        AddressType::ALL.into_iter().find(|t| t.to_raw() == raw)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddressType::Standard => "standard",
            AddressType::Subaddress => "subaddress",
            AddressType::Integrated => "integrated",
        })
    }
}

impl FromStr for AddressType {
    type Err = OtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(AddressType::Standard),
            "subaddress" => Ok(AddressType::Subaddress),
            "integrated" => Ok(AddressType::Integrated),
            _ => Err(OtsError::InvalidArgument(format!("unknown address type '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedType {
    Monero,
    Polyseed,
}

impl SeedType {
    pub const ALL: [SeedType; 2] = [SeedType::Monero, SeedType::Polyseed];

    pub fn to_raw(self) -> OTS_SEED_TYPE {
        match self {
            SeedType::Monero => OTS_SEED_TYPE_MONERO,
            SeedType::Polyseed => OTS_SEED_TYPE_POLYSEED,
        }
    }

    pub fn from_raw(raw: OTS_SEED_TYPE) -> Option<Self> {
        SeedType::ALL.into_iter().find(|t| t.to_raw() == raw)
    }

    /// Number of words in a phrase of this type.
    pub fn word_count(self) -> usize {
        match self {
            SeedType::Monero => OTS_MONERO_SEED_WORDS,
            SeedType::Polyseed => OTS_POLYSEED_WORDS,
        }
    }
}

impl fmt::Display for SeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeedType::Monero => "monero",
            SeedType::Polyseed => "polyseed",
        })
    }
}

impl FromStr for SeedType {
    type Err = OtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monero" => Ok(SeedType::Monero),
            "polyseed" => Ok(SeedType::Polyseed),
            _ => Err(OtsError::InvalidArgument(format!("unknown seed type '{}'", s))),
        }
    }
}

/// Position of a subaddress in a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AddressIndex {
    pub account: u32,
    pub index: u32,
}

impl AddressIndex {
    pub fn new(account: u32, index: u32) -> Self {
        AddressIndex {
            account,
            index,
        }
    }
}

impl fmt::Display for AddressIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.index)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

//! Objects living behind fake handles and the deterministic derivations used
//! in place of the real cryptography.

use std::ffi::CString;

use ots_sys::*;

/// Monero base58 alphabet.
pub const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Average block time used for height and timestamp estimates.
pub const BLOCK_TIME: u64 = 120;

pub fn genesis_timestamp(network: OTS_NETWORK) -> u64 {
    match network {
        OTS_NETWORK_TEST => 1_410_295_020,
        OTS_NETWORK_STAGE => 1_452_520_800,
        _ => 1_397_818_193,
    }
}

pub fn timestamp_from_height(height: u64, network: OTS_NETWORK) -> u64 {
    genesis_timestamp(network) + height * BLOCK_TIME
}

pub fn height_from_timestamp(timestamp: u64, network: OTS_NETWORK) -> u64 {
    timestamp.saturating_sub(genesis_timestamp(network)) / BLOCK_TIME
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeAddress {
    pub text: String,
    pub network: OTS_NETWORK,
    pub kind: OTS_ADDRESS_TYPE,
}

impl FakeAddress {
    /// Parse an address following the Monero prefix and length conventions.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || !text.bytes().all(|c| BASE58.contains(&c)) {
            return None;
        }
        let first = text.as_bytes()[0];
        let (network, kind) = match (text.len(), first) {
            (95, b'4') => (OTS_NETWORK_MAIN, OTS_ADDRESS_TYPE_STANDARD),
            (95, b'8') => (OTS_NETWORK_MAIN, OTS_ADDRESS_TYPE_SUBADDRESS),
            (95, b'9') => (OTS_NETWORK_TEST, OTS_ADDRESS_TYPE_STANDARD),
            (95, b'B') => (OTS_NETWORK_TEST, OTS_ADDRESS_TYPE_SUBADDRESS),
            (95, b'5') => (OTS_NETWORK_STAGE, OTS_ADDRESS_TYPE_STANDARD),
            (95, b'7') => (OTS_NETWORK_STAGE, OTS_ADDRESS_TYPE_SUBADDRESS),
            (106, b'4') => (OTS_NETWORK_MAIN, OTS_ADDRESS_TYPE_INTEGRATED),
            (106, b'A') => (OTS_NETWORK_TEST, OTS_ADDRESS_TYPE_INTEGRATED),
            (106, b'5') => (OTS_NETWORK_STAGE, OTS_ADDRESS_TYPE_INTEGRATED),
            _ => return None,
        };
        Some(FakeAddress {
            text: text.to_string(),
            network,
            kind,
        })
    }

    pub fn fingerprint(&self) -> String {
        fingerprint_of(self.text.as_bytes())
    }

    pub fn payment_id(&self) -> Option<String> {
        (self.kind == OTS_ADDRESS_TYPE_INTEGRATED)
            .then(|| hex::encode(&blake3::hash(self.text.as_bytes()).as_bytes()[..8]))
    }

    /// Standard address an integrated address was built on.
    pub fn base(&self) -> Option<String> {
        if self.kind != OTS_ADDRESS_TYPE_INTEGRATED {
            return None;
        }
        let prefix = address_prefix(self.network, OTS_ADDRESS_TYPE_STANDARD);
        Some(format!("{}{}", prefix, &self.text[1..95]))
    }
}

pub fn address_prefix(network: OTS_NETWORK, kind: OTS_ADDRESS_TYPE) -> char {
    match (network, kind) {
        (OTS_NETWORK_TEST, OTS_ADDRESS_TYPE_SUBADDRESS) => 'B',
        (OTS_NETWORK_TEST, OTS_ADDRESS_TYPE_INTEGRATED) => 'A',
        (OTS_NETWORK_TEST, _) => '9',
        (OTS_NETWORK_STAGE, OTS_ADDRESS_TYPE_SUBADDRESS) => '7',
        (OTS_NETWORK_STAGE, _) => '5',
        (_, OTS_ADDRESS_TYPE_SUBADDRESS) => '8',
        _ => '4',
    }
}

/// Deterministic address text for the given key material.
pub fn derive_address(network: OTS_NETWORK, kind: OTS_ADDRESS_TYPE, material: &[u8]) -> String {
    let len = if kind == OTS_ADDRESS_TYPE_INTEGRATED {
        106
    } else {
        95
    };
    let mut body = vec![0u8; len - 1];
    blake3::Hasher::new().update(b"fake-address").update(material).finalize_xof().fill(&mut body);

    let mut text = String::with_capacity(len);
    text.push(address_prefix(network, kind));
    text.extend(body.iter().map(|b| BASE58[*b as usize % BASE58.len()] as char));
    text
}

pub fn fingerprint_of(material: &[u8]) -> String {
    hex::encode_upper(&blake3::hash(material).as_bytes()[..3])
}

/// Pseudo random bytes, `counter` makes successive calls differ.
pub fn stream(label: &[u8], counter: u64, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    blake3::Hasher::new()
        .update(label)
        .update(&counter.to_le_bytes())
        .finalize_xof()
        .fill(&mut out);
    out
}

/// Values a password is merged with, one per seed word.
pub fn password_values(password: &str, len: usize) -> Vec<u16> {
    let bytes = stream(password.as_bytes(), 0, len * 2);
    bytes.chunks(2).map(|c| u16::from_le_bytes([c[0], c[1]]) & 0x7ff).collect()
}

/// Shannon entropy in bits per byte.
pub fn entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts = [0usize; 256];
    for b in data {
        counts[*b as usize] += 1;
    }
    let len = data.len() as f64;
    counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[derive(Debug, Clone)]
pub struct FakeLanguage {
    pub code: &'static str,
    pub name: &'static str,
    pub english_name: &'static str,
    pub monero: bool,
    pub polyseed: bool,
}

impl FakeLanguage {
    pub fn supports(&self, seed_type: OTS_SEED_TYPE) -> bool {
        match seed_type {
            OTS_SEED_TYPE_POLYSEED => self.polyseed,
            _ => self.monero,
        }
    }
}

pub fn languages() -> Vec<FakeLanguage> {
    vec![
        FakeLanguage {
            code: "en",
            name: "English",
            english_name: "English",
            monero: true,
            polyseed: true,
        },
        FakeLanguage {
            code: "es",
            name: "Español",
            english_name: "Spanish",
            monero: true,
            polyseed: true,
        },
        FakeLanguage {
            code: "de",
            name: "Deutsch",
            english_name: "German",
            monero: true,
            polyseed: false,
        },
        FakeLanguage {
            code: "nl",
            name: "Nederlands",
            english_name: "Dutch",
            monero: true,
            polyseed: false,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct FakeSeed {
    pub indices: Vec<u16>,
    pub seed_type: OTS_SEED_TYPE,
    pub network: OTS_NETWORK,
    pub height: u64,
    pub timestamp: u64,
    pub legacy: bool,
    pub secret: [u8; 32],
}

impl FakeSeed {
    pub fn new(
        indices: Vec<u16>,
        seed_type: OTS_SEED_TYPE,
        network: OTS_NETWORK,
        height: u64,
        time: u64,
        passphrase: &str,
    ) -> Self {
        let (height, timestamp) = match (height, time) {
            (0, 0) => (0, 0),
            (0, t) => (height_from_timestamp(t, network), t),
            (h, 0) => (h, timestamp_from_height(h, network)),
            (h, t) => (h, t),
        };
        let secret = secret_for(&indices, passphrase);
        FakeSeed {
            legacy: seed_type == OTS_SEED_TYPE_MONERO && indices.len() == OTS_LEGACY_SEED_WORDS,
            indices,
            seed_type,
            network,
            height,
            timestamp,
            secret,
        }
    }

    pub fn wallet(&self) -> FakeWallet {
        FakeWallet {
            secret: self.secret,
            network: self.network,
            height: self.height,
        }
    }

    pub fn fingerprint(&self) -> String {
        fingerprint_of(&self.secret)
    }

    pub fn phrase(&self, code: &str, password: &str) -> String {
        let values = if password.is_empty() {
            self.indices.clone()
        } else {
            merge(&self.indices, &password_values(password, self.indices.len()))
        };
        values.iter().map(|v| format!("{}{:04}", code, v)).collect::<Vec<_>>().join(" ")
    }
}

pub fn secret_for(indices: &[u16], passphrase: &str) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"fake-seed");
    for v in indices {
        hasher.update(&v.to_le_bytes());
    }
    hasher.update(passphrase.as_bytes());
    *hasher.finalize().as_bytes()
}

pub fn merge(a: &[u16], b: &[u16]) -> Vec<u16> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Seed word values taken two bytes at a time from `random`.
pub fn indices_from_random(random: &[u8], words: usize, range: u16) -> Vec<u16> {
    (0..words)
        .map(|i| {
            let lo = random[(2 * i) % random.len()];
            let hi = random[(2 * i + 1) % random.len()];
            u16::from_le_bytes([lo, hi]) % range
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct FakeWallet {
    pub secret: [u8; 32],
    pub network: OTS_NETWORK,
    pub height: u64,
}

impl FakeWallet {
    pub fn address(&self) -> String {
        self.subaddress(0, 0)
    }

    pub fn subaddress(&self, account: u32, index: u32) -> String {
        if account == 0 && index == 0 {
            return derive_address(self.network, OTS_ADDRESS_TYPE_STANDARD, &self.secret);
        }
        let mut material = self.secret.to_vec();
        material.extend_from_slice(&account.to_le_bytes());
        material.extend_from_slice(&index.to_le_bytes());
        derive_address(self.network, OTS_ADDRESS_TYPE_SUBADDRESS, &material)
    }

    pub fn find(&self, address: &str, accounts: u32, indices: u32) -> Option<(u32, u32)> {
        (0..accounts)
            .flat_map(|a| (0..indices).map(move |i| (a, i)))
            .find(|(a, i)| self.subaddress(*a, *i) == address)
    }

    pub fn key(&self, label: &str) -> String {
        let secret = blake3::Hasher::new().update(label.as_bytes()).update(&self.secret).finalize();
        if label.starts_with("public") {
            hex::encode(blake3::hash(secret.as_bytes()).as_bytes())
        } else {
            hex::encode(secret.as_bytes())
        }
    }
}

/// Signature over `data` made by the key behind `address`.
pub fn signature(address: &str, data: &[u8], version: &str) -> String {
    let digest = blake3::Hasher::new().update(address.as_bytes()).update(data).finalize();
    format!("{}{}", version, hex::encode(digest.as_bytes()))
}

#[derive(Debug, Clone, Default)]
pub struct FakeTx {
    pub raw: Vec<u8>,
    pub inputs: Vec<u64>,
    pub outputs: Vec<(String, u64)>,
    pub change: Option<(String, u64)>,
    pub fee: u64,
}

impl FakeTx {
    /// Parse the line based format produced by `fixtures::fake_unsigned_tx`.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(raw).ok()?;
        let mut lines = text.lines();
        if lines.next()? != "FAKE-UNSIGNED-TX" {
            return None;
        }
        let mut tx = FakeTx {
            raw: raw.to_vec(),
            ..Default::default()
        };
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                ["in", amount] => tx.inputs.push(amount.parse().ok()?),
                ["out", address, amount] => {
                    tx.outputs.push((address.to_string(), amount.parse().ok()?))
                }
                ["change", address, amount] => {
                    tx.change = Some((address.to_string(), amount.parse().ok()?))
                }
                ["fee", amount] => tx.fee = amount.parse().ok()?,
                _ => return None,
            }
        }
        Some(tx)
    }

    pub fn amount_in(&self) -> u64 {
        self.inputs.iter().sum()
    }

    pub fn amount_out(&self) -> u64 {
        self.outputs.iter().map(|(_, a)| a).sum::<u64>() + self.change.as_ref().map_or(0, |c| c.1)
    }

    /// Warnings a signer should see before signing. A fee above a tenth of
    /// the amount sent is flagged.
    pub fn warnings(&self) -> Vec<(String, u32)> {
        let mut warnings = Vec::new();
        if self.fee > self.amount_out() / 10 {
            warnings.push((format!("High fee: {} for {} sent", self.fee, self.amount_out()), 1));
        }
        warnings
    }
}

/// A transaction warning laid out the way the library hands it out. Handles
/// to it point at `raw`.
#[derive(Debug)]
pub struct FakeWarning {
    pub raw: ots_tx_warning_t,
    #[allow(dead_code)]
    message: CString,
}

impl FakeWarning {
    pub fn new(message: &str, severity: u32) -> Box<Self> {
        let message = CString::new(message).unwrap_or_default();
        let mut warning = Box::new(FakeWarning {
            raw: ots_tx_warning_t {
                message: std::ptr::null_mut(),
                severity,
            },
            message,
        });
        warning.raw.message = warning.message.as_ptr() as *mut _;
        warning
    }

    /// Address handles carry as their object pointer.
    pub fn address(&self) -> usize {
        &self.raw as *const ots_tx_warning_t as usize
    }
}

/// Object behind a fake handle.
#[derive(Debug)]
pub enum FakeObject {
    WipeableString(CString),
    SeedIndices(Vec<u16>),
    Language(FakeLanguage),
    Address(FakeAddress),
    Seed(FakeSeed),
    Wallet(FakeWallet),
    TxDescription(FakeTx),
    TxWarning(Box<FakeWarning>),
}

impl FakeObject {
    pub fn handle_type(&self) -> ots_handle_type {
        match self {
            FakeObject::WipeableString(_) => OTS_HANDLE_WIPEABLE_STRING,
            FakeObject::SeedIndices(_) => OTS_HANDLE_SEED_INDICES,
            FakeObject::Language(_) => OTS_HANDLE_SEED_LANGUAGE,
            FakeObject::Address(_) => OTS_HANDLE_ADDRESS,
            FakeObject::Seed(_) => OTS_HANDLE_SEED,
            FakeObject::Wallet(_) => OTS_HANDLE_WALLET,
            FakeObject::TxDescription(_) => OTS_HANDLE_TX_DESCRIPTION,
            FakeObject::TxWarning(_) => OTS_HANDLE_TX_WARNING,
        }
    }
}

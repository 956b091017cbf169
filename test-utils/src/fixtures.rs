//! Common test fixtures and constants

use ots_sys::*;

/// A published Monero address with its expected properties.
///
/// Fingerprints, payment ids and base addresses are those of the real
/// library. The fake agrees on validity, network and type only.
#[derive(Debug, Clone, Copy)]
pub struct AddressVector {
    pub name: &'static str,
    pub address: &'static str,
    pub fingerprint: &'static str,
    pub network: OTS_NETWORK,
    pub address_type: OTS_ADDRESS_TYPE,
    pub payment_id: &'static str,
    pub base_address: &'static str,
}

pub const MAIN_STANDARD: &str = "4957vKkr9wUAA4a2rRjLmbT4uJadSZxzrW1nJh3NJYDr87hEdiFhaCcGyK87kb8u1i\
    1DWtwKTUnoZ6uobbotLGqX3zZKdtK";
pub const TEST_STANDARD: &str = "9xftLeckEQ5S5S2FHDGKZAUAHZKPdYRtVJAgyYERcEvaa8YjV7z5yXrVKmfse2mneP\
    UCJUB6L8yCWfvUj1LBQHyRDhg7bzw";
pub const STAGE_STANDARD: &str = "5BCb2ZfN7Jybmqjgb3QbCyYpPgF2s9ygS2xJ3wKM1jVyKmaX1XHtAieiaHeWx7Cwi\
    rKvTA1PEHZtA37FqKaDDowoTC4MjxA";

pub const ADDRESS_VECTORS: &[AddressVector] = &[
    AddressVector {
        name: "main standard",
        address: MAIN_STANDARD,
        fingerprint: "35B3F5",
        network: OTS_NETWORK_MAIN,
        address_type: OTS_ADDRESS_TYPE_STANDARD,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "main subaddress",
        address: "83HfRN12ujdNR9AtzmMotUaKo3avrzjfbHefaZ4muku5cJuBc3qaf81Xovo88FxRgoGYqp1cJycSiZF45\
            54cd5Lt6PfQBXm",
        fingerprint: "DCB56E",
        network: OTS_NETWORK_MAIN,
        address_type: OTS_ADDRESS_TYPE_SUBADDRESS,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "main integrated",
        address: "4Jmnw8aLmCzAA4a2rRjLmbT4uJadSZxzrW1nJh3NJYDr87hEdiFhaCcGyK87kb8u1i1DWtwKTUnoZ6uob\
            botLGqX5QeCPeUbcLb1iqv4E7",
        fingerprint: "CF8863",
        network: OTS_NETWORK_MAIN,
        address_type: OTS_ADDRESS_TYPE_INTEGRATED,
        payment_id: "59f3832901727c06",
        base_address: MAIN_STANDARD,
    },
    AddressVector {
        name: "test standard",
        address: TEST_STANDARD,
        fingerprint: "00F069",
        network: OTS_NETWORK_TEST,
        address_type: OTS_ADDRESS_TYPE_STANDARD,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "test subaddress",
        address: "BaswxFneurncD8EanZiasqLYdB2wLBPKUEpGvfTyoymEH933uibnpuWTjQA2ThJiirVSMgbYVWuGVUePd\
            dR2v9WmNHDwdPJ",
        fingerprint: "59984B",
        network: OTS_NETWORK_TEST,
        address_type: OTS_ADDRESS_TYPE_SUBADDRESS,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "test integrated",
        address: "A8NZMTSEqfbS5S2FHDGKZAUAHZKPdYRtVJAgyYERcEvaa8YjV7z5yXrVKmfse2mnePUCJUB6L8yCWfvUj\
            1LBQHyRKrDheASom7LFc6SsTx",
        fingerprint: "8E8255",
        network: OTS_NETWORK_TEST,
        address_type: OTS_ADDRESS_TYPE_INTEGRATED,
        payment_id: "b03d44b903993f81",
        base_address: TEST_STANDARD,
    },
    AddressVector {
        name: "stage standard",
        address: STAGE_STANDARD,
        fingerprint: "D01628",
        network: OTS_NETWORK_STAGE,
        address_type: OTS_ADDRESS_TYPE_STANDARD,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "stage subaddress",
        address: "79yuUvURCcUDSis5CJxkqiSBKs6YC64nJXoo9dYWaLtcQr179fZwHxJQYnGyDViHb6EWLNDUCJ2kh25X5\
            kkCyu6aLDfd1cX",
        fingerprint: "7D8356",
        network: OTS_NETWORK_STAGE,
        address_type: OTS_ADDRESS_TYPE_SUBADDRESS,
        payment_id: "",
        base_address: "",
    },
    AddressVector {
        name: "stage integrated",
        address: "5LuG3NUriaVbmqjgb3QbCyYpPgF2s9ygS2xJ3wKM1jVyKmaX1XHtAieiaHeWx7CwirKvTA1PEHZtA37Fq\
            KaDDowofucwGND291HHTMRikw",
        fingerprint: "83B77F",
        network: OTS_NETWORK_STAGE,
        address_type: OTS_ADDRESS_TYPE_INTEGRATED,
        payment_id: "9c749f464a3df891",
        base_address: STAGE_STANDARD,
    },
];

/// Strings no network accepts as an address.
pub const INVALID_ADDRESSES: &[&str] = &[
    "",
    "invalid",
    "4957vKkr9wUAA4a2rRjLmbT4uJadSZxzrW1nJh3NJYDr87hEdiFhaCcGyK87",
];

/// Mainnet timestamp of the genesis block.
pub const MAIN_GENESIS_TIMESTAMP: u64 = 1_397_818_193;

/// Unsigned transaction data in the format the fake library understands.
///
/// `outputs` and `change` are `(address, amount)` pairs.
pub fn fake_unsigned_tx(
    inputs: &[u64],
    outputs: &[(&str, u64)],
    change: Option<(&str, u64)>,
    fee: u64,
) -> Vec<u8> {
    let mut text = String::from("FAKE-UNSIGNED-TX\n");
    for amount in inputs {
        text.push_str(&format!("in {}\n", amount));
    }
    for (address, amount) in outputs {
        text.push_str(&format!("out {} {}\n", address, amount));
    }
    if let Some((address, amount)) = change {
        text.push_str(&format!("change {} {}\n", address, amount));
    }
    text.push_str(&format!("fee {}\n", fee));
    text.into_bytes()
}

/// Exported outputs in the format the fake library understands.
pub fn fake_outputs(count: usize) -> Vec<u8> {
    let mut text = String::from("FAKE-OUTPUTS\n");
    for i in 0..count {
        text.push_str(&format!("output {}\n", i));
    }
    text.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::model::{FakeAddress, FakeTx};

    #[test]
    fn test_vectors_parse_in_the_fake() {
        for vector in ADDRESS_VECTORS {
            let parsed = FakeAddress::parse(vector.address)
                .unwrap_or_else(|| panic!("{} should parse", vector.name));
            assert_eq!(parsed.network, vector.network, "{}", vector.name);
            assert_eq!(parsed.kind, vector.address_type, "{}", vector.name);
        }
        for invalid in INVALID_ADDRESSES {
            assert!(FakeAddress::parse(invalid).is_none());
        }
    }

    #[test]
    fn test_unsigned_tx_fixture() {
        let raw = fake_unsigned_tx(
            &[5000, 2000],
            &[(MAIN_STANDARD, 6000)],
            Some((TEST_STANDARD, 900)),
            100,
        );
        let tx = FakeTx::parse(&raw).expect("fixture parses");
        assert_eq!(tx.amount_in(), 7000);
        assert_eq!(tx.amount_out(), 6900);
        assert_eq!(tx.fee, 100);
    }
}

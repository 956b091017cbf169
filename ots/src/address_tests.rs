use ots_sys::OTS_SEED_TYPE_MONERO;
use ots_test_utils::fake::{ERROR_INVALID_ADDRESS, ERROR_NOT_INTEGRATED};
use ots_test_utils::{
    ADDRESS_VECTORS, INVALID_ADDRESSES, MAIN_STANDARD, STAGE_STANDARD, TEST_STANDARD,
    assert_foreign_error, assert_no_leaks, fake_abi,
};

use super::*;

#[test]
fn test_vectors_parse() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        for vector in ADDRESS_VECTORS {
            let address = Address::new(&ots, vector.address).unwrap();
            let network = Network::from_raw(vector.network).unwrap();
            let kind = AddressType::from_raw(vector.address_type).unwrap();
            assert_eq!(address.network().unwrap(), network, "{}", vector.name);
            assert_eq!(address.address_type().unwrap(), kind, "{}", vector.name);
            assert_eq!(
                address.is_integrated().unwrap(),
                kind == AddressType::Integrated,
                "{}",
                vector.name
            );
            assert_eq!(address.to_base58().unwrap(), vector.address, "{}", vector.name);
            assert_eq!(address.len().unwrap(), vector.address.len(), "{}", vector.name);

            assert!(Address::is_valid(&ots, vector.address, network).unwrap(), "{}", vector.name);
            assert_eq!(Address::network_of(&ots, vector.address).unwrap(), network);
            assert_eq!(Address::type_of(&ots, vector.address).unwrap(), kind);
        }
    });
}

#[test]
fn test_invalid_addresses() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        for invalid in INVALID_ADDRESSES {
            assert_foreign_error!(Address::new(&ots, invalid), ERROR_INVALID_ADDRESS);
            assert_foreign_error!(Address::network_of(&ots, invalid), ERROR_INVALID_ADDRESS);
            assert!(!Address::is_valid(&ots, invalid, Network::Main).unwrap());
        }
    });
}

#[test]
fn test_invalid_address_message() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let error = Address::new(&ots, "invalid").unwrap_err();
    assert_eq!(error.class(), Some("ots::exception::address::Invalid"));
    assert!(error.to_string().contains("invalid"));
}

#[test]
fn test_validity_depends_on_network() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert!(Address::is_valid(&ots, MAIN_STANDARD, Network::Main).unwrap());
    assert!(!Address::is_valid(&ots, MAIN_STANDARD, Network::Test).unwrap());
    assert!(Address::is_valid(&ots, TEST_STANDARD, Network::Test).unwrap());
    assert!(!Address::is_valid(&ots, STAGE_STANDARD, Network::Main).unwrap());
}

#[test]
fn test_standard_address_has_no_payment_id() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let address = Address::new(&ots, MAIN_STANDARD).unwrap();
    assert_eq!(address.payment_id().unwrap(), "");
    assert_eq!(Address::payment_id_of(&ots, MAIN_STANDARD).unwrap(), "");
    assert!(!Address::is_integrated_str(&ots, MAIN_STANDARD).unwrap());
    assert_foreign_error!(address.base_address(), ERROR_NOT_INTEGRATED);
    assert_foreign_error!(Address::integrated_of(&ots, MAIN_STANDARD), ERROR_NOT_INTEGRATED);
}

#[test]
fn test_integrated_address() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let vector = ADDRESS_VECTORS.iter().find(|v| v.name == "main integrated").unwrap();

    let address = Address::new(&ots, vector.address).unwrap();
    let payment_id = address.payment_id().unwrap();
    assert_eq!(payment_id.len(), 16);
    assert_eq!(Address::payment_id_of(&ots, vector.address).unwrap(), payment_id);
    assert!(Address::is_integrated_str(&ots, vector.address).unwrap());

    let base = address.base_address().unwrap();
    assert_eq!(Address::type_of(&ots, &base).unwrap(), AddressType::Standard);
    assert_eq!(Address::network_of(&ots, &base).unwrap(), Network::Main);
    assert_eq!(Address::integrated_of(&ots, vector.address).unwrap(), base);
}

#[test]
fn test_fingerprint() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let address = Address::new(&ots, MAIN_STANDARD).unwrap();
    let fingerprint = address.fingerprint().unwrap();
    assert_eq!(fingerprint.len(), 6);
    assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    assert_eq!(Address::fingerprint_of(&ots, MAIN_STANDARD).unwrap(), fingerprint);
}

#[test]
fn test_equality() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let a = Address::new(&ots, MAIN_STANDARD).unwrap();
    let b = Address::new(&ots, MAIN_STANDARD).unwrap();
    let c = Address::new(&ots, TEST_STANDARD).unwrap();
    assert!(a.equals(&b).unwrap());
    assert!(!a.equals(&c).unwrap());
    assert!(a.equals_str(MAIN_STANDARD).unwrap());
    assert!(!a.equals_str(TEST_STANDARD).unwrap());
}

#[test]
fn test_debug_shows_address() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let address = Address::new(&ots, MAIN_STANDARD).unwrap();
    assert_eq!(format!("{:?}", address), format!("Address({})", MAIN_STANDARD));
    assert!(!address.is_empty().unwrap());
}

#[test]
#[should_panic(expected = "expected a Address handle, got SeedLanguage")]
fn test_from_handle_checks_kind() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let value = call(ots.abi(), unsafe {
        ots.abi().ots_seed_language_default(OTS_SEED_TYPE_MONERO)
    })
    .unwrap();
    Address::from_handle(value.into_handle());
}

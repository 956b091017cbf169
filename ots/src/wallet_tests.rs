use assert_matches::assert_matches;
use ots_test_utils::fake::model::signature;
use ots_test_utils::fake::{
    ERROR_ADDRESS_NOT_FOUND, ERROR_INVALID_ADDRESS, ERROR_INVALID_OUTPUTS, ERROR_INVALID_TX,
};
use ots_test_utils::{
    MAIN_STANDARD, TEST_STANDARD, assert_foreign_error, assert_no_leaks, fake_abi, fake_outputs,
    fake_unsigned_tx, random_bytes,
};

use super::*;
use crate::types::AddressType;

fn wallet(ots: &Ots) -> Wallet {
    Wallet::new(ots, &random_bytes("wallet", WALLET_KEY_BYTES), 1200, Network::Main).unwrap()
}

#[test]
fn test_new_checks_key_length() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_matches!(
        Wallet::new(&ots, &random_bytes("short", 31), 0, Network::Main),
        Err(OtsError::InvalidArgument(_))
    );
    assert_eq!(fake.stats().results_created, 0);
}

#[test]
fn test_height_and_address() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = wallet(&ots);
        assert_eq!(wallet.height().unwrap(), 1200);

        let address = wallet.address().unwrap();
        assert_eq!(address.address_type().unwrap(), AddressType::Standard);
        assert_eq!(address.network().unwrap(), Network::Main);
        assert!(wallet.subaddress(0, 0).unwrap().equals(&address).unwrap());
        assert_eq!(
            wallet.subaddress(1, 2).unwrap().address_type().unwrap(),
            AddressType::Subaddress
        );
    });
}

#[test]
fn test_accounts_and_subaddresses() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = wallet(&ots);

        let accounts = wallet.accounts(3, 0).unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(accounts[0].equals(&wallet.address().unwrap()).unwrap());
        assert!(accounts[2].equals(&wallet.subaddress(2, 0).unwrap()).unwrap());

        let subaddresses = wallet.subaddresses(1, 2, 4).unwrap();
        assert_eq!(subaddresses.len(), 2);
        assert!(subaddresses[0].equals(&wallet.subaddress(1, 4).unwrap()).unwrap());
        assert!(subaddresses[1].equals(&wallet.subaddress(1, 5).unwrap()).unwrap());

        assert!(wallet.accounts(0, 0).unwrap().is_empty());
    });
}

#[test]
fn test_addresses_outlive_the_wallet() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let expected = wallet.subaddress(0, 1).unwrap().to_base58().unwrap();
    let subaddresses = wallet.subaddresses(0, 2, 0).unwrap();
    drop(wallet);
    assert_eq!(subaddresses[1].to_base58().unwrap(), expected);
}

#[test]
fn test_has_address_and_index() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let subaddress = wallet.subaddress(2, 5).unwrap();
    let text = subaddress.to_base58().unwrap();

    assert!(wallet.has_address(&subaddress, 0, 0).unwrap());
    assert!(wallet.has_address_str(&text, 3, 6).unwrap());
    assert!(!wallet.has_address(&subaddress, 2, 10).unwrap());
    assert!(!wallet.has_address_str(MAIN_STANDARD, 0, 0).unwrap());

    assert_eq!(wallet.address_index(&subaddress, 0, 0).unwrap(), AddressIndex::new(2, 5));
    assert_eq!(wallet.address_index_str(&text, 0, 0).unwrap(), AddressIndex::new(2, 5));
    assert_foreign_error!(wallet.address_index(&subaddress, 1, 1), ERROR_ADDRESS_NOT_FOUND);
    assert_foreign_error!(wallet.address_index_str(MAIN_STANDARD, 0, 0), ERROR_ADDRESS_NOT_FOUND);
    assert_foreign_error!(wallet.has_address_str("invalid", 0, 0), ERROR_INVALID_ADDRESS);
}

#[test]
fn test_search_depth_follows_global_setting() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let far = wallet.subaddress(0, 150).unwrap();

    assert!(!wallet.has_address(&far, 0, 0).unwrap());
    ots.set_max_index_depth(200);
    assert!(wallet.has_address(&far, 0, 0).unwrap());
}

#[test]
fn test_keys() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);

    let keys = [
        wallet.secret_view_key().unwrap().to_string(),
        wallet.public_view_key().unwrap(),
        wallet.secret_spend_key().unwrap().to_string(),
        wallet.public_spend_key().unwrap(),
    ];
    for key in &keys {
        assert_eq!(key.len(), 64);
        assert!(hex::decode(key).is_ok());
    }
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[0], keys[2]);
    assert_ne!(keys[1], keys[3]);
    assert_eq!(fake.live_strings(), 0);
}

#[test]
fn test_import_outputs() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    assert_eq!(wallet.import_outputs(&fake_outputs(3)).unwrap(), 3);
    assert_eq!(wallet.import_outputs(&fake_outputs(0)).unwrap(), 0);
    assert_foreign_error!(wallet.import_outputs(b"garbage"), ERROR_INVALID_OUTPUTS);
}

#[test]
fn test_export_key_images() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let images = wallet.export_key_images().unwrap();
    assert!(images.starts_with(b"FAKE-KEY-IMAGES:"));
    assert_eq!(images, wallet.export_key_images().unwrap());
}

#[test]
fn test_sign_transaction() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = wallet(&ots);
        let unsigned =
            fake_unsigned_tx(&[5000], &[(MAIN_STANDARD, 4000)], Some((TEST_STANDARD, 900)), 100);
        let signed = wallet.sign_transaction(&unsigned).unwrap();
        assert!(signed.starts_with(b"FAKE-SIGNED-TX:"));
        assert_foreign_error!(wallet.sign_transaction(b""), ERROR_INVALID_TX);
    });
}

#[test]
fn test_check_tx() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = wallet(&ots);
        let fair = fake_unsigned_tx(
            &[5000],
            &[(MAIN_STANDARD, 4000)],
            Some((TEST_STANDARD, 900)),
            100,
        );
        assert!(wallet.check_tx(&fair).unwrap().is_empty());

        let greedy = fake_unsigned_tx(&[5000], &[(MAIN_STANDARD, 2000)], None, 3000);
        let warnings = wallet.check_tx(&greedy).unwrap();
        assert_eq!(
            warnings,
            vec![TxWarning {
                message: "High fee: 3000 for 2000 sent".to_string(),
                severity: 1,
            }]
        );
        assert_foreign_error!(wallet.check_tx(b"not a transaction"), ERROR_INVALID_TX);
    });
}

#[test]
fn test_check_tx_matches_checking_the_description() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let unsigned = fake_unsigned_tx(&[900], &[(MAIN_STANDARD, 100)], None, 800);

    let (_, from_description) = wallet.describe_and_check_tx(&unsigned).unwrap();
    assert_eq!(wallet.check_tx(&unsigned).unwrap(), from_description);
}

#[test]
fn test_sign_and_verify_data() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let data = b"offline message";

    let signature = wallet.sign_data(data).unwrap();
    assert!(signature.starts_with("SigV2"));
    assert!(wallet.verify_data(data, &signature, false).unwrap());
    assert!(!wallet.verify_data(b"tampered", &signature, false).unwrap());
    assert!(!wallet.verify_data(data, "SigV2", true).unwrap());
}

#[test]
fn test_legacy_signatures_need_fallback() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let data = b"old message";
    let address = wallet.address().unwrap().to_base58().unwrap();
    let legacy = signature(&address, data, "SigV1");

    assert!(!wallet.verify_data(data, &legacy, false).unwrap());
    assert!(wallet.verify_data(data, &legacy, true).unwrap());
    assert!(wallet.verify_data_with_address(data, &address, &legacy, true).unwrap());
}

#[test]
fn test_sign_with_subaddress() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let data = b"subaddress message";
    let subaddress = wallet.subaddress(1, 3).unwrap().to_base58().unwrap();

    let by_index = wallet.sign_data_with_index(data, 1, 3).unwrap();
    let by_address = wallet.sign_data_with_address(data, &subaddress).unwrap();
    assert_eq!(by_index, by_address);

    assert!(wallet.verify_data_with_index(data, 1, 3, &by_index, false).unwrap());
    assert!(!wallet.verify_data_with_index(data, 1, 4, &by_index, false).unwrap());
    assert!(wallet.verify_data_with_address(data, &subaddress, &by_address, false).unwrap());
    assert!(!wallet.verify_data(data, &by_index, true).unwrap());
}

#[test]
fn test_sign_with_foreign_address() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    assert_foreign_error!(
        wallet.sign_data_with_address(b"x", MAIN_STANDARD),
        ERROR_ADDRESS_NOT_FOUND
    );
    assert_foreign_error!(wallet.sign_data_with_address(b"x", "invalid"), ERROR_INVALID_ADDRESS);
}

#[test]
fn test_sign_empty_data() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let signature = wallet.sign_data(b"").unwrap();
    assert!(wallet.verify_data(b"", &signature, false).unwrap());
}

#[test]
#[should_panic(expected = "expected a Wallet handle, got Address")]
fn test_from_handle_checks_kind() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let text = std::ffi::CString::new(MAIN_STANDARD).unwrap();
    let value = call(ots.abi(), unsafe { ots.abi().ots_address_create(text.as_ptr()) }).unwrap();
    Wallet::from_handle(value.into_handle());
}

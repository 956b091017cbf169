//! End to end flows against the fake library
//!
//! This test suite walks the paths an offline signer takes:
//! - Restoring a seed from a phrase and deriving its wallet
//! - Importing outputs, exporting key images and signing a transaction
//! - Signing and verifying messages
//! - Leaving no library allocation behind

use ots::{
    AddressIndex, Network, Ots, OtsConfig, OtsError, Seed, SeedIndices, SeedLanguage, SeedType,
};
use ots_test_utils::fake::ERROR_INVALID_SEED;
use ots_test_utils::{
    MAIN_STANDARD, TEST_STANDARD, assert_error_contains, assert_foreign_error, assert_no_leaks,
    fake_abi, fake_outputs, fake_unsigned_tx, monero_values, phrase_of, polyseed_values,
};

#[test]
fn test_restore_and_sign() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let phrase = phrase_of("en", &monero_values("cold wallet"));

    assert_no_leaks!(fake, {
        let seed = Seed::monero_decode(&ots, &phrase, 3000, 0, Network::Main, "").unwrap();
        let wallet = seed.wallet().unwrap();
        drop(seed);

        assert_eq!(wallet.import_outputs(&fake_outputs(2)).unwrap(), 2);
        let key_images = wallet.export_key_images().unwrap();
        assert!(!key_images.is_empty());

        let unsigned = fake_unsigned_tx(
            &[10_000],
            &[(MAIN_STANDARD, 8_000)],
            Some((TEST_STANDARD, 1_900)),
            100,
        );
        let description = wallet.describe_tx(&unsigned).unwrap();
        assert_eq!(description.amount_sent(), 8_000);
        assert_eq!(description.fee, 100);

        let signed = wallet.sign_transaction(&unsigned).unwrap();
        assert!(!signed.is_empty());
    });
}

#[test]
fn test_message_signing_round_trip() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = Seed::polyseed_generate(&ots, Network::Main, 0, "").unwrap().wallet().unwrap();
        let address = wallet.subaddress(0, 7).unwrap().to_base58().unwrap();
        assert_eq!(wallet.address_index_str(&address, 0, 0).unwrap(), AddressIndex::new(0, 7));

        let signature = wallet.sign_data_with_address(b"proof of funds", &address).unwrap();
        assert!(ots.verify_data(b"proof of funds", &address, &signature).unwrap());
        assert!(!ots.verify_data(b"proof of other funds", &address, &signature).unwrap());
    });
}

#[test]
fn test_polyseed_backup_with_password() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let original = Seed::polyseed_generate(&ots, Network::Test, 0, "").unwrap();
    let english = SeedLanguage::default_for(&ots, SeedType::Polyseed).unwrap();

    let backup = original.phrase(&english, "correct horse").unwrap();
    let restored = Seed::polyseed_decode(
        &ots,
        &backup.reveal().unwrap(),
        Network::Test,
        "correct horse",
        "",
    )
    .unwrap();
    assert_eq!(restored.fingerprint().unwrap(), original.fingerprint().unwrap());

    let wrong = Seed::polyseed_decode(
        &ots,
        &backup.reveal().unwrap(),
        Network::Test,
        "wrong",
        "",
    )
    .unwrap();
    assert_ne!(wrong.fingerprint().unwrap(), original.fingerprint().unwrap());
}

#[test]
fn test_split_seed_shares() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let values = polyseed_values("split");
    let share = polyseed_values("share");

    let secret = SeedIndices::new(&ots, &values).unwrap();
    let pad = SeedIndices::new(&ots, &share).unwrap();
    let other_half = secret.merge(&pad).unwrap();
    drop(secret);

    let joined = SeedIndices::merge_multiple(&ots, &[&pad, &other_half], values.len()).unwrap();
    let seed = Seed::polyseed_decode_indices(&ots, &joined, Network::Main, "", "").unwrap();
    let expected = Seed::polyseed_decode(
        &ots,
        &phrase_of("en", &values),
        Network::Main,
        "",
        "",
    )
    .unwrap();
    assert_eq!(seed.fingerprint().unwrap(), expected.fingerprint().unwrap());
}

#[test]
fn test_library_errors_carry_class_and_message() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let result = Seed::monero_decode(&ots, "en0001 en0002", 0, 0, Network::Main, "");

    assert_foreign_error!(&result, ERROR_INVALID_SEED);
    let error = result.unwrap_err();
    assert!(error.is_foreign());
    assert_eq!(error.class(), Some("ots::exception::seed::Invalid"));
    assert_error_contains!(Err::<(), _>(error), "25 words");
    fake.assert_no_leaks();
}

#[test]
fn test_config_drives_the_library() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let config =
        OtsConfig::from_toml_str("enforce_entropy = false\nmax_account_depth = 2\n").unwrap();
    ots.apply_config(&config).unwrap();

    assert_eq!(ots.max_account_depth(), 2);
    assert_eq!(ots.random_bytes(4).unwrap().len(), 4);

    let wallet = Seed::monero_generate(&ots, 0, 0, Network::Main).unwrap().wallet().unwrap();
    let third_account = wallet.subaddress(2, 0).unwrap();
    assert!(!wallet.has_address(&third_account, 0, 0).unwrap());
}

#[test]
fn test_objects_outlive_the_context() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let seed = Seed::monero_generate(&ots, 0, 0, Network::Stage).unwrap();
    drop(ots);

    assert_eq!(seed.network().unwrap(), Network::Stage);
    drop(seed);
    fake.assert_no_leaks();
}

#[test]
fn test_local_argument_errors_skip_the_library() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let result = Seed::monero_decode(&ots, "en0001\0en0002", 0, 0, Network::Main, "");
    match result {
        Err(OtsError::InvalidArgument(message)) => assert!(message.contains("NUL")),
        other => panic!("expected an invalid argument error, got {:?}", other),
    }
    assert_eq!(fake.stats().results_created, 0);
}

use ots_test_utils::fake::ERROR_INVALID_TX;
use ots_test_utils::{
    MAIN_STANDARD, STAGE_STANDARD, TEST_STANDARD, assert_foreign_error, assert_no_leaks, fake_abi,
    fake_unsigned_tx, random_bytes,
};

use super::*;
use crate::{Network, Ots, Wallet};

fn wallet(ots: &Ots) -> Wallet {
    Wallet::new(ots, &random_bytes("describe", 32), 0, Network::Main).unwrap()
}

fn flow(address: &str, amount: u64) -> Flow {
    Flow {
        address: address.to_string(),
        amount,
    }
}

#[test]
fn test_describe_tx() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let unsigned = fake_unsigned_tx(
        &[5000, 2000],
        &[(MAIN_STANDARD, 4000), (STAGE_STANDARD, 2000)],
        Some((TEST_STANDARD, 900)),
        100,
    );

    assert_no_leaks!(fake, {
        let description = wallet(&ots).describe_tx(&unsigned).unwrap();
        assert_eq!(description.tx_set, unsigned);
        assert_eq!(description.amount_in, 7000);
        assert_eq!(description.amount_out, 6900);
        assert_eq!(description.fee, 100);
        assert_eq!(
            description.flows,
            vec![flow(MAIN_STANDARD, 4000), flow(STAGE_STANDARD, 2000)]
        );
        assert_eq!(description.change, Some(flow(TEST_STANDARD, 900)));
        assert_eq!(description.amount_sent(), 6000);
    });
    assert_eq!(fake.stats().descriptions_freed, 1);
}

#[test]
fn test_transfers() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let unsigned =
        fake_unsigned_tx(&[3000], &[(MAIN_STANDARD, 2500)], Some((TEST_STANDARD, 450)), 50);
    let description = wallet(&ots).describe_tx(&unsigned).unwrap();

    assert_eq!(
        description.transfers,
        vec![Transfer {
            amount_in: 3000,
            amount_out: 2950,
            ring_size: 16,
            unlock_time: 0,
            flows: vec![flow(MAIN_STANDARD, 2500)],
            change: Some(flow(TEST_STANDARD, 450)),
            fee: 50,
            payment_id: String::new(),
            dummy_outputs: 0,
            tx_extra: String::new(),
        }]
    );
}

#[test]
fn test_describe_tx_without_change() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let unsigned = fake_unsigned_tx(&[1000], &[(MAIN_STANDARD, 990)], None, 10);
    let description = wallet(&ots).describe_tx(&unsigned).unwrap();

    assert_eq!(description.change, None);
    assert_eq!(description.transfers[0].change, None);
    assert_eq!(description.amount_out, 990);
    assert_eq!(description.amount_sent(), 990);
}

#[test]
fn test_describe_invalid_tx() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let wallet = wallet(&ots);
        assert_foreign_error!(wallet.describe_tx(b"not a transaction"), ERROR_INVALID_TX);
        assert_foreign_error!(wallet.describe_tx(b""), ERROR_INVALID_TX);
    });
    assert_eq!(fake.stats().descriptions_freed, 0);
}

#[test]
fn test_descriptions_are_independent_copies() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let wallet = wallet(&ots);
    let unsigned = fake_unsigned_tx(&[10], &[(MAIN_STANDARD, 9)], None, 1);

    let first = wallet.describe_tx(&unsigned).unwrap();
    let second = wallet.describe_tx(&unsigned).unwrap();
    drop(wallet);
    assert_eq!(first, second);
    assert_eq!(fake.live_descriptions(), 0);
    assert_eq!(fake.live_objects(), 0);
}

#[test]
#[should_panic(expected = "expected a TxDescription handle, got Address")]
fn test_from_handle_checks_kind() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let text = std::ffi::CString::new(MAIN_STANDARD).unwrap();
    let value =
        crate::result::call(ots.abi(), unsafe { ots.abi().ots_address_create(text.as_ptr()) })
            .unwrap();
    let _ = TxDescription::from_handle(value.into_handle());
}

#[test]
fn test_describe_and_check_flags_a_high_fee() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let unsigned = fake_unsigned_tx(&[1000], &[(MAIN_STANDARD, 500)], None, 300);

    assert_no_leaks!(fake, {
        let (description, warnings) = wallet(&ots).describe_and_check_tx(&unsigned).unwrap();
        assert_eq!(description.fee, 300);
        assert_eq!(description.amount_sent(), 500);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, 1);
        assert!(warnings[0].message.starts_with("High fee"));
    });
    assert_eq!(fake.stats().descriptions_freed, 1);
}

#[test]
fn test_describe_and_check_without_warnings() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let unsigned = fake_unsigned_tx(&[1000], &[(MAIN_STANDARD, 900)], None, 10);

    assert_no_leaks!(fake, {
        let (description, warnings) = wallet(&ots).describe_and_check_tx(&unsigned).unwrap();
        assert_eq!(description.amount_out, 900);
        assert!(warnings.is_empty());
    });
}

#[test]
fn test_describe_and_check_invalid_tx() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        assert_foreign_error!(wallet(&ots).describe_and_check_tx(b"garbage"), ERROR_INVALID_TX);
    });
    assert_eq!(fake.stats().descriptions_freed, 0);
}

#[test]
#[should_panic(expected = "expected a TxWarning handle")]
fn test_warning_checks_kind() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let text = std::ffi::CString::new(MAIN_STANDARD).unwrap();
    let value =
        crate::result::call(ots.abi(), unsafe { ots.abi().ots_address_create(text.as_ptr()) })
            .unwrap();
    let _ = TxWarning::from_handle(&value.into_handle());
}

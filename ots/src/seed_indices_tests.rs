use ots_test_utils::fake::{ERROR_INVALID_INDICES, ERROR_LENGTH_MISMATCH, ERROR_TOO_FEW_VALUES};
use ots_test_utils::{assert_foreign_error, assert_no_leaks, fake_abi};

use super::*;

#[test]
fn test_values_round_trip() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let indices = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
        assert_eq!(*indices.values().unwrap(), vec![1, 2, 3]);
        assert_eq!(indices.len().unwrap(), 3);
        assert!(!indices.is_empty().unwrap());
    });
}

#[test]
fn test_empty_list() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let indices = SeedIndices::new(&ots, &[]).unwrap();
    assert!(indices.is_empty().unwrap());
    assert!(indices.values().unwrap().is_empty());
    assert_eq!(*indices.numeric(",").unwrap(), "");
}

#[test]
fn test_merge_is_element_wise_xor() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
        let b = SeedIndices::new(&ots, &[4, 5, 6]).unwrap();

        let merged = a.merge(&b).unwrap();
        assert_eq!(*merged.values().unwrap(), vec![5, 7, 5]);

        let restored = merged.merge(&b).unwrap();
        assert_eq!(*restored.values().unwrap(), vec![1, 2, 3]);
    });
}

#[test]
fn test_merge_with_itself_is_zero() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let a = SeedIndices::new(&ots, &[1625, 7, 0, 2047]).unwrap();
    assert_eq!(*a.merge(&a).unwrap().values().unwrap(), vec![0, 0, 0, 0]);
}

#[test]
fn test_merge_length_mismatch() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
    let b = SeedIndices::new(&ots, &[1, 2]).unwrap();
    assert_foreign_error!(a.merge(&b), ERROR_LENGTH_MISMATCH);
}

#[test]
fn test_numeric_and_hex_round_trip() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let values = [0u16, 7, 1625, 2047];
    assert_no_leaks!(fake, {
        let indices = SeedIndices::new(&ots, &values).unwrap();
        for separator in ["", ",", ";", " "] {
            let numeric = indices.numeric(separator).unwrap();
            let parsed = SeedIndices::from_string(&ots, &numeric, separator).unwrap();
            assert_eq!(*parsed.values().unwrap(), values, "numeric with {:?}", separator);

            let hex = indices.hex(separator).unwrap();
            let parsed = SeedIndices::from_hex(&ots, &hex, separator).unwrap();
            assert_eq!(*parsed.values().unwrap(), values, "hex with {:?}", separator);
        }
    });
}

#[test]
fn test_text_formats() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let indices = SeedIndices::new(&ots, &[1, 2047]).unwrap();
    assert_eq!(*indices.numeric(" ").unwrap(), "0001 2047");
    assert_eq!(*indices.hex("").unwrap(), "000107ff");
    assert_eq!(fake.live_strings(), 0);
}

#[test]
fn test_from_string_rejects_garbage() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_foreign_error!(SeedIndices::from_string(&ots, "12,xx", ","), ERROR_INVALID_INDICES);
    assert_foreign_error!(SeedIndices::from_string(&ots, "123", ""), ERROR_INVALID_INDICES);
    assert!(SeedIndices::from_string(&ots, "", ",").unwrap().is_empty().unwrap());
}

#[test]
fn test_append_and_clear() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let indices = SeedIndices::new(&ots, &[]).unwrap();
    indices.append(10).unwrap();
    indices.append(20).unwrap();
    assert_eq!(*indices.values().unwrap(), vec![10, 20]);
    indices.clear().unwrap();
    assert!(indices.is_empty().unwrap());
}

#[test]
fn test_merge_with_password_is_self_inverse() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let values = ots_test_utils::polyseed_values("password");
    let indices = SeedIndices::new(&ots, &values).unwrap();

    let offset = indices.merge_with_password("secret").unwrap();
    assert_ne!(*offset.values().unwrap(), values);
    let restored = offset.merge_with_password("secret").unwrap();
    assert_eq!(*restored.values().unwrap(), values);
}

#[test]
fn test_merge_multiple() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
        let b = SeedIndices::new(&ots, &[4, 5, 6]).unwrap();
        let c = SeedIndices::new(&ots, &[7, 8, 9]).unwrap();
        let merged = SeedIndices::merge_multiple(&ots, &[&a, &b, &c], 3).unwrap();
        assert_eq!(*merged.values().unwrap(), vec![1 ^ 4 ^ 7, 2 ^ 5 ^ 8, 3 ^ 6 ^ 9]);
    });
}

#[test]
fn test_merge_multiple_needs_two_lists() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
    assert_foreign_error!(SeedIndices::merge_multiple(&ots, &[&a], 3), ERROR_TOO_FEW_VALUES);
}

#[test]
fn test_merge_multiple_checks_element_count() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
    let b = SeedIndices::new(&ots, &[4, 5, 6]).unwrap();
    assert_foreign_error!(SeedIndices::merge_multiple(&ots, &[&a, &b], 4), ERROR_LENGTH_MISMATCH);
}

#[test]
fn test_zeroing_merges_consume_their_inputs() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let a = SeedIndices::new(&ots, &[1, 2, 3]).unwrap();
        let b = SeedIndices::new(&ots, &[4, 5, 6]).unwrap();
        let merged = a.merge_and_zero(b).unwrap();
        assert_eq!(*merged.values().unwrap(), vec![5, 7, 5]);

        let offset = merged.merge_with_password_and_zero("pw").unwrap();
        assert_eq!(offset.len().unwrap(), 3);

        let lists = vec![
            offset,
            SeedIndices::new(&ots, &[0, 0, 0]).unwrap(),
            SeedIndices::new(&ots, &[0, 0, 0]).unwrap(),
        ];
        let combined = SeedIndices::merge_multiple_and_zero(&ots, lists, 3).unwrap();
        assert_eq!(combined.len().unwrap(), 3);
    });
}

#[test]
fn test_debug_is_redacted() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let indices = SeedIndices::new(&ots, &[1234]).unwrap();
    assert_eq!(format!("{:?}", indices), "SeedIndices(<redacted>)");
}

use std::ffi::CString;

use assert_matches::assert_matches;
use ots_test_utils::fake::{ERROR_INJECTED, FakeError};
use ots_test_utils::{assert_no_leaks, fake_abi};

use super::*;

fn wipeable(abi: &Abi, text: &str) -> *mut ots_result_t {
    let text = CString::new(text).unwrap();
    unsafe { abi.ots_wipeable_string_create(text.as_ptr()) }
}

#[test]
fn test_result_kind_from_raw() {
    assert_eq!(ResultKind::from_raw(OTS_RESULT_NONE), ResultKind::None);
    assert_eq!(ResultKind::from_raw(OTS_RESULT_HANDLE), ResultKind::Handle);
    assert_eq!(ResultKind::from_raw(OTS_RESULT_STRING), ResultKind::String);
    assert_eq!(ResultKind::from_raw(OTS_RESULT_ARRAY), ResultKind::Array);
    assert_eq!(ResultKind::from_raw(OTS_RESULT_ADDRESS_INDEX), ResultKind::AddressIndex);
    assert_eq!(ResultKind::from_raw(0x4000_0000), ResultKind::None);
}

#[test]
fn test_release_is_idempotent() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let mut result = ForeignResult::new(&abi, unsafe { abi.ots_version() });
    assert!(!result.is_released());
    assert_eq!(result.kind(), ResultKind::String);

    result.release();
    result.release();
    assert!(result.is_released());
    drop(result);

    assert_eq!(fake.stats().results_freed, 1);
    fake.assert_no_leaks();
}

#[test]
fn test_error_result_is_translated_and_freed() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    fake.inject_error(FakeError::new(ERROR_INJECTED, "ots::exception::Injected", "boom"));

    let error = call(&abi, unsafe { abi.ots_version() }).unwrap_err();
    assert_matches!(&error, OtsError::Foreign { code, class, message } => {
        assert_eq!(*code, ERROR_INJECTED);
        assert_eq!(class, "ots::exception::Injected");
        assert_eq!(message, "boom");
    });
    assert_eq!(fake.live_results(), 0);
}

#[test]
fn test_error_accessor() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let ok = ForeignResult::new(&abi, unsafe { abi.ots_version() });
    assert!(!ok.is_error());
    assert!(ok.error().is_none());

    fake.inject_error(FakeError::new(ERROR_INJECTED, "ots::exception::Injected", "boom"));
    let failed = ForeignResult::new(&abi, unsafe { abi.ots_version() });
    assert!(failed.is_error());
    assert_eq!(failed.error().and_then(|e| e.code()), Some(ERROR_INJECTED));
}

#[test]
#[should_panic(expected = "expected a Boolean result, got String")]
fn test_wrong_kind_panics() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let value = call(&abi, unsafe { abi.ots_version() }).unwrap();
    value.boolean();
}

#[test]
fn test_string_payload() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    assert_no_leaks!(fake, {
        let value = call(&abi, unsafe { abi.ots_version() }).unwrap();
        assert_eq!(value.kind(), ResultKind::String);
        assert_eq!(value.string().unwrap(), "0.1.0");
        assert_eq!(*value.secret_string().unwrap(), "0.1.0");
    });
}

#[test]
fn test_int_array_payload() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let value = call(&abi, unsafe { abi.ots_version_components() }).unwrap();
    assert_eq!(value.ints(), vec![0, 1, 0]);
}

#[test]
fn test_byte_array_payload() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let value = call(&abi, unsafe { abi.ots_random_32() }).unwrap();
    assert_eq!(value.bytes().len(), 32);
    assert_eq!(*value.secret_bytes(), value.bytes());
}

#[test]
fn test_comparison_payload() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    assert_no_leaks!(fake, {
        let a = call(&abi, wipeable(&abi, "apple")).unwrap().into_handle();
        let b = call(&abi, wipeable(&abi, "banana")).unwrap().into_handle();
        let value = call(&abi, unsafe {
            abi.ots_wipeable_string_compare(a.as_ptr().unwrap(), b.as_ptr().unwrap())
        })
            .unwrap();
        assert_eq!(value.comparison(), Ordering::Less);
    });
}

#[test]
fn test_enum_payloads() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let address = CString::new(ots_test_utils::TEST_STANDARD).unwrap();

    let network = call(&abi, unsafe { abi.ots_address_string_network(address.as_ptr()) }).unwrap();
    assert_eq!(network.network(), Network::Test);

    let kind = call(&abi, unsafe { abi.ots_address_string_type(address.as_ptr()) }).unwrap();
    assert_eq!(kind.address_type(), AddressType::Standard);

    let language = call(&abi, unsafe {
        abi.ots_seed_language_default(OTS_SEED_TYPE_POLYSEED)
    })
    .unwrap();
    assert_eq!(language.kind(), ResultKind::Handle);
}

#[test]
fn test_owned_handle_outlives_result() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let handle = call(&abi, wipeable(&abi, "secret")).unwrap().into_handle();
    assert!(!handle.is_borrowed());
    assert_eq!(fake.live_results(), 0);
    assert_eq!(fake.live_objects(), 1);

    drop(handle);
    assert_eq!(fake.stats().objects_freed, 1);
    fake.assert_no_leaks();
}

#[test]
fn test_unclaimed_owned_handle_is_freed_with_result() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let value = call(&abi, wipeable(&abi, "secret")).unwrap();
    drop(value);
    assert_eq!(fake.stats().objects_freed, 1);
    fake.assert_no_leaks();
}

#[test]
fn test_borrowed_handles_anchor_their_result() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let handles = call(&abi, unsafe { abi.ots_seed_languages() }).unwrap().into_handles();
    assert_eq!(handles.len(), 4);
    assert!(handles.iter().all(ForeignHandle::is_borrowed));
    assert_eq!(fake.live_results(), 1);

    drop(handles);
    assert_eq!(fake.live_results(), 0);
    assert_eq!(fake.stats().objects_freed, 0);
}

#[test]
fn test_owned_handle_array_is_detached() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    assert_no_leaks!(fake, {
        let key = ots_test_utils::random_bytes("wallet", 32);
        let wallet = call(&abi, unsafe {
            abi.ots_wallet_create(key.as_ptr(), 0, OTS_NETWORK_MAIN)
        })
        .unwrap()
        .into_handle();
        let accounts = call(&abi, unsafe {
            abi.ots_wallet_accounts(wallet.as_ptr().unwrap(), 3, 0)
        })
        .unwrap()
        .into_handles();
        assert_eq!(accounts.len(), 3);
        assert!(accounts.iter().all(|h| !h.is_borrowed()));
        assert_eq!(fake.live_results(), 0);
    });
}

#[test]
fn test_debug_shows_kind() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let mut result = ForeignResult::new(&abi, unsafe { abi.ots_version() });
    assert_eq!(format!("{:?}", result), "ForeignResult { kind: String, error: false }");
    result.release();
    assert_eq!(format!("{:?}", result), "ForeignResult(released)");
}

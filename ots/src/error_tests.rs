use std::ffi::CString;

use ots_sys::{OTS_MAX_ERROR_CLASS, OTS_MAX_ERROR_MESSAGE, ots_error_t};

use super::*;

fn native_error(code: i32, class: &str, message: &str) -> ots_error_t {
    let mut error = ots_error_t {
        code,
        message: [0; OTS_MAX_ERROR_MESSAGE],
        cls: [0; OTS_MAX_ERROR_CLASS],
    };
    for (slot, byte) in error.message.iter_mut().zip(message.bytes()) {
        *slot = byte as c_char;
    }
    for (slot, byte) in error.cls.iter_mut().zip(class.bytes()) {
        *slot = byte as c_char;
    }
    error
}

#[test]
fn test_foreign_error_is_verbatim() {
    let error = OtsError::from_native(&native_error(
        10,
        "ots::exception::address::Invalid",
        "Invalid address: ''",
    ));
    assert_eq!(error.code(), Some(10));
    assert_eq!(error.class(), Some("ots::exception::address::Invalid"));
    assert!(error.is_foreign());
    assert_eq!(error.to_string(), "ots::exception::address::Invalid (10): Invalid address: ''");
}

#[test]
fn test_full_buffer_without_terminator() {
    let mut error = native_error(1, "", "");
    error.cls = [b'x' as c_char; OTS_MAX_ERROR_CLASS];
    let error = OtsError::from_native(&error);
    assert_eq!(error.class().map(str::len), Some(OTS_MAX_ERROR_CLASS));
}

#[test]
fn test_local_errors_have_no_code() {
    assert_eq!(OtsError::StaleReference.code(), None);
    assert_eq!(OtsError::NotInJar.class(), None);
    assert!(!OtsError::ContextInUse.is_foreign());
}

#[test]
fn test_nul_error_conversion() {
    let error: OtsError = CString::new("a\0b").unwrap_err().into();
    assert!(matches!(error, OtsError::InvalidArgument(_)));
}

#[test]
fn test_config_error_conversion() {
    let error: OtsError = ConfigError::Invalid("bad".to_string()).into();
    assert_eq!(error.to_string(), "Configuration error: Invalid configuration: bad");
}

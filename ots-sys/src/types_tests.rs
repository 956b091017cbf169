//! Layout checks against the C header

use super::*;
use std::mem::{align_of, offset_of, size_of};

#[test]
fn test_error_layout() {
    assert_eq!(size_of::<ots_error_t>(), 4 + OTS_MAX_ERROR_MESSAGE + OTS_MAX_ERROR_CLASS);
    assert_eq!(offset_of!(ots_error_t, message), 4);
    assert_eq!(offset_of!(ots_error_t, cls), 4 + OTS_MAX_ERROR_MESSAGE);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_handle_layout() {
    assert_eq!(size_of::<ots_handle_t>(), 24);
    assert_eq!(align_of::<ots_handle_t>(), 8);
    assert_eq!(offset_of!(ots_handle_t, ptr), 8);
    assert_eq!(offset_of!(ots_handle_t, reference), 16);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_result_layout() {
    // The payload union is as large as its largest member, the data block
    assert_eq!(size_of::<ots_result_payload_t>(), 24);
    assert_eq!(offset_of!(ots_result_data_t, size), 8);
    assert_eq!(offset_of!(ots_result_data_t, type_), 16);
    assert_eq!(offset_of!(ots_result_data_t, reference), 20);

    assert_eq!(offset_of!(ots_result_t, type_), 24);
    assert_eq!(offset_of!(ots_result_t, error), 28);
    assert_eq!(size_of::<ots_result_t>(), 352);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_description_layout() {
    assert_eq!(size_of::<ots_flow_vector_t>(), 16);
    assert_eq!(offset_of!(ots_transfer_description_t, unlock_time), 24);
    assert_eq!(offset_of!(ots_transfer_description_t, dummy_outputs), 72);
    assert_eq!(offset_of!(ots_transfer_description_t, tx_extra), 80);
    assert_eq!(size_of::<ots_tx_description_t>(), 80);
}

#[test]
fn test_result_flags_are_distinct_bits() {
    let flags = [
        OTS_RESULT_HANDLE,
        OTS_RESULT_STRING,
        OTS_RESULT_BOOLEAN,
        OTS_RESULT_NUMBER,
        OTS_RESULT_COMPARISON,
        OTS_RESULT_ARRAY,
        OTS_RESULT_ADDRESS_TYPE,
        OTS_RESULT_NETWORK,
        OTS_RESULT_SEED_TYPE,
        OTS_RESULT_ADDRESS_INDEX,
    ];
    let mut seen = 0;
    for flag in flags {
        assert_eq!(flag.count_ones(), 1);
        assert_eq!(seen & flag, 0);
        seen |= flag;
    }
}

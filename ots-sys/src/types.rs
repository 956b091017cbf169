//! C layout mirrors of the OTS header types.
//!
//! C enums are declared as integer aliases plus constants so that a value the
//! library hands back which is not a known variant can never become an invalid
//! Rust enum.

#![allow(non_camel_case_types)]

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

use std::os::raw::{c_char, c_int, c_void};

/// Maximum length of an error message, including the terminating NUL.
pub const OTS_MAX_ERROR_MESSAGE: usize = 256;
/// Maximum length of an error class, including the terminating NUL.
pub const OTS_MAX_ERROR_CLASS: usize = 64;
/// Maximum length of a version string.
pub const OTS_MAX_VERSION_STRING: usize = 32;

pub const OTS_MONERO_SEED_WORDS: usize = 25;
pub const OTS_POLYSEED_WORDS: usize = 16;
pub const OTS_LEGACY_SEED_WORDS: usize = 13;

pub type OTS_NETWORK = c_int;
pub const OTS_NETWORK_MAIN: OTS_NETWORK = 0;
pub const OTS_NETWORK_TEST: OTS_NETWORK = 1;
pub const OTS_NETWORK_STAGE: OTS_NETWORK = 2;

pub type OTS_ADDRESS_TYPE = c_int;
pub const OTS_ADDRESS_TYPE_STANDARD: OTS_ADDRESS_TYPE = 0;
pub const OTS_ADDRESS_TYPE_SUBADDRESS: OTS_ADDRESS_TYPE = 1;
pub const OTS_ADDRESS_TYPE_INTEGRATED: OTS_ADDRESS_TYPE = 2;

pub type OTS_SEED_TYPE = c_int;
pub const OTS_SEED_TYPE_MONERO: OTS_SEED_TYPE = 0;
pub const OTS_SEED_TYPE_POLYSEED: OTS_SEED_TYPE = 1;

pub type ots_handle_type = c_int;
pub const OTS_HANDLE_INVALID: ots_handle_type = 0;
pub const OTS_HANDLE_WIPEABLE_STRING: ots_handle_type = 1;
pub const OTS_HANDLE_SEED_INDICES: ots_handle_type = 2;
pub const OTS_HANDLE_SEED_LANGUAGE: ots_handle_type = 3;
pub const OTS_HANDLE_ADDRESS: ots_handle_type = 4;
pub const OTS_HANDLE_SEED: ots_handle_type = 5;
pub const OTS_HANDLE_WALLET: ots_handle_type = 6;
pub const OTS_HANDLE_TX: ots_handle_type = 7;
pub const OTS_HANDLE_TX_DESCRIPTION: ots_handle_type = 8;
pub const OTS_HANDLE_TX_WARNING: ots_handle_type = 9;

/// Result payload kind. These are bit flags and a result may carry more than one.
pub type ots_result_type = c_int;
pub const OTS_RESULT_NONE: ots_result_type = 0;
pub const OTS_RESULT_HANDLE: ots_result_type = 1;
pub const OTS_RESULT_STRING: ots_result_type = 2;
pub const OTS_RESULT_BOOLEAN: ots_result_type = 4;
pub const OTS_RESULT_NUMBER: ots_result_type = 8;
pub const OTS_RESULT_COMPARISON: ots_result_type = 16;
pub const OTS_RESULT_ARRAY: ots_result_type = 32;
pub const OTS_RESULT_ADDRESS_TYPE: ots_result_type = 64;
pub const OTS_RESULT_NETWORK: ots_result_type = 128;
pub const OTS_RESULT_SEED_TYPE: ots_result_type = 256;
pub const OTS_RESULT_ADDRESS_INDEX: ots_result_type = 512;

pub type ots_data_type = c_int;
pub const OTS_DATA_INVALID: ots_data_type = 0;
pub const OTS_DATA_INT: ots_data_type = 1;
pub const OTS_DATA_CHAR: ots_data_type = 2;
pub const OTS_DATA_UINT8: ots_data_type = 3;
pub const OTS_DATA_UINT16: ots_data_type = 4;
pub const OTS_DATA_UINT32: ots_data_type = 5;
pub const OTS_DATA_UINT64: ots_data_type = 6;
pub const OTS_DATA_HANDLE: ots_data_type = 7;

/// Handle to a library object.
///
/// When `reference` is set the handle does not own `ptr` and freeing the
/// handle leaves the object alone.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_handle_t {
    pub type_: ots_handle_type,
    pub ptr: *mut c_void,
    pub reference: bool,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ots_error_t {
    /// 0 on success.
    pub code: i32,
    pub message: [c_char; OTS_MAX_ERROR_MESSAGE],
    pub cls: [c_char; OTS_MAX_ERROR_CLASS],
}

/// Array or binary payload of a result.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_result_data_t {
    pub ptr: *mut c_void,
    pub size: usize,
    pub type_: ots_data_type,
    pub reference: bool,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union ots_result_payload_t {
    pub handle: ots_handle_t,
    pub data: ots_result_data_t,
    pub boolean: bool,
    pub number: i64,
}

#[repr(C)]
pub struct ots_result_t {
    pub result: ots_result_payload_t,
    pub type_: ots_result_type,
    pub error: ots_error_t,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_flow_vector_t {
    pub address: *mut c_char,
    pub amount: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_transfer_description_t {
    pub amount_in: u64,
    pub amount_out: u64,
    pub ring_size: u32,
    pub unlock_time: u64,
    pub flows: *mut ots_flow_vector_t,
    pub flows_size: usize,
    /// Null when the transfer has no change output.
    pub change: *mut ots_flow_vector_t,
    pub fee: u64,
    pub payment_id: *mut c_char,
    pub dummy_outputs: u32,
    pub tx_extra: *mut c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_tx_description_t {
    pub tx_set: *mut c_char,
    pub tx_set_size: usize,
    pub amount_in: u64,
    pub amount_out: u64,
    pub flows: *mut ots_flow_vector_t,
    pub flows_size: usize,
    pub change: *mut ots_flow_vector_t,
    pub fee: u64,
    pub transfers: *mut ots_transfer_description_t,
    pub transfers_size: usize,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ots_tx_warning_t {
    pub message: *mut c_char,
    pub severity: u32,
}

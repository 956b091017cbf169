//! The OTS function table.
//!
//! Every function the bindings use is listed exactly once in the `ots_abi!`
//! invocation below. The list expands into the [`OtsAbi`] trait and, with the
//! `native` feature, into the `extern "C"` declarations and [`NativeAbi`], the
//! implementation that forwards to the linked library.
//!
//! All methods are `unsafe`: pointer arguments must satisfy the C contract of
//! the function of the same name in `ots.h`.

use std::os::raw::{c_char, c_int};

use crate::types::*;

macro_rules! ots_abi {
    ($(
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {
        /// Function table of the OTS library.
        ///
        /// Implemented by [`NativeAbi`] for the real library and by test doubles
        /// that simulate it.
        #[allow(clippy::missing_safety_doc, clippy::too_many_arguments)]
        pub trait OtsAbi {
            $(
                $(#[$meta])*
                unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)?;
            )*
        }

        #[cfg(feature = "native")]
        mod ffi {
            use super::*;

            unsafe extern "C" {
                $(
                    pub fn $name($($arg: $ty),*) $(-> $ret)?;
                )*
            }
        }

        #[cfg(feature = "native")]
        #[allow(clippy::too_many_arguments)]
        impl OtsAbi for NativeAbi {
            $(
                #[inline]
                unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    unsafe { ffi::$name($($arg),*) }
                }
            )*
        }
    };
}

/// The linked native library.
#[cfg(feature = "native")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAbi;

ots_abi! {
    // Results

    fn ots_is_error(result: *const ots_result_t) -> bool;
    fn ots_result_handle_is_reference(result: *const ots_result_t) -> bool;
    /// Marks the handle inside `result` as a reference and returns it.
    fn ots_result_handle(result: *mut ots_result_t) -> *mut ots_handle_t;
    /// Owned by the result.
    fn ots_result_string(result: *const ots_result_t) -> *const c_char;
    fn ots_result_boolean(result: *const ots_result_t, default_value: bool) -> bool;
    fn ots_result_number(result: *const ots_result_t, default_value: i64) -> i64;
    fn ots_result_comparison(result: *const ots_result_t) -> i64;
    fn ots_result_size(result: *const ots_result_t) -> usize;
    fn ots_result_data_is_type(result: *const ots_result_t, data_type: ots_data_type) -> bool;
    fn ots_result_data_is_reference(result: *const ots_result_t) -> bool;
    /// Takes element `index` out of a copy-semantics handle array.
    fn ots_result_array_get_handle(result: *const ots_result_t, index: usize) -> *mut ots_handle_t;
    fn ots_result_handle_array_reference(result: *const ots_result_t) -> *mut ots_handle_t;
    fn ots_result_int_array_reference(result: *const ots_result_t) -> *mut c_int;
    fn ots_result_uint8_array_reference(result: *const ots_result_t) -> *mut u8;
    fn ots_result_char_array_reference(result: *const ots_result_t) -> *mut c_char;
    fn ots_result_address_type_is_type(
        result: *const ots_result_t,
        address_type: OTS_ADDRESS_TYPE,
    ) -> bool;
    fn ots_result_address_index_account(result: *const ots_result_t) -> u32;
    fn ots_result_address_index_index(result: *const ots_result_t) -> u32;
    fn ots_result_network_is_type(result: *const ots_result_t, network: OTS_NETWORK) -> bool;
    fn ots_result_seed_type_is_type(result: *const ots_result_t, seed_type: OTS_SEED_TYPE) -> bool;

    // Releasing memory. Each takes the slot and nulls it.

    fn ots_free_string(string: *mut *mut c_char);
    fn ots_free_result(result: *mut *mut ots_result_t);
    fn ots_free_handle(handle: *mut *mut ots_handle_t);
    fn ots_free_tx_description(tx_description: *mut *mut ots_tx_description_t);

    // Wipeable string

    fn ots_wipeable_string_create(string: *const c_char) -> *mut ots_result_t;
    fn ots_wipeable_string_compare(
        string1: *const ots_handle_t,
        string2: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_wipeable_string_c_str(string: *const ots_handle_t) -> *const c_char;

    // Seed indices

    fn ots_seed_indices_create(indices: *const u16, size: usize) -> *mut ots_result_t;
    fn ots_seed_indices_create_from_string(
        string: *const c_char,
        separator: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_create_from_hex(
        hex: *const c_char,
        separator: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_values(handle: *const ots_handle_t) -> *const u16;
    fn ots_seed_indices_count(handle: *const ots_handle_t) -> usize;
    fn ots_seed_indices_clear(handle: *const ots_handle_t);
    fn ots_seed_indices_append(handle: *const ots_handle_t, value: u16);
    /// Caller frees with `ots_free_string`.
    fn ots_seed_indices_numeric(
        handle: *const ots_handle_t,
        separator: *const c_char,
    ) -> *mut c_char;
    /// Caller frees with `ots_free_string`.
    fn ots_seed_indices_hex(handle: *const ots_handle_t, separator: *const c_char) -> *mut c_char;
    fn ots_seed_indices_merge_values(
        seed_indices1: *const ots_handle_t,
        seed_indices2: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_merge_with_password(
        seed_indices: *const ots_handle_t,
        password: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_merge_multiple_values(
        seed_indices: *const *const ots_handle_t,
        elements: usize,
        count: usize,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_merge_values_and_zero(
        seed_indices1: *const ots_handle_t,
        seed_indices2: *const ots_handle_t,
        delete_after: bool,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_merge_with_password_and_zero(
        seed_indices: *const ots_handle_t,
        password: *const c_char,
        delete_after: bool,
    ) -> *mut ots_result_t;
    fn ots_seed_indices_merge_multiple_values_and_zero(
        seed_indices: *const *const ots_handle_t,
        elements: usize,
        count: usize,
        delete_after: bool,
    ) -> *mut ots_result_t;

    // Seed languages

    fn ots_seed_languages() -> *mut ots_result_t;
    fn ots_seed_languages_for_type(seed_type: OTS_SEED_TYPE) -> *mut ots_result_t;
    fn ots_seed_language_default(seed_type: OTS_SEED_TYPE) -> *mut ots_result_t;
    fn ots_seed_language_set_default(
        seed_type: OTS_SEED_TYPE,
        language: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_seed_language_from_code(code: *const c_char) -> *mut ots_result_t;
    fn ots_seed_language_from_name(name: *const c_char) -> *mut ots_result_t;
    fn ots_seed_language_from_english_name(name: *const c_char) -> *mut ots_result_t;
    fn ots_seed_language_code(language: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_language_name(language: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_language_english_name(language: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_language_supported(
        language: *const ots_handle_t,
        seed_type: OTS_SEED_TYPE,
    ) -> *mut ots_result_t;
    fn ots_seed_language_is_default(
        language: *const ots_handle_t,
        seed_type: OTS_SEED_TYPE,
    ) -> *mut ots_result_t;
    fn ots_seed_language_equals(
        language1: *const ots_handle_t,
        language2: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_seed_language_equals_code(
        language: *const ots_handle_t,
        code: *const c_char,
    ) -> *mut ots_result_t;

    // Seeds

    fn ots_seed_phrase(
        seed: *const ots_handle_t,
        language: *const ots_handle_t,
        password: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_phrase_for_language_code(
        seed: *const ots_handle_t,
        language_code: *const c_char,
        password: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_indices(seed: *const ots_handle_t, password: *const c_char) -> *mut ots_result_t;
    fn ots_seed_fingerprint(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_is_legacy(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_type(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_address(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_timestamp(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_height(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_network(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_wallet(seed: *const ots_handle_t) -> *mut ots_result_t;

    fn ots_legacy_seed_decode(
        phrase: *const c_char,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t;
    fn ots_legacy_seed_decode_indices(
        indices: *const ots_handle_t,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t;
    /// `random` points to 32 bytes.
    fn ots_monero_seed_create(
        random: *const u8,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
    ) -> *mut ots_result_t;
    fn ots_monero_seed_generate(height: u64, time: u64, network: OTS_NETWORK) -> *mut ots_result_t;
    fn ots_monero_seed_decode(
        phrase: *const c_char,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_monero_seed_decode_indices(
        indices: *const ots_handle_t,
        height: u64,
        time: u64,
        network: OTS_NETWORK,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    /// `random` points to 19 bytes.
    fn ots_polyseed_create(
        random: *const u8,
        network: OTS_NETWORK,
        time: u64,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_generate(
        network: OTS_NETWORK,
        time: u64,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_decode(
        phrase: *const c_char,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_decode_indices(
        indices: *const ots_handle_t,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_decode_with_language(
        phrase: *const c_char,
        language: *const ots_handle_t,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_decode_with_language_code(
        phrase: *const c_char,
        language_code: *const c_char,
        network: OTS_NETWORK,
        password: *const c_char,
        passphrase: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_polyseed_convert_to_monero_seed(polyseed: *const ots_handle_t) -> *mut ots_result_t;

    // Addresses

    fn ots_address_create(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_type(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_network(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_fingerprint(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_is_integrated(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_payment_id(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_from_integrated(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_length(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_base58_string(address: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_address_equal(
        address1: *const ots_handle_t,
        address2: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_address_equal_string(
        address: *const ots_handle_t,
        address_string: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_address_string_valid(address: *const c_char, network: OTS_NETWORK) -> *mut ots_result_t;
    fn ots_address_string_network(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_string_type(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_string_fingerprint(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_string_is_integrated(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_string_payment_id(address: *const c_char) -> *mut ots_result_t;
    fn ots_address_string_integrated(address: *const c_char) -> *mut ots_result_t;

    // Wallets

    /// `key` points to 32 bytes.
    fn ots_wallet_create(key: *const u8, height: u64, network: OTS_NETWORK) -> *mut ots_result_t;
    fn ots_wallet_height(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_address(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_subaddress(
        wallet: *const ots_handle_t,
        account: u32,
        index: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_accounts(wallet: *const ots_handle_t, max: u32, offset: u32) -> *mut ots_result_t;
    fn ots_wallet_subaddresses(
        wallet: *const ots_handle_t,
        account: u32,
        max: u32,
        offset: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_has_address(
        wallet: *const ots_handle_t,
        address: *const ots_handle_t,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_has_address_string(
        wallet: *const ots_handle_t,
        address: *const c_char,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_address_index(
        wallet: *const ots_handle_t,
        address: *const ots_handle_t,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_address_string_index(
        wallet: *const ots_handle_t,
        address: *const c_char,
        max_account_depth: u32,
        max_index_depth: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_secret_view_key(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_public_view_key(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_secret_spend_key(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_public_spend_key(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_import_outputs(
        wallet: *const ots_handle_t,
        outputs: *const c_char,
        outputs_size: usize,
    ) -> *mut ots_result_t;
    fn ots_wallet_export_key_images(wallet: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_wallet_describe_tx(
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t;
    /// `unsigned_tx` is a transaction description handle.
    fn ots_wallet_check_tx(
        wallet: *const ots_handle_t,
        unsigned_tx: *const ots_handle_t,
    ) -> *mut ots_result_t;
    fn ots_wallet_check_tx_string(
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t;
    fn ots_wallet_sign_transaction(
        wallet: *const ots_handle_t,
        unsigned_tx: *const c_char,
        unsigned_tx_size: usize,
    ) -> *mut ots_result_t;
    fn ots_wallet_sign_data(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
    ) -> *mut ots_result_t;
    fn ots_wallet_sign_data_with_index(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        account: u32,
        subaddr: u32,
    ) -> *mut ots_result_t;
    fn ots_wallet_sign_data_with_address_string(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_wallet_verify_data(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        signature: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t;
    fn ots_wallet_verify_data_with_index(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        account: u32,
        subaddr: u32,
        signature: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t;
    fn ots_wallet_verify_data_with_address_string(
        wallet: *const ots_handle_t,
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
        signature: *const c_char,
        legacy_fallback: bool,
    ) -> *mut ots_result_t;

    // Transaction descriptions

    /// Snapshot owned by the caller, release with `ots_free_tx_description`.
    fn ots_tx_description(tx_description: *const ots_handle_t) -> *mut ots_tx_description_t;

    // Seed jar

    /// Marks `seed` reference-only. The result references the same object,
    /// which now belongs to the jar.
    fn ots_seed_jar_add_seed(seed: *mut ots_handle_t, name: *const c_char) -> *mut ots_result_t;
    /// Wipes the seed and frees `*seed`.
    fn ots_seed_jar_remove_seed(seed: *mut *mut ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_jar_purge_seed_for_index(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_purge_seed_for_name(name: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_purge_seed_for_fingerprint(fingerprint: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_purge_seed_for_address(address: *const c_char) -> *mut ots_result_t;
    /// Frees `*seed` and nulls the slot on success.
    fn ots_seed_jar_transfer_seed_in(
        seed: *mut *mut ots_handle_t,
        name: *const c_char,
    ) -> *mut ots_result_t;
    /// Frees `*seed`. The result owns the seed that was in the jar.
    fn ots_seed_jar_transfer_seed_out(seed: *mut *mut ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_jar_transfer_seed_out_for_index(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_transfer_seed_out_for_name(name: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_transfer_seed_out_for_fingerprint(
        fingerprint: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_jar_transfer_seed_out_for_address(address: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_clear() -> *mut ots_result_t;
    fn ots_seed_jar_seeds() -> *mut ots_result_t;
    fn ots_seed_jar_seed_count() -> *mut ots_result_t;
    fn ots_seed_jar_seed_for_index(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_seed_for_fingerprint(fingerprint: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_seed_for_address(address: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_seed_for_name(name: *const c_char) -> *mut ots_result_t;
    fn ots_seed_jar_seed_name(seed: *const ots_handle_t) -> *mut ots_result_t;
    fn ots_seed_jar_seed_rename(
        seed: *const ots_handle_t,
        name: *const c_char,
    ) -> *mut ots_result_t;
    fn ots_seed_jar_item_name(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_fingerprint(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_address(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_address_string(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_seed_type(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_seed_type_string(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_is_legacy(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_network(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_network_string(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_height(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_timestamp(index: usize) -> *mut ots_result_t;
    fn ots_seed_jar_item_wallet(index: usize) -> *mut ots_result_t;

    // Library utilities

    fn ots_version() -> *mut ots_result_t;
    fn ots_version_components() -> *mut ots_result_t;
    fn ots_height_from_timestamp(timestamp: u64, network: OTS_NETWORK) -> *mut ots_result_t;
    fn ots_timestamp_from_height(height: u64, network: OTS_NETWORK) -> *mut ots_result_t;
    fn ots_random_bytes(size: usize) -> *mut ots_result_t;
    fn ots_random_32() -> *mut ots_result_t;
    fn ots_check_low_entropy(data: *const u8, size: usize, min_entropy: f64) -> *mut ots_result_t;
    fn ots_entropy_level(data: *const u8, size: usize) -> *mut ots_result_t;
    fn ots_set_enforce_entropy(enforce: bool);
    fn ots_set_enforce_entropy_level(level: f64);
    fn ots_set_max_account_depth(depth: u32);
    fn ots_set_max_index_depth(depth: u32);
    fn ots_set_max_depth(account_depth: u32, index_depth: u32);
    fn ots_reset_max_depth();
    /// Returns `depth` unless it is 0, in which case the configured maximum.
    fn ots_get_max_account_depth(depth: u32) -> u32;
    /// Returns `depth` unless it is 0, in which case the configured maximum.
    fn ots_get_max_index_depth(depth: u32) -> u32;
    fn ots_verify_data(
        data: *const c_char,
        data_size: usize,
        address: *const c_char,
        signature: *const c_char,
    ) -> *mut ots_result_t;
}

//! Results of library calls.
//!
//! Every library call returns an `ots_result_t`. [`ForeignResult`] owns one
//! and frees it exactly once. [`ForeignResult::check`] turns a failed result
//! into an [`OtsError`] and a successful one into a [`ResultValue`], whose
//! typed accessors panic when the payload kind does not match: reading the
//! wrong kind is a bug in the caller, not a runtime condition.

use std::cmp::Ordering;
use std::fmt;
use std::os::raw::c_int;
use std::ptr;
use std::rc::Rc;
use std::slice;

use bitflags::bitflags;
use ots_sys::*;
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{OtsError, OtsResult};
use crate::handle::{BorrowedHandle, ForeignHandle, OwnedHandle};
use crate::types::{AddressIndex, AddressType, Network, SeedType};

/// Shared function table every object calls through.
pub(crate) type Abi = Rc<dyn OtsAbi>;

bitflags! {
    /// Payload bits of `ots_result_t::type_`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResultFlags: c_int {
        const HANDLE = OTS_RESULT_HANDLE;
        const STRING = OTS_RESULT_STRING;
        const BOOLEAN = OTS_RESULT_BOOLEAN;
        const NUMBER = OTS_RESULT_NUMBER;
        const COMPARISON = OTS_RESULT_COMPARISON;
        const ARRAY = OTS_RESULT_ARRAY;
        const ADDRESS_TYPE = OTS_RESULT_ADDRESS_TYPE;
        const NETWORK = OTS_RESULT_NETWORK;
        const SEED_TYPE = OTS_RESULT_SEED_TYPE;
        const ADDRESS_INDEX = OTS_RESULT_ADDRESS_INDEX;
    }
}

/// Kind of payload a result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    None,
    Handle,
    String,
    Boolean,
    Number,
    Comparison,
    Array,
    AddressType,
    Network,
    SeedType,
    AddressIndex,
}

impl ResultKind {
    const BY_FLAG: [(ResultFlags, ResultKind); 10] = [
        (ResultFlags::HANDLE, ResultKind::Handle),
        (ResultFlags::STRING, ResultKind::String),
        (ResultFlags::BOOLEAN, ResultKind::Boolean),
        (ResultFlags::NUMBER, ResultKind::Number),
        (ResultFlags::COMPARISON, ResultKind::Comparison),
        (ResultFlags::ARRAY, ResultKind::Array),
        (ResultFlags::ADDRESS_TYPE, ResultKind::AddressType),
        (ResultFlags::NETWORK, ResultKind::Network),
        (ResultFlags::SEED_TYPE, ResultKind::SeedType),
        (ResultFlags::ADDRESS_INDEX, ResultKind::AddressIndex),
    ];

    pub fn from_raw(raw: ots_result_type) -> Self {
        let flags = ResultFlags::from_bits_truncate(raw);
        Self::BY_FLAG
            .iter()
            .find(|(flag, _)| flags.contains(*flag))
            .map(|(_, kind)| *kind)
            .unwrap_or(ResultKind::None)
    }
}

/// Owner of one `ots_result_t`.
pub struct ForeignResult {
    abi: Abi,
    ptr: *mut ots_result_t,
}

impl ForeignResult {
    /// Take ownership of a freshly returned result.
    ///
    /// # Panics
    ///
    /// If the library returned a null result.
    pub(crate) fn new(abi: &Abi, raw: *mut ots_result_t) -> Self {
        assert!(!raw.is_null(), "library returned a null result");
        ForeignResult {
            abi: Rc::clone(abi),
            ptr: raw,
        }
    }

    fn live(&self) -> *mut ots_result_t {
        assert!(!self.ptr.is_null(), "use of a released result");
        self.ptr
    }

    pub fn kind(&self) -> ResultKind {
        ResultKind::from_raw(unsafe { (*self.live()).type_ })
    }

    pub fn is_error(&self) -> bool {
        unsafe { self.abi.ots_is_error(self.live()) }
    }

    /// The translated error, if the call failed.
    pub fn error(&self) -> Option<OtsError> {
        if !self.is_error() {
            return None;
        }
        Some(OtsError::from_native(unsafe { &(*self.live()).error }))
    }

    /// Consume the result, yielding its payload or the library error.
    pub fn check(self) -> OtsResult<ResultValue> {
        match self.error() {
            Some(error) => Err(error),
            None => Ok(ResultValue {
                result: self,
            }),
        }
    }

    /// Free the result. Later calls do nothing.
    pub fn release(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        unsafe { self.abi.ots_free_result(&mut self.ptr) };
        self.ptr = ptr::null_mut();
        trace!("released result");
    }

    pub fn is_released(&self) -> bool {
        self.ptr.is_null()
    }
}

impl Drop for ForeignResult {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ForeignResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            return f.write_str("ForeignResult(released)");
        }
        f.debug_struct("ForeignResult")
            .field("kind", &self.kind())
            .field("error", &self.is_error())
            .finish()
    }
}

/// Call into the library and check the returned result.
pub(crate) fn call(abi: &Abi, raw: *mut ots_result_t) -> OtsResult<ResultValue> {
    ForeignResult::new(abi, raw).check()
}

/// Payload of a successful result.
#[derive(Debug)]
pub struct ResultValue {
    result: ForeignResult,
}

impl ResultValue {
    pub fn kind(&self) -> ResultKind {
        self.result.kind()
    }

    fn abi(&self) -> &dyn OtsAbi {
        self.result.abi.as_ref()
    }

    fn expect(&self, kind: ResultKind) -> *mut ots_result_t {
        let actual = self.kind();
        assert_eq!(actual, kind, "expected a {:?} result, got {:?}", kind, actual);
        self.result.live()
    }

    /// Take the handle out of the result.
    ///
    /// Owned handles are detached and outlive the result. Borrowed handles
    /// point into the result, which then stays alive as long as the view.
    pub fn into_handle(self) -> ForeignHandle {
        let raw = self.expect(ResultKind::Handle);
        let borrowed = unsafe { self.abi().ots_result_handle_is_reference(raw) };
        let handle = unsafe { self.abi().ots_result_handle(raw) };
        assert!(!handle.is_null(), "library returned a null handle");
        let abi = Rc::clone(&self.result.abi);
        if borrowed {
            ForeignHandle::Borrowed(BorrowedHandle::anchored(&abi, handle, Rc::new(self.result)))
        } else {
            ForeignHandle::Owned(unsafe { OwnedHandle::from_raw(&abi, handle) })
        }
    }

    /// Take every handle out of an array result.
    pub fn into_handles(self) -> Vec<ForeignHandle> {
        let raw = self.expect(ResultKind::Array);
        let abi = Rc::clone(&self.result.abi);
        unsafe {
            assert!(abi.ots_result_data_is_type(raw, OTS_DATA_HANDLE), "expected a handle array");
            let size = abi.ots_result_size(raw);
            if abi.ots_result_data_is_reference(raw) {
                let base = abi.ots_result_handle_array_reference(raw);
                assert!(size == 0 || !base.is_null(), "library returned a null handle array");
                let anchor = Rc::new(self.result);
                (0..size)
                    .map(|i| BorrowedHandle::anchored(&abi, base.add(i), Rc::clone(&anchor)))
                    .map(ForeignHandle::Borrowed)
                    .collect()
            } else {
                (0..size)
                    .map(|i| {
                        let handle = abi.ots_result_array_get_handle(raw, i);
                        assert!(!handle.is_null(), "library returned a null handle");
                        ForeignHandle::Owned(OwnedHandle::from_raw(&abi, handle))
                    })
                    .collect()
            }
        }
    }

    fn text_bytes(&self) -> &[u8] {
        let raw = self.expect(ResultKind::String);
        unsafe {
            let text = self.abi().ots_result_string(raw);
            let size = self.abi().ots_result_size(raw);
            if text.is_null() {
                return &[];
            }
            slice::from_raw_parts(text as *const u8, size)
        }
    }

    pub fn string(&self) -> OtsResult<String> {
        Ok(std::str::from_utf8(self.text_bytes())?.to_owned())
    }

    /// String payload that is wiped from memory when dropped.
    pub fn secret_string(&self) -> OtsResult<Zeroizing<String>> {
        Ok(Zeroizing::new(std::str::from_utf8(self.text_bytes())?.to_owned()))
    }

    pub fn boolean(&self) -> bool {
        let raw = self.expect(ResultKind::Boolean);
        unsafe { self.abi().ots_result_boolean(raw, false) }
    }

    pub fn number(&self) -> i64 {
        let raw = self.expect(ResultKind::Number);
        unsafe { self.abi().ots_result_number(raw, 0) }
    }

    pub fn unsigned(&self) -> u64 {
        let number = self.number();
        u64::try_from(number)
            .unwrap_or_else(|_| panic!("library returned a negative count {}", number))
    }

    pub fn comparison(&self) -> Ordering {
        let raw = self.expect(ResultKind::Comparison);
        unsafe { self.abi().ots_result_comparison(raw) }.cmp(&0)
    }

    pub fn network(&self) -> Network {
        let raw = self.expect(ResultKind::Network);
        Network::ALL
            .into_iter()
            .find(|n| unsafe { self.abi().ots_result_network_is_type(raw, n.to_raw()) })
            .unwrap_or_else(|| panic!("library returned an unknown network"))
    }

    pub fn address_type(&self) -> AddressType {
        let raw = self.expect(ResultKind::AddressType);
        AddressType::ALL
            .into_iter()
            .find(|t| unsafe { self.abi().ots_result_address_type_is_type(raw, t.to_raw()) })
            .unwrap_or_else(|| panic!("library returned an unknown address type"))
    }

    pub fn seed_type(&self) -> SeedType {
        let raw = self.expect(ResultKind::SeedType);
        SeedType::ALL
            .into_iter()
            .find(|t| unsafe { self.abi().ots_result_seed_type_is_type(raw, t.to_raw()) })
            .unwrap_or_else(|| panic!("library returned an unknown seed type"))
    }

    pub fn address_index(&self) -> AddressIndex {
        let raw = self.expect(ResultKind::AddressIndex);
        unsafe {
            AddressIndex::new(
                self.abi().ots_result_address_index_account(raw),
                self.abi().ots_result_address_index_index(raw),
            )
        }
    }

    /// Binary payload of a `uint8` or `char` array.
    pub fn bytes(&self) -> Vec<u8> {
        let raw = self.expect(ResultKind::Array);
        unsafe {
            let abi = self.abi();
            let data = if abi.ots_result_data_is_type(raw, OTS_DATA_UINT8) {
                abi.ots_result_uint8_array_reference(raw) as *const u8
            } else if abi.ots_result_data_is_type(raw, OTS_DATA_CHAR) {
                abi.ots_result_char_array_reference(raw) as *const u8
            } else {
                panic!("expected a byte array");
            };
            let size = abi.ots_result_size(raw);
            if data.is_null() || size == 0 {
                return Vec::new();
            }
            slice::from_raw_parts(data, size).to_vec()
        }
    }

    pub fn secret_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.bytes())
    }

    pub fn ints(&self) -> Vec<i32> {
        let raw = self.expect(ResultKind::Array);
        unsafe {
            let abi = self.abi();
            assert!(abi.ots_result_data_is_type(raw, OTS_DATA_INT), "expected an int array");
            let data = abi.ots_result_int_array_reference(raw);
            let size = abi.ots_result_size(raw);
            if data.is_null() || size == 0 {
                return Vec::new();
            }
            slice::from_raw_parts(data, size).to_vec()
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;

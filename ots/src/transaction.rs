//! Unsigned transaction descriptions and warnings.
//!
//! [`Wallet::describe_tx`](crate::Wallet::describe_tx) asks the library what
//! an unsigned transaction set would do. The answer is copied out of a
//! library snapshot into the plain structs below, and the snapshot is freed
//! before they are returned. [`TxWarning`]s are copied out the same way.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::slice;

use ots_sys::{
    ots_flow_vector_t, ots_transfer_description_t, ots_tx_description_t, ots_tx_warning_t,
};
use tracing::trace;

use crate::error::OtsResult;
use crate::handle::{ForeignHandle, HandleKind};
use crate::result::Abi;

/// An amount sent to an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flow {
    pub address: String,
    pub amount: u64,
}

/// One transfer of a transaction set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub amount_in: u64,
    pub amount_out: u64,
    pub ring_size: u32,
    pub unlock_time: u64,
    pub flows: Vec<Flow>,
    pub change: Option<Flow>,
    pub fee: u64,
    pub payment_id: String,
    pub dummy_outputs: u32,
    pub tx_extra: String,
}

/// What an unsigned transaction set spends and where the money goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDescription {
    /// The transaction set the description was made from.
    pub tx_set: Vec<u8>,
    pub amount_in: u64,
    pub amount_out: u64,
    pub flows: Vec<Flow>,
    pub change: Option<Flow>,
    pub fee: u64,
    pub transfers: Vec<Transfer>,
}

impl TxDescription {
    /// Total of all outputs that leave the wallet, change excluded.
    pub fn amount_sent(&self) -> u64 {
        self.flows.iter().map(|flow| flow.amount).sum()
    }

    /// Read the description behind `handle` and release the handle.
    pub(crate) fn from_handle(handle: ForeignHandle) -> OtsResult<Self> {
        Self::read(&handle.expect_kind(HandleKind::TxDescription))
    }

    /// Read and free a snapshot of the description behind `handle`.
    pub(crate) fn read(handle: &ForeignHandle) -> OtsResult<Self> {
        assert_eq!(handle.kind(), HandleKind::TxDescription, "expected a TxDescription handle");
        let abi = handle.abi();
        let snapshot = Snapshot {
            abi,
            ptr: unsafe { abi.ots_tx_description(handle.as_ptr()?) },
        };
        assert!(!snapshot.ptr.is_null(), "library returned a null transaction description");
        unsafe { snapshot.read() }
    }
}

/// Something about a transaction a signer should look at first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxWarning {
    pub message: String,
    pub severity: u32,
}

impl TxWarning {
    pub(crate) fn from_handle(handle: &ForeignHandle) -> OtsResult<Self> {
        assert_eq!(handle.kind(), HandleKind::TxWarning, "expected a TxWarning handle");
        let raw = unsafe { &*((*handle.as_ptr()?).ptr as *const ots_tx_warning_t) };
        Ok(TxWarning {
            message: unsafe { text(raw.message) }?,
            severity: raw.severity,
        })
    }

    /// Copy out every warning of a check result. The handles are released.
    pub(crate) fn from_handles(handles: Vec<ForeignHandle>) -> OtsResult<Vec<Self>> {
        handles.iter().map(TxWarning::from_handle).collect()
    }
}

/// Frees the snapshot however reading it ends.
struct Snapshot<'a> {
    abi: &'a Abi,
    ptr: *mut ots_tx_description_t,
}

impl Snapshot<'_> {
    unsafe fn read(&self) -> OtsResult<TxDescription> {
        let raw = unsafe { &*self.ptr };
        let transfers = unsafe { array(raw.transfers, raw.transfers_size) };
        Ok(TxDescription {
            tx_set: unsafe { array(raw.tx_set as *const u8, raw.tx_set_size) }.to_vec(),
            amount_in: raw.amount_in,
            amount_out: raw.amount_out,
            flows: unsafe { flows(raw.flows, raw.flows_size) }?,
            change: unsafe { change(raw.change) }?,
            fee: raw.fee,
            transfers: transfers
                .iter()
                .map(|t| unsafe { transfer(t) })
                .collect::<OtsResult<_>>()?,
        })
    }
}

impl Drop for Snapshot<'_> {
    fn drop(&mut self) {
        unsafe { self.abi.ots_free_tx_description(&mut self.ptr) };
        trace!("released transaction description");
    }
}

unsafe fn array<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        return &[];
    }
    unsafe { slice::from_raw_parts(ptr, len) }
}

unsafe fn text(ptr: *const c_char) -> OtsResult<String> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_str()?.to_owned())
}

unsafe fn flow(raw: &ots_flow_vector_t) -> OtsResult<Flow> {
    Ok(Flow {
        address: unsafe { text(raw.address) }?,
        amount: raw.amount,
    })
}

unsafe fn flows(ptr: *const ots_flow_vector_t, len: usize) -> OtsResult<Vec<Flow>> {
    unsafe { array(ptr, len) }.iter().map(|f| unsafe { flow(f) }).collect()
}

unsafe fn change(ptr: *const ots_flow_vector_t) -> OtsResult<Option<Flow>> {
    if ptr.is_null() {
        return Ok(None);
    }
    Ok(Some(unsafe { flow(&*ptr) }?))
}

unsafe fn transfer(raw: &ots_transfer_description_t) -> OtsResult<Transfer> {
    Ok(Transfer {
        amount_in: raw.amount_in,
        amount_out: raw.amount_out,
        ring_size: raw.ring_size,
        unlock_time: raw.unlock_time,
        flows: unsafe { flows(raw.flows, raw.flows_size) }?,
        change: unsafe { change(raw.change) }?,
        fee: raw.fee,
        payment_id: unsafe { text(raw.payment_id) }?,
        dummy_outputs: raw.dummy_outputs,
        tx_extra: unsafe { text(raw.tx_extra) }?,
    })
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;

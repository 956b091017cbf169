//! Handles to library objects.
//!
//! A handle is either owned ([`OwnedHandle`]), in which case dropping it
//! frees the object exactly once, or borrowed ([`BorrowedHandle`]), in which
//! case it is a view whose object belongs to someone else (the seed jar, or
//! the result an array was read from) and is never freed through it.

use std::fmt;
use std::ptr;
use std::rc::Rc;

use ots_sys::*;
use tracing::debug;

use crate::address::Address;
use crate::error::{OtsError, OtsResult};
use crate::lease::Lease;
use crate::result::{Abi, ForeignResult};
use crate::seed::Seed;
use crate::seed_indices::SeedIndices;
use crate::seed_language::SeedLanguage;
use crate::wallet::Wallet;
use crate::wipeable_string::WipeableString;

/// Type tag of a library object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Invalid,
    WipeableString,
    SeedIndices,
    SeedLanguage,
    Address,
    Seed,
    Wallet,
    Tx,
    TxDescription,
    TxWarning,
}

impl HandleKind {
    pub fn from_raw(raw: ots_handle_type) -> Self {
        match raw {
            OTS_HANDLE_WIPEABLE_STRING => HandleKind::WipeableString,
            OTS_HANDLE_SEED_INDICES => HandleKind::SeedIndices,
            OTS_HANDLE_SEED_LANGUAGE => HandleKind::SeedLanguage,
            OTS_HANDLE_ADDRESS => HandleKind::Address,
            OTS_HANDLE_SEED => HandleKind::Seed,
            OTS_HANDLE_WALLET => HandleKind::Wallet,
            OTS_HANDLE_TX => HandleKind::Tx,
            OTS_HANDLE_TX_DESCRIPTION => HandleKind::TxDescription,
            OTS_HANDLE_TX_WARNING => HandleKind::TxWarning,
            _ => HandleKind::Invalid,
        }
    }

    pub fn to_raw(self) -> ots_handle_type {
        match self {
            HandleKind::Invalid => OTS_HANDLE_INVALID,
            HandleKind::WipeableString => OTS_HANDLE_WIPEABLE_STRING,
            HandleKind::SeedIndices => OTS_HANDLE_SEED_INDICES,
            HandleKind::SeedLanguage => OTS_HANDLE_SEED_LANGUAGE,
            HandleKind::Address => OTS_HANDLE_ADDRESS,
            HandleKind::Seed => OTS_HANDLE_SEED,
            HandleKind::Wallet => OTS_HANDLE_WALLET,
            HandleKind::Tx => OTS_HANDLE_TX,
            HandleKind::TxDescription => OTS_HANDLE_TX_DESCRIPTION,
            HandleKind::TxWarning => OTS_HANDLE_TX_WARNING,
        }
    }
}

/// Sole owner of a library object.
///
/// A handle the seed jar downgraded to reference-only still frees its handle
/// allocation, but the object behind it belongs to the jar. Such a handle
/// carries a lease and fails like any other jar view once revoked.
pub struct OwnedHandle {
    abi: Abi,
    ptr: *mut ots_handle_t,
    kind: HandleKind,
    lease: Option<Lease>,
}

impl OwnedHandle {
    /// # Safety
    ///
    /// `ptr` must be a handle allocation nobody else frees.
    pub(crate) unsafe fn from_raw(abi: &Abi, ptr: *mut ots_handle_t) -> Self {
        assert!(!ptr.is_null(), "library returned a null handle");
        OwnedHandle {
            abi: Rc::clone(abi),
            kind: HandleKind::from_raw(unsafe { (*ptr).type_ }),
            ptr,
            lease: None,
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Whether the library marked this handle reference-only.
    pub(crate) fn is_reference(&self) -> bool {
        !self.ptr.is_null() && unsafe { (*self.ptr).reference }
    }

    /// Whether the jar revoked the object behind this handle.
    pub fn is_stale(&self) -> bool {
        self.lease.as_ref().is_some_and(|lease| !lease.is_valid())
    }

    /// # Panics
    ///
    /// If the handle was already released.
    pub fn as_ptr(&self) -> *const ots_handle_t {
        assert!(!self.ptr.is_null(), "use of a released {:?} handle", self.kind);
        self.ptr
    }

    /// Free the object. Later calls do nothing.
    pub fn release(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        unsafe { self.abi.ots_free_handle(&mut self.ptr) };
        self.ptr = ptr::null_mut();
        debug!(kind = ?self.kind, "released owned handle");
    }

    pub fn is_released(&self) -> bool {
        self.ptr.is_null()
    }

    /// Hand the slot to a call that may take the object over.
    ///
    /// A call that takes ownership nulls the slot. Whatever is left in it
    /// afterwards is freed as usual.
    pub(crate) fn consume_with<R>(
        mut self,
        f: impl FnOnce(*mut *mut ots_handle_t) -> R,
    ) -> R {
        assert!(!self.ptr.is_null(), "use of a released {:?} handle", self.kind);
        f(&mut self.ptr)
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for OwnedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("OwnedHandle");
        debug.field("kind", &self.kind).field("released", &self.is_released());
        if self.lease.is_some() {
            debug.field("stale", &self.is_stale());
        }
        debug.finish()
    }
}

/// View of an object owned elsewhere. Never frees anything.
pub struct BorrowedHandle {
    abi: Abi,
    ptr: *mut ots_handle_t,
    kind: HandleKind,
    anchor: Option<Rc<ForeignResult>>,
    lease: Option<Lease>,
}

impl BorrowedHandle {
    /// View a handle living inside `anchor`, keeping the result alive.
    pub(crate) fn anchored(
        abi: &Abi,
        ptr: *mut ots_handle_t,
        anchor: Rc<ForeignResult>,
    ) -> Self {
        assert!(!ptr.is_null(), "library returned a null handle");
        BorrowedHandle {
            abi: Rc::clone(abi),
            kind: HandleKind::from_raw(unsafe { (*ptr).type_ }),
            ptr,
            anchor: Some(anchor),
            lease: None,
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Whether the owner revoked this view.
    pub fn is_stale(&self) -> bool {
        self.lease.as_ref().is_some_and(|lease| !lease.is_valid())
    }

    pub fn as_ptr(&self) -> OtsResult<*const ots_handle_t> {
        if self.is_stale() {
            return Err(OtsError::StaleReference);
        }
        Ok(self.ptr)
    }
}

impl fmt::Debug for BorrowedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowedHandle")
            .field("kind", &self.kind)
            .field("anchored", &self.anchor.is_some())
            .field("stale", &self.is_stale())
            .finish()
    }
}

/// Owned or borrowed handle to a library object.
#[derive(Debug)]
pub enum ForeignHandle {
    Owned(OwnedHandle),
    Borrowed(BorrowedHandle),
}

impl ForeignHandle {
    pub fn kind(&self) -> HandleKind {
        match self {
            ForeignHandle::Owned(handle) => handle.kind(),
            ForeignHandle::Borrowed(handle) => handle.kind(),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, ForeignHandle::Borrowed(_))
    }

    /// Whether the seed jar revoked the object behind this handle.
    pub fn is_stale(&self) -> bool {
        match self {
            ForeignHandle::Owned(handle) => handle.is_stale(),
            ForeignHandle::Borrowed(handle) => handle.is_stale(),
        }
    }

    /// Pointer to pass to the library.
    ///
    /// Fails with [`OtsError::StaleReference`] once the jar revoked the
    /// object.
    pub fn as_ptr(&self) -> OtsResult<*const ots_handle_t> {
        match self {
            ForeignHandle::Owned(handle) if handle.is_stale() => Err(OtsError::StaleReference),
            ForeignHandle::Owned(handle) => Ok(handle.as_ptr()),
            ForeignHandle::Borrowed(handle) => handle.as_ptr(),
        }
    }

    pub(crate) fn lease(&self) -> Option<&Lease> {
        match self {
            ForeignHandle::Owned(handle) => handle.lease.as_ref(),
            ForeignHandle::Borrowed(handle) => handle.lease.as_ref(),
        }
    }

    pub(crate) fn set_lease(&mut self, lease: Lease) {
        match self {
            ForeignHandle::Owned(handle) => handle.lease = Some(lease),
            ForeignHandle::Borrowed(handle) => handle.lease = Some(lease),
        }
    }

    pub(crate) fn with_lease(mut self, lease: Lease) -> Self {
        self.set_lease(lease);
        self
    }

    /// Whether this is an owned handle the library marked reference-only.
    pub(crate) fn is_reference_only(&self) -> bool {
        matches!(self, ForeignHandle::Owned(handle) if handle.is_reference())
    }

    /// Tie a borrowed handle read from `parent` to the parent's lease.
    ///
    /// Owned results are independent copies and keep no lease.
    pub(crate) fn inherit_lease(self, parent: &ForeignHandle) -> Self {
        match (self.is_borrowed(), parent.lease()) {
            (true, Some(lease)) => self.with_lease(lease.clone()),
            _ => self,
        }
    }

    pub(crate) fn abi(&self) -> &Abi {
        match self {
            ForeignHandle::Owned(handle) => &handle.abi,
            ForeignHandle::Borrowed(handle) => &handle.abi,
        }
    }

    /// Identity of the underlying object.
    pub(crate) fn object_id(&self) -> usize {
        let handle = match self {
            ForeignHandle::Owned(handle) => handle.as_ptr(),
            ForeignHandle::Borrowed(handle) => handle.ptr as *const ots_handle_t,
        };
        unsafe { (*handle).ptr as usize }
    }

    /// Free an owned object. Does nothing for borrowed views.
    pub fn release(&mut self) {
        if let ForeignHandle::Owned(handle) = self {
            handle.release();
        }
    }

    /// # Panics
    ///
    /// If the handle is tagged with a different kind.
    pub fn expect_kind(self, kind: HandleKind) -> Self {
        let actual = self.kind();
        assert_eq!(actual, kind, "expected a {:?} handle, got {:?}", kind, actual);
        self
    }

    /// Wrap the handle in the façade matching its type tag.
    pub fn into_object(self) -> HandleObject {
        match self.kind() {
            HandleKind::WipeableString => {
                HandleObject::WipeableString(WipeableString::from_handle(self))
            }
            HandleKind::SeedIndices => HandleObject::SeedIndices(SeedIndices::from_handle(self)),
            HandleKind::SeedLanguage => {
                HandleObject::SeedLanguage(SeedLanguage::from_handle(self))
            }
            HandleKind::Address => HandleObject::Address(Address::from_handle(self)),
            HandleKind::Seed => HandleObject::Seed(Seed::from_handle(self)),
            HandleKind::Wallet => HandleObject::Wallet(Wallet::from_handle(self)),
            HandleKind::Tx
            | HandleKind::TxDescription
            | HandleKind::TxWarning
            | HandleKind::Invalid => HandleObject::Other(self),
        }
    }
}

/// A handle wrapped in its typed façade.
#[derive(Debug)]
pub enum HandleObject {
    WipeableString(WipeableString),
    SeedIndices(SeedIndices),
    SeedLanguage(SeedLanguage),
    Address(Address),
    Seed(Seed),
    Wallet(Wallet),
    Other(ForeignHandle),
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;

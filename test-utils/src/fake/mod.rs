//! In-process simulation of the OTS library.
//!
//! Object pointers handed out by the fake are opaque ids, never real memory,
//! and every object access is checked against the live set. Cryptography is
//! replaced by deterministic blake3 derivations: addresses look like Monero
//! addresses (prefix and length), seed phrases are `<language><value>` words
//! and signatures are digests over address and message.

mod abi_impl;
pub mod model;
mod state;

use std::cell::RefCell;
use std::os::raw::c_void;

use ots_sys::ots_handle_t;

pub use state::{
    DEFAULT_ENTROPY_LEVEL, DEFAULT_MAX_ACCOUNT_DEPTH, DEFAULT_MAX_INDEX_DEPTH,
    ERROR_ADDRESS_NOT_FOUND, ERROR_INJECTED, ERROR_INVALID_ADDRESS, ERROR_INVALID_ARGUMENT,
    ERROR_INVALID_INDICES, ERROR_INVALID_LANGUAGE, ERROR_INVALID_OUTPUTS, ERROR_INVALID_SEED,
    ERROR_INVALID_TX, ERROR_LENGTH_MISMATCH, ERROR_LOW_ENTROPY, ERROR_NOT_FOUND,
    ERROR_NOT_INTEGRATED, ERROR_REFERENCE, ERROR_TOO_FEW_VALUES, ERROR_WRONG_HANDLE, FakeError,
    FakeStats,
};

use state::FakeState;

/// Fake implementation of [`ots_sys::OtsAbi`].
///
/// Single threaded like the library it simulates. Share it with the code
/// under test through an `Rc` and inspect it afterwards.
pub struct FakeAbi {
    state: RefCell<FakeState>,
}

impl FakeAbi {
    pub fn new() -> Self {
        FakeAbi {
            state: RefCell::new(FakeState::new()),
        }
    }

    pub fn stats(&self) -> FakeStats {
        self.state.borrow().stats
    }

    pub fn live_results(&self) -> usize {
        self.state.borrow().live_results()
    }

    /// Handle allocations not yet released, jar entries excluded.
    pub fn live_handles(&self) -> usize {
        self.state.borrow().live_handles()
    }

    /// Objects not yet released, including those held by the jar.
    pub fn live_objects(&self) -> usize {
        self.state.borrow().live_objects()
    }

    pub fn live_strings(&self) -> usize {
        self.state.borrow().live_strings()
    }

    pub fn live_descriptions(&self) -> usize {
        self.state.borrow().live_descriptions()
    }

    pub fn jar_len(&self) -> usize {
        self.state.borrow().jar.len()
    }

    /// Whether the object behind `ptr` is still allocated.
    pub fn is_live(&self, ptr: *mut c_void) -> bool {
        self.state.borrow().is_live(ptr as usize)
    }

    /// How many times the object behind `ptr` was released.
    pub fn free_count(&self, ptr: *mut c_void) -> usize {
        self.state.borrow().free_count(ptr as usize)
    }

    /// Whether `handle` is a handle allocation the caller is expected to free.
    pub fn owns_handle(&self, handle: *const ots_handle_t) -> bool {
        self.state.borrow().owns_handle(handle)
    }

    /// Make the next result returning call fail with `error` before it has any effect.
    pub fn inject_error(&self, error: FakeError) {
        self.state.borrow_mut().injected = Some(error);
    }

    pub fn enforce_entropy(&self) -> bool {
        self.state.borrow().settings.enforce_entropy
    }

    pub fn entropy_level(&self) -> f64 {
        self.state.borrow().settings.entropy_level
    }

    pub fn max_depths(&self) -> (u32, u32) {
        let state = self.state.borrow();
        (state.settings.max_account_depth, state.settings.max_index_depth)
    }

    /// Panic if anything other than jar entries is still allocated.
    pub fn assert_no_leaks(&self) {
        let state = self.state.borrow();
        let leaked_objects = state.live_objects() - state.jar_objects();
        assert_eq!(state.live_results(), 0, "leaked results");
        assert_eq!(state.live_handles(), 0, "leaked handles");
        assert_eq!(leaked_objects, 0, "leaked objects");
        assert_eq!(state.live_strings(), 0, "leaked strings");
        assert_eq!(state.live_descriptions(), 0, "leaked transaction descriptions");
    }
}

impl Default for FakeAbi {
    fn default() -> Self {
        Self::new()
    }
}

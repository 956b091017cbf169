//! Test utilities for the OTS bindings
//!
//! This crate provides [`FakeAbi`], an in-process stand-in for the native
//! library that allocates real C layout results and handles and keeps count of
//! every allocation and release. It panics on double frees and on any access
//! to an object that was already released, so ownership mistakes in the safe
//! layer surface as test failures instead of silent memory corruption.

pub mod fake;
pub mod fixtures;
pub mod helpers;
pub mod macros;

pub use fake::{FakeAbi, FakeError, FakeStats};
pub use fixtures::*;
pub use helpers::*;

//! Raw bindings to the OTS Monero offline signing library.
//!
//! This crate only describes the C ABI. The safe, ownership-tracking layer is
//! the `ots` crate. Link against the real library with the `native` feature;
//! `OTS_LIB_DIR` points the linker at it and `OTS_STATIC` selects the static
//! archive.

#![allow(non_camel_case_types)]

pub mod abi;
pub mod types;

pub use abi::OtsAbi;
#[cfg(feature = "native")]
pub use abi::NativeAbi;
pub use types::*;

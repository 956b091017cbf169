//! Safe Rust bindings for the OTS Monero offline transaction signing library.
//!
//! The library does the cryptography; this crate manages the lifetime of
//! everything it hands out. Every call returns a result that is freed exactly
//! once ([`result::ForeignResult`]), every object is reached through a handle
//! that is either owned and freed on drop or borrowed and never freed
//! ([`handle::ForeignHandle`]), and decrypted seeds can be parked in the
//! [`SeedJar`], which wipes them on removal.
//!
//! All state hangs off an [`Ots`] context. Neither the context nor anything
//! created from it is `Send`: the library and its seed jar are not safe to
//! use from more than one thread.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> ots::OtsResult<()> {
//! use ots::{Address, Network, Ots, Seed};
//!
//! let ots = Ots::native()?;
//! let seed = Seed::monero_generate(&ots, 0, 0, Network::Main)?;
//! let address: Address = seed.address()?;
//! println!("{}", address.to_base58()?);
//!
//! let in_jar = ots.jar().transfer_in(seed, "savings")?;
//! assert_eq!(ots.jar().len()?, 1);
//! ots.jar().clear()?;
//! assert!(in_jar.fingerprint().is_err());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```

pub mod address;
pub mod config;
mod cstr;
pub mod error;
pub mod handle;
mod lease;
pub mod logging;
pub mod result;
pub mod seed;
pub mod seed_indices;
pub mod seed_jar;
pub mod seed_language;
pub mod transaction;
pub mod types;
mod utils;
pub mod wallet;
pub mod wipeable_string;

use std::fmt;
use std::rc::Rc;
#[cfg(feature = "native")]
use std::sync::atomic::{AtomicBool, Ordering};

pub use ots_sys::OtsAbi;
#[cfg(feature = "native")]
pub use ots_sys::NativeAbi;
pub use tracing::level_filters::LevelFilter;

pub use address::Address;
pub use config::OtsConfig;
pub use error::{ConfigError, OtsError, OtsResult};
pub use handle::{ForeignHandle, HandleKind, HandleObject};
pub use result::{ForeignResult, ResultKind, ResultValue};
pub use seed::Seed;
pub use seed_indices::SeedIndices;
pub use seed_jar::{SeedJar, SeedJarItem};
pub use seed_language::SeedLanguage;
pub use transaction::{Flow, Transfer, TxDescription, TxWarning};
pub use types::{AddressIndex, AddressType, Network, SeedType};
pub use wallet::Wallet;
pub use wipeable_string::WipeableString;

use result::Abi;

#[cfg(feature = "native")]
static NATIVE_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Entry point to the library: the function table plus the seed jar.
pub struct Ots {
    abi: Abi,
    jar: SeedJar,
    native: bool,
}

impl Ots {
    /// Context over any implementation of the function table.
    pub fn with_abi(abi: Rc<dyn OtsAbi>) -> Self {
        Ots {
            jar: SeedJar::new(&abi),
            abi,
            native: false,
        }
    }

    /// Context over the linked native library.
    ///
    /// The native seed jar is process wide, so only one context may exist at
    /// a time; a second claim fails with [`OtsError::ContextInUse`] until the
    /// first context is dropped.
    #[cfg(feature = "native")]
    pub fn native() -> OtsResult<Self> {
        if NATIVE_CLAIMED.swap(true, Ordering::AcqRel) {
            return Err(OtsError::ContextInUse);
        }
        let mut ots = Ots::with_abi(Rc::new(NativeAbi));
        ots.native = true;
        tracing::debug!("claimed native OTS context");
        Ok(ots)
    }

    pub(crate) fn abi(&self) -> &Abi {
        &self.abi
    }

    pub fn jar(&self) -> &SeedJar {
        &self.jar
    }
}

impl Drop for Ots {
    fn drop(&mut self) {
        #[cfg(feature = "native")]
        if self.native {
            NATIVE_CLAIMED.store(false, Ordering::Release);
        }
    }
}

impl fmt::Debug for Ots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ots").field("native", &self.native).finish_non_exhaustive()
    }
}

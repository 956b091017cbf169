//! The library's seed jar.
//!
//! The jar is a list of named, decrypted seeds kept in library memory. Seeds
//! are wiped when they leave it (purge, clear) unless they are transferred
//! out to the caller.
//!
//! Lookups hand out borrowed [`Seed`] views. Each view carries a lease the
//! jar revokes when its entry is purged, transferred out or cleared, after
//! which the view fails with [`OtsError::StaleReference`] instead of reaching
//! freed memory. Leases are shared by every context over the same library,
//! since they all see the one jar.

use std::rc::Rc;

use tracing::{debug, info};

use crate::address::Address;
use crate::cstr::cstring;
use crate::error::{OtsError, OtsResult};
use crate::handle::ForeignHandle;
use crate::lease::LeaseRegistry;
use crate::result::{Abi, ResultKind, ResultValue, call};
use crate::seed::Seed;
use crate::types::{Network, SeedType};
use crate::wallet::Wallet;

/// Metadata of one jar entry, read without touching the seed itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedJarItem {
    pub index: usize,
    pub name: String,
    pub fingerprint: String,
    pub address: String,
    pub seed_type: SeedType,
    pub is_legacy: bool,
    pub network: Network,
    pub height: u64,
    pub timestamp: u64,
}

pub struct SeedJar {
    abi: Abi,
    leases: Rc<LeaseRegistry>,
}

impl SeedJar {
    pub(crate) fn new(abi: &Abi) -> Self {
        SeedJar {
            abi: Rc::clone(abi),
            leases: LeaseRegistry::for_abi(abi),
        }
    }

    /// Attach a lease to a jar view so it can be revoked later.
    fn lease(&self, handle: ForeignHandle) -> Seed {
        let handle = match handle.is_borrowed() {
            true => {
                let lease = self.leases.issue(handle.object_id());
                handle.with_lease(lease)
            }
            false => handle,
        };
        Seed::from_handle(handle)
    }

    fn view(&self, value: ResultValue) -> Seed {
        self.lease(value.into_handle())
    }

    fn revoke(&self, object_id: usize) {
        let revoked = self.leases.revoke(object_id);
        debug!(revoked, "revoked seed jar views");
    }

    // Adding seeds

    /// Put `seed` into the jar under `name`.
    ///
    /// The jar takes the seed object over and the library marks `seed`
    /// reference-only. `seed` keeps working while the entry is in the jar and
    /// fails with [`OtsError::StaleReference`] once it leaves.
    pub fn add(&self, seed: &mut Seed, name: &str) -> OtsResult<Seed> {
        let name_c = cstring(name)?;
        let ptr = seed.handle().as_ptr()? as *mut _;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_add_seed(ptr, name_c.as_ptr())
        })?;
        if seed.handle().is_reference_only() {
            let lease = self.leases.issue(seed.handle().object_id());
            seed.handle_mut().set_lease(lease);
        }
        info!(name, "added seed to jar");
        Ok(self.view(value))
    }

    /// Move `seed` into the jar under `name`.
    ///
    /// Only an owned seed can be moved in; a jar view fails with the
    /// library's reference error and is left untouched.
    pub fn transfer_in(&self, seed: Seed, name: &str) -> OtsResult<Seed> {
        let name_c = cstring(name)?;
        let abi = Rc::clone(&self.abi);
        let raw = match seed.into_handle() {
            ForeignHandle::Owned(owned) => owned.consume_with(|slot| unsafe {
                abi.ots_seed_jar_transfer_seed_in(slot, name_c.as_ptr())
            }),
            ForeignHandle::Borrowed(view) => {
                let mut ptr = view.as_ptr()? as *mut _;
                unsafe { abi.ots_seed_jar_transfer_seed_in(&mut ptr, name_c.as_ptr()) }
            }
        };
        let value = call(&abi, raw)?;
        info!(name, "transferred seed into jar");
        Ok(self.view(value))
    }

    // Removing seeds

    fn index_of(&self, object_id: usize) -> OtsResult<Option<usize>> {
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_seeds() })?;
        Ok(value.into_handles().iter().position(|handle| handle.object_id() == object_id))
    }

    /// Wipe `seed` from the jar. Returns false if it was not in the jar.
    ///
    /// An owned seed handle goes to the library, which frees it whether or
    /// not the seed was in the jar. A jar view lives inside a lookup result
    /// and is purged by index instead.
    pub fn remove(&self, seed: Seed) -> OtsResult<bool> {
        seed.handle().as_ptr()?;
        let id = seed.handle().object_id();
        match seed.into_handle() {
            ForeignHandle::Owned(owned) => {
                let abi = Rc::clone(&self.abi);
                let raw = owned.consume_with(|slot| unsafe { abi.ots_seed_jar_remove_seed(slot) });
                let removed = call(&abi, raw)?.boolean();
                if removed {
                    self.revoke(id);
                    info!("removed seed from jar");
                }
                Ok(removed)
            }
            ForeignHandle::Borrowed(view) => {
                drop(view);
                match self.index_of(id)? {
                    Some(index) => self.purge_for_index(index),
                    None => Ok(false),
                }
            }
        }
    }

    fn purged(&self, object_id: usize, value: ResultValue) -> bool {
        self.revoke(object_id);
        info!("purged seed from jar");
        value.boolean()
    }

    pub fn purge_for_index(&self, index: usize) -> OtsResult<bool> {
        let id = self.for_index(index)?.handle().object_id();
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_purge_seed_for_index(index) })?;
        Ok(self.purged(id, value))
    }

    pub fn purge_for_name(&self, name: &str) -> OtsResult<bool> {
        let id = self.for_name(name)?.handle().object_id();
        let name = cstring(name)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_purge_seed_for_name(name.as_ptr())
        })?;
        Ok(self.purged(id, value))
    }

    pub fn purge_for_fingerprint(&self, fingerprint: &str) -> OtsResult<bool> {
        let id = self.for_fingerprint(fingerprint)?.handle().object_id();
        let fingerprint = cstring(fingerprint)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_purge_seed_for_fingerprint(fingerprint.as_ptr())
        })?;
        Ok(self.purged(id, value))
    }

    pub fn purge_for_address(&self, address: &str) -> OtsResult<bool> {
        let id = self.for_address(address)?.handle().object_id();
        let address = cstring(address)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_purge_seed_for_address(address.as_ptr())
        })?;
        Ok(self.purged(id, value))
    }

    fn transferred(&self, value: ResultValue) -> Seed {
        let handle = value.into_handle();
        self.revoke(handle.object_id());
        info!("transferred seed out of jar");
        Seed::from_handle(handle)
    }

    /// Take `seed` back out of the jar as an owned seed.
    ///
    /// Fails with [`OtsError::NotInJar`] if it is not in the jar.
    pub fn transfer_out(&self, seed: Seed) -> OtsResult<Seed> {
        seed.handle().as_ptr()?;
        let id = seed.handle().object_id();
        match seed.into_handle() {
            ForeignHandle::Owned(owned) if !owned.is_reference() => Err(OtsError::NotInJar),
            ForeignHandle::Owned(owned) => {
                let abi = Rc::clone(&self.abi);
                let raw = owned.consume_with(|slot| unsafe {
                    abi.ots_seed_jar_transfer_seed_out(slot)
                });
                Ok(self.transferred(call(&abi, raw)?))
            }
            ForeignHandle::Borrowed(view) => {
                drop(view);
                let index = self.index_of(id)?.ok_or(OtsError::NotInJar)?;
                self.transfer_out_for_index(index)
            }
        }
    }

    pub fn transfer_out_for_index(&self, index: usize) -> OtsResult<Seed> {
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_transfer_seed_out_for_index(index)
        })?;
        Ok(self.transferred(value))
    }

    pub fn transfer_out_for_name(&self, name: &str) -> OtsResult<Seed> {
        let name = cstring(name)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_transfer_seed_out_for_name(name.as_ptr())
        })?;
        Ok(self.transferred(value))
    }

    pub fn transfer_out_for_fingerprint(&self, fingerprint: &str) -> OtsResult<Seed> {
        let fingerprint = cstring(fingerprint)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_transfer_seed_out_for_fingerprint(fingerprint.as_ptr())
        })?;
        Ok(self.transferred(value))
    }

    pub fn transfer_out_for_address(&self, address: &str) -> OtsResult<Seed> {
        let address = cstring(address)?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_transfer_seed_out_for_address(address.as_ptr())
        })?;
        Ok(self.transferred(value))
    }

    /// Wipe every seed. Every view handed out so far goes stale.
    pub fn clear(&self) -> OtsResult<bool> {
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_clear() })?;
        self.leases.revoke_all();
        info!("cleared seed jar");
        Ok(value.boolean())
    }

    // Lookups

    pub fn seeds(&self) -> OtsResult<Vec<Seed>> {
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_seeds() })?;
        Ok(value.into_handles().into_iter().map(|handle| self.lease(handle)).collect())
    }

    pub fn len(&self) -> OtsResult<usize> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_seed_count() })?.unsigned() as usize)
    }

    pub fn is_empty(&self) -> OtsResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn for_index(&self, index: usize) -> OtsResult<Seed> {
        Ok(self.view(call(&self.abi, unsafe { self.abi.ots_seed_jar_seed_for_index(index) })?))
    }

    pub fn for_name(&self, name: &str) -> OtsResult<Seed> {
        let name = cstring(name)?;
        Ok(self.view(call(&self.abi, unsafe {
            self.abi.ots_seed_jar_seed_for_name(name.as_ptr())
        })?))
    }

    pub fn for_fingerprint(&self, fingerprint: &str) -> OtsResult<Seed> {
        let fingerprint = cstring(fingerprint)?;
        Ok(self.view(call(&self.abi, unsafe {
            self.abi.ots_seed_jar_seed_for_fingerprint(fingerprint.as_ptr())
        })?))
    }

    pub fn for_address(&self, address: &str) -> OtsResult<Seed> {
        let address = cstring(address)?;
        Ok(self.view(call(&self.abi, unsafe {
            self.abi.ots_seed_jar_seed_for_address(address.as_ptr())
        })?))
    }

    /// Name `seed` is stored under.
    pub fn name_of(&self, seed: &Seed) -> OtsResult<String> {
        call(&self.abi, unsafe {
            self.abi.ots_seed_jar_seed_name(seed.handle().as_ptr()?)
        })?
        .string()
    }

    pub fn rename(&self, seed: &Seed, name: &str) -> OtsResult<bool> {
        let name = cstring(name)?;
        let seed = seed.handle().as_ptr()?;
        let value = call(&self.abi, unsafe {
            self.abi.ots_seed_jar_seed_rename(seed, name.as_ptr())
        })?;
        // ots.h documents the seed handle as the result.
        Ok(match value.kind() {
            ResultKind::Handle => true,
            _ => value.boolean(),
        })
    }

    // Entry metadata by index

    pub fn item_name(&self, index: usize) -> OtsResult<String> {
        call(&self.abi, unsafe { self.abi.ots_seed_jar_item_name(index) })?.string()
    }

    pub fn item_fingerprint(&self, index: usize) -> OtsResult<String> {
        call(&self.abi, unsafe { self.abi.ots_seed_jar_item_fingerprint(index) })?.string()
    }

    pub fn item_address(&self, index: usize) -> OtsResult<Address> {
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_item_address(index) })?;
        Ok(Address::from_handle(value.into_handle()))
    }

    pub fn item_address_string(&self, index: usize) -> OtsResult<String> {
        call(&self.abi, unsafe { self.abi.ots_seed_jar_item_address_string(index) })?.string()
    }

    pub fn item_seed_type(&self, index: usize) -> OtsResult<SeedType> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_item_seed_type(index) })?.seed_type())
    }

    /// Seed type as the library names it.
    pub fn item_seed_type_string(&self, index: usize) -> OtsResult<String> {
        call(&self.abi, unsafe { self.abi.ots_seed_jar_item_seed_type_string(index) })?.string()
    }

    pub fn item_is_legacy(&self, index: usize) -> OtsResult<bool> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_item_is_legacy(index) })?.boolean())
    }

    pub fn item_network(&self, index: usize) -> OtsResult<Network> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_item_network(index) })?.network())
    }

    pub fn item_network_string(&self, index: usize) -> OtsResult<String> {
        call(&self.abi, unsafe { self.abi.ots_seed_jar_item_network_string(index) })?.string()
    }

    pub fn item_height(&self, index: usize) -> OtsResult<u64> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_item_height(index) })?.unsigned())
    }

    pub fn item_timestamp(&self, index: usize) -> OtsResult<u64> {
        Ok(call(&self.abi, unsafe { self.abi.ots_seed_jar_item_timestamp(index) })?.unsigned())
    }

    /// Wallet of the entry at `index`.
    ///
    /// A wallet the jar hands out by reference goes stale with its entry.
    pub fn item_wallet(&self, index: usize) -> OtsResult<Wallet> {
        let value = call(&self.abi, unsafe { self.abi.ots_seed_jar_item_wallet(index) })?;
        let entry = self.for_index(index)?;
        Ok(Wallet::from_handle(value.into_handle().inherit_lease(entry.handle())))
    }

    pub fn item(&self, index: usize) -> OtsResult<SeedJarItem> {
        Ok(SeedJarItem {
            index,
            name: self.item_name(index)?,
            fingerprint: self.item_fingerprint(index)?,
            address: self.item_address_string(index)?,
            seed_type: self.item_seed_type(index)?,
            is_legacy: self.item_is_legacy(index)?,
            network: self.item_network(index)?,
            height: self.item_height(index)?,
            timestamp: self.item_timestamp(index)?,
        })
    }

    pub fn items(&self) -> OtsResult<Vec<SeedJarItem>> {
        (0..self.len()?).map(|index| self.item(index)).collect()
    }
}

impl std::fmt::Debug for SeedJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedJar").field("tracked", &self.leases.tracked()).finish()
    }
}

#[cfg(test)]
#[path = "seed_jar_tests.rs"]
mod tests;

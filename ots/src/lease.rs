//! Validity flags for views into the seed jar.
//!
//! The jar lives in the library, not in any one [`Ots`](crate::Ots), so every
//! context over the same function table shares one [`LeaseRegistry`]. A
//! registry revokes whatever it still tracks once the last context using it
//! is dropped, so views never outlive the bookkeeping that protects them.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::result::Abi;

/// Validity flag shared by a view and the registry that may revoke it.
#[derive(Debug, Clone)]
pub(crate) struct Lease(Rc<Cell<bool>>);

impl Lease {
    pub(crate) fn new() -> Self {
        Lease(Rc::new(Cell::new(true)))
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn revoke(&self) {
        self.0.set(false);
    }

    fn downgrade(&self) -> Weak<Cell<bool>> {
        Rc::downgrade(&self.0)
    }
}

thread_local! {
    static REGISTRIES: RefCell<HashMap<usize, Weak<LeaseRegistry>>> =
        RefCell::new(HashMap::new());
}

/// Leases handed out for jar objects, keyed by object identity.
#[derive(Default)]
pub(crate) struct LeaseRegistry {
    leases: RefCell<HashMap<usize, Vec<Weak<Cell<bool>>>>>,
}

impl LeaseRegistry {
    /// The registry shared by every live context over `abi`.
    pub(crate) fn for_abi(abi: &Abi) -> Rc<Self> {
        let key = Rc::as_ptr(abi) as *const () as usize;
        REGISTRIES.with(|registries| {
            let mut registries = registries.borrow_mut();
            if let Some(registry) = registries.get(&key).and_then(Weak::upgrade) {
                return registry;
            }
            registries.retain(|_, registry| registry.strong_count() > 0);
            let registry = Rc::new(LeaseRegistry::default());
            registries.insert(key, Rc::downgrade(&registry));
            registry
        })
    }

    pub(crate) fn issue(&self, object_id: usize) -> Lease {
        let lease = Lease::new();
        let mut leases = self.leases.borrow_mut();
        let holders = leases.entry(object_id).or_default();
        holders.retain(|weak| weak.strong_count() > 0);
        holders.push(lease.downgrade());
        lease
    }

    /// Revoke every lease issued for `object_id`. Returns how many were
    /// still held.
    pub(crate) fn revoke(&self, object_id: usize) -> usize {
        let Some(holders) = self.leases.borrow_mut().remove(&object_id) else {
            return 0;
        };
        revoke(holders)
    }

    pub(crate) fn revoke_all(&self) -> usize {
        let holders: Vec<_> =
            self.leases.borrow_mut().drain().flat_map(|(_, holders)| holders).collect();
        revoke(holders)
    }

    /// Number of objects with leases on record.
    pub(crate) fn tracked(&self) -> usize {
        self.leases.borrow().len()
    }
}

fn revoke(holders: Vec<Weak<Cell<bool>>>) -> usize {
    let mut revoked = 0;
    for flag in holders.iter().filter_map(Weak::upgrade) {
        flag.set(false);
        revoked += 1;
    }
    revoked
}

impl Drop for LeaseRegistry {
    fn drop(&mut self) {
        let revoked = self.revoke_all();
        if revoked > 0 {
            debug!(revoked, "revoked seed jar views of a closed context");
        }
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;

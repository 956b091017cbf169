use ots_test_utils::fake_abi;

use super::*;

#[test]
fn test_contexts_over_one_abi_share_a_registry() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();
    let other: Abi = fake_abi();

    let a = LeaseRegistry::for_abi(&abi);
    let b = LeaseRegistry::for_abi(&abi);
    assert!(Rc::ptr_eq(&a, &b));
    assert!(!Rc::ptr_eq(&a, &LeaseRegistry::for_abi(&other)));
}

#[test]
fn test_revoke_hits_every_holder_of_the_object() {
    let registry = LeaseRegistry::default();
    let first = registry.issue(0x1000);
    let second = registry.issue(0x1000);
    let unrelated = registry.issue(0x2000);
    assert_eq!(registry.tracked(), 2);

    assert_eq!(registry.revoke(0x1000), 2);
    assert!(!first.is_valid());
    assert!(!second.is_valid());
    assert!(unrelated.is_valid());
    assert_eq!(registry.revoke(0x1000), 0);
}

#[test]
fn test_dropped_holders_are_not_counted() {
    let registry = LeaseRegistry::default();
    drop(registry.issue(0x1000));
    let kept = registry.issue(0x1000);
    assert_eq!(registry.revoke_all(), 1);
    assert!(!kept.is_valid());
    assert_eq!(registry.tracked(), 0);
}

#[test]
fn test_dropping_the_last_context_revokes_everything() {
    let fake = fake_abi();
    let abi: Abi = fake.clone();

    let registry = LeaseRegistry::for_abi(&abi);
    let lease = registry.issue(0x1000);
    drop(registry);
    assert!(!lease.is_valid());

    let fresh = LeaseRegistry::for_abi(&abi);
    assert_eq!(fresh.tracked(), 0);
}

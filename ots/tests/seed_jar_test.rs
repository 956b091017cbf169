//! Seed jar ownership through the public API
//!
//! Seeds that enter the jar are either added, leaving the caller a
//! reference-only handle, or moved in. Views handed out by the jar must stop
//! working once their entry is gone, whichever context handed them out.

use ots::{Network, Ots, OtsError, Seed, Wallet};
use ots_test_utils::fake::ERROR_NOT_FOUND;
use ots_test_utils::{MAIN_STANDARD, assert_foreign_error, fake_abi};

fn seed(ots: &Ots, height: u64) -> Seed {
    Seed::monero_generate(ots, height, 0, Network::Main).unwrap()
}

#[test]
fn test_jar_lifecycle() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let jar = ots.jar();

    let hot = jar.transfer_in(seed(&ots, 1), "hot").unwrap();
    let mut cold_original = seed(&ots, 2);
    let cold = jar.add(&mut cold_original, "cold").unwrap();
    assert_eq!(jar.len().unwrap(), 2);
    assert_eq!(cold_original.height().unwrap(), 2);

    let names: Vec<String> = jar.items().unwrap().into_iter().map(|item| item.name).collect();
    assert_eq!(names, ["hot", "cold"]);

    // The added seed went to the jar, so removing it retires the caller's handle too.
    assert!(jar.remove(cold).unwrap());
    assert!(matches!(cold_original.height(), Err(OtsError::StaleReference)));

    let hot = jar.transfer_out(hot).unwrap();
    assert!(jar.is_empty().unwrap());
    assert_eq!(hot.height().unwrap(), 1);

    drop((hot, cold_original));
    fake.assert_no_leaks();
    assert_eq!(fake.live_objects(), 0);
}

#[test]
fn test_views_go_stale_after_clear() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let jar = ots.jar();
    jar.transfer_in(seed(&ots, 0), "a").unwrap();
    jar.transfer_in(seed(&ots, 0), "b").unwrap();

    let views = jar.seeds().unwrap();
    let wallet: Wallet = views[0].wallet().unwrap();
    jar.clear().unwrap();

    for view in &views {
        assert!(matches!(view.address(), Err(OtsError::StaleReference)));
    }
    assert!(matches!(jar.transfer_out(seed(&ots, 0)), Err(OtsError::NotInJar)));
    assert!(matches!(wallet.address(), Err(OtsError::StaleReference)));
    assert_foreign_error!(jar.for_index(0), ERROR_NOT_FOUND);
    assert_foreign_error!(jar.for_address(MAIN_STANDARD), ERROR_NOT_FOUND);
}

#[test]
fn test_renamed_entries_are_found_by_new_name() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let jar = ots.jar();
    let view = jar.transfer_in(seed(&ots, 0), "draft").unwrap();

    jar.rename(&view, "final").unwrap();
    let found = jar.for_name("final").unwrap();
    assert_eq!(found.fingerprint().unwrap(), view.fingerprint().unwrap());
    assert_eq!(jar.item(0).unwrap().name, "final");
}

#[test]
fn test_views_survive_a_context_only_as_stale() {
    let fake = fake_abi();
    let first = Ots::with_abi(fake.clone());
    let view = first.jar().transfer_in(seed(&first, 0), "old").unwrap();
    drop(first);

    let second = Ots::with_abi(fake.clone());
    second.jar().clear().unwrap();
    assert!(matches!(view.fingerprint(), Err(OtsError::StaleReference)));
    assert!(matches!(second.jar().transfer_out(view), Err(OtsError::StaleReference)));
    fake.assert_no_leaks();
}

#[test]
fn test_jars_are_per_context() {
    let fake_a = fake_abi();
    let fake_b = fake_abi();
    let a = Ots::with_abi(fake_a.clone());
    let b = Ots::with_abi(fake_b.clone());

    a.jar().transfer_in(seed(&a, 0), "only in a").unwrap();
    assert_eq!(a.jar().len().unwrap(), 1);
    assert!(b.jar().is_empty().unwrap());
}

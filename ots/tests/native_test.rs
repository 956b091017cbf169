//! Tests against the linked native library
//!
//! Only built with the `native` feature. The native seed jar is process
//! wide, so every test here runs serially and leaves the jar empty.

#![cfg(feature = "native")]

use ots::{Network, Ots, OtsError, Seed, SeedLanguage, SeedType};
use serial_test::serial;

#[test]
#[serial]
fn test_context_is_claimed_once() {
    let ots = Ots::native().unwrap();
    assert!(matches!(Ots::native(), Err(OtsError::ContextInUse)));
    drop(ots);
    assert!(Ots::native().is_ok());
}

#[test]
#[serial]
fn test_version() {
    let ots = Ots::native().unwrap();
    let version = ots.version().unwrap();
    let (major, minor, patch) = ots.version_components().unwrap();
    assert!(version.starts_with(&format!("{}.{}.{}", major, minor, patch)));
}

#[test]
#[serial]
fn test_generate_and_restore() {
    let ots = Ots::native().unwrap();
    let seed = Seed::polyseed_generate(&ots, Network::Main, 0, "").unwrap();
    let language = SeedLanguage::default_for(&ots, SeedType::Polyseed).unwrap();
    let phrase = seed.phrase(&language, "").unwrap();

    let restored = Seed::polyseed_decode(
        &ots,
        &phrase.reveal().unwrap(),
        Network::Main,
        "",
        "",
    )
    .unwrap();
    assert_eq!(restored.fingerprint().unwrap(), seed.fingerprint().unwrap());
    assert!(restored.address().unwrap().equals(&seed.address().unwrap()).unwrap());
}

#[test]
#[serial]
fn test_jar_round_trip() {
    let ots = Ots::native().unwrap();
    let jar = ots.jar();
    jar.clear().unwrap();

    let view = jar.transfer_in(
        Seed::monero_generate(&ots, 0, 0, Network::Test).unwrap(),
        "native",
    )
    .unwrap();
    assert_eq!(jar.len().unwrap(), 1);
    let seed = jar.transfer_out(view).unwrap();
    assert!(!seed.is_borrowed());
    assert!(jar.is_empty().unwrap());
}

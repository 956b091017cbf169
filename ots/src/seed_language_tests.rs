use ots_test_utils::fake::ERROR_INVALID_LANGUAGE;
use ots_test_utils::{assert_foreign_error, assert_no_leaks, fake_abi};

use super::*;

fn codes(languages: &[SeedLanguage]) -> Vec<String> {
    languages.iter().map(|l| l.code().unwrap()).collect()
}

#[test]
fn test_all_languages() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_no_leaks!(fake, {
        let languages = SeedLanguage::all(&ots).unwrap();
        assert_eq!(codes(&languages), ["en", "es", "de", "nl"]);
        assert!(languages.iter().all(|l| l.handle().is_borrowed()));
    });
    assert_eq!(fake.stats().objects_freed, 0);
}

#[test]
fn test_languages_for_type() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_eq!(codes(&SeedLanguage::for_type(&ots, SeedType::Polyseed).unwrap()), ["en", "es"]);
    assert_eq!(SeedLanguage::for_type(&ots, SeedType::Monero).unwrap().len(), 4);
}

#[test]
fn test_lookup_by_code_and_names() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());

    let spanish = SeedLanguage::from_code(&ots, "es").unwrap();
    assert_eq!(spanish.name().unwrap(), "Español");
    assert_eq!(spanish.english_name().unwrap(), "Spanish");

    let by_name = SeedLanguage::from_name(&ots, "Español").unwrap();
    assert!(spanish.equals(&by_name).unwrap());

    let dutch = SeedLanguage::from_english_name(&ots, "Dutch").unwrap();
    assert!(dutch.equals_code("nl").unwrap());
    assert!(!dutch.equals(&spanish).unwrap());
}

#[test]
fn test_unknown_language() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    assert_foreign_error!(SeedLanguage::from_code(&ots, "xx"), ERROR_INVALID_LANGUAGE);
    assert_foreign_error!(SeedLanguage::from_name(&ots, "Klingon"), ERROR_INVALID_LANGUAGE);
    assert_foreign_error!(SeedLanguage::from_english_name(&ots, ""), ERROR_INVALID_LANGUAGE);
}

#[test]
fn test_supports() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let german = SeedLanguage::from_code(&ots, "de").unwrap();
    assert!(german.supports(SeedType::Monero).unwrap());
    assert!(!german.supports(SeedType::Polyseed).unwrap());
}

#[test]
fn test_default_language() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());

    let default = SeedLanguage::default_for(&ots, SeedType::Polyseed).unwrap();
    assert_eq!(default.code().unwrap(), "en");
    assert!(default.is_default_for(SeedType::Polyseed).unwrap());

    let spanish = SeedLanguage::from_code(&ots, "es").unwrap();
    spanish.set_default(SeedType::Polyseed).unwrap();
    assert!(spanish.is_default_for(SeedType::Polyseed).unwrap());
    assert!(!spanish.is_default_for(SeedType::Monero).unwrap());
    assert_eq!(SeedLanguage::default_for(&ots, SeedType::Polyseed).unwrap().code().unwrap(), "es");
}

#[test]
fn test_set_default_rejects_unsupported_type() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let german = SeedLanguage::from_code(&ots, "de").unwrap();
    assert_foreign_error!(german.set_default(SeedType::Polyseed), ERROR_INVALID_LANGUAGE);
    assert_eq!(SeedLanguage::default_for(&ots, SeedType::Polyseed).unwrap().code().unwrap(), "en");
}

#[test]
fn test_debug_shows_code() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let language = SeedLanguage::from_code(&ots, "nl").unwrap();
    assert_eq!(format!("{:?}", language), "SeedLanguage(nl)");
}

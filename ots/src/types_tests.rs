use super::*;

#[test]
fn test_raw_conversions() {
    for network in Network::ALL {
        assert_eq!(Network::from_raw(network.to_raw()), Some(network));
    }
    for address_type in AddressType::ALL {
        assert_eq!(AddressType::from_raw(address_type.to_raw()), Some(address_type));
    }
    for seed_type in SeedType::ALL {
        assert_eq!(SeedType::from_raw(seed_type.to_raw()), Some(seed_type));
    }
    assert_eq!(Network::from_raw(42), None);
}

#[test]
fn test_parse_and_display() {
    assert_eq!("stagenet".parse::<Network>().unwrap(), Network::Stage);
    assert_eq!("Main".parse::<Network>().unwrap(), Network::Main);
    assert_eq!(Network::Test.to_string(), "test");
    assert_eq!("integrated".parse::<AddressType>().unwrap(), AddressType::Integrated);
    assert_eq!("polyseed".parse::<SeedType>().unwrap(), SeedType::Polyseed);
    assert!("regtest".parse::<Network>().is_err());
    assert_eq!(AddressIndex::new(1, 7).to_string(), "1/7");
}

#[test]
fn test_word_counts() {
    assert_eq!(SeedType::Monero.word_count(), 25);
    assert_eq!(SeedType::Polyseed.word_count(), 16);
}

#[test]
fn test_network_serde() {
    #[derive(Deserialize)]
    struct Holder {
        network: Network,
    }
    let holder: Holder = toml::from_str("network = \"stage\"").unwrap();
    assert_eq!(holder.network, Network::Stage);
}

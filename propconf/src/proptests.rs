//! Property-based tests for resolution and typed access.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::error::Error;
use crate::provider::ConfigProvider;
use crate::source::MapSource;

// Strategy for a small key space so sources overlap often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

// Strategy for one source's contents
fn layer_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map(key_strategy(), "[a-z0-9]{0,6}", 0..6)
}

fn provider_over(layers: &[HashMap<String, String>]) -> ConfigProvider {
    layers
        .iter()
        .fold(ConfigProvider::builder(), |builder, layer| {
            builder.source(MapSource::frozen(layer.clone()))
        })
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: if cfg!(feature = "property-tests") { 10_000 } else { 256 },
        .. ProptestConfig::default()
    })]

    // The answer always comes from the first layer that has the key
    #[test]
    fn first_present_layer_wins(
        layers in prop::collection::vec(layer_strategy(), 0..5),
        key in key_strategy(),
    ) {
        let provider = provider_over(&layers);
        let expected = layers.iter().find_map(|layer| layer.get(&key).cloned());

        match expected {
            Some(value) => prop_assert_eq!(provider.get_string(&key).unwrap(), value),
            None => {
                let is_missing = matches!(
                    provider.get_string(&key),
                    Err(Error::KeyNotFound { key: ref k }) if *k == key
                );
                prop_assert!(is_missing);
            }
        }
    }

    // A default is returned exactly when the key is absent everywhere
    #[test]
    fn default_only_when_absent(
        layers in prop::collection::vec(layer_strategy(), 0..5),
        key in key_strategy(),
        default in "[A-Z]{1,4}",
    ) {
        let provider = provider_over(&layers);
        let got = provider.get_string_or(&key, &default);
        match provider.lookup(&key) {
            Some(value) => prop_assert_eq!(got, value),
            None => prop_assert_eq!(got, default),
        }
    }

    // Repeated lookups without mutation agree
    #[test]
    fn lookups_are_idempotent(
        layers in prop::collection::vec(layer_strategy(), 0..5),
        key in key_strategy(),
    ) {
        let provider = provider_over(&layers);
        let first = provider.resolve(&key);
        let second = provider.resolve(&key);
        prop_assert_eq!(first, second);
    }

    // Any i32 rendered in decimal reads back unchanged
    #[test]
    fn int_values_parse_exactly(n in any::<i32>()) {
        let provider = ConfigProvider::builder()
            .source(MapSource::from_pairs([("n", n.to_string())]))
            .build();
        prop_assert_eq!(provider.get_int("n").unwrap(), n);
        prop_assert_eq!(provider.get_int_or("n", n.wrapping_add(1)).unwrap(), n);
    }

    // Values with a non-digit character are never read as ints
    #[test]
    fn non_numeric_values_are_malformed(raw in "[0-9]{0,3}[a-z ][0-9a-z]{0,3}") {
        let provider = ConfigProvider::builder()
            .source(MapSource::from_pairs([("n", raw.as_str())]))
            .build();
        let is_malformed = matches!(
            provider.get_int("n"),
            Err(Error::ValueMalformed { raw: ref r, .. }) if *r == raw
        );
        prop_assert!(is_malformed);
    }
}

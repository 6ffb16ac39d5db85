// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bankpipe::pipeline::rates::{RateCache, RateMap, convert, fallback_rates};
use rust_decimal::Decimal;

fn rates() -> RateMap {
    let mut m = RateMap::new();
    m.insert("EUR".to_string(), "0.92".parse().unwrap());
    m.insert("INR".to_string(), "83".parse().unwrap());
    m
}

#[test]
fn convert_same_currency_is_identity() {
    let amount = Decimal::new(12345, 2);
    assert_eq!(convert(amount, "USD", "USD", &rates()), amount);
    assert_eq!(convert(amount, "usd", "USD", &rates()), amount);
    assert_eq!(convert(amount, "", "USD", &rates()), amount);
}

#[test]
fn convert_divides_by_base_relative_rate() {
    // Rates are units of foreign currency per 1 reporting unit.
    let amount = Decimal::new(9200, 2); // EUR 92.00
    let got = convert(amount, "EUR", "USD", &rates());
    assert_eq!(got, Decimal::new(100, 0)); // USD 100
}

#[test]
fn convert_preserves_sign() {
    let got = convert(Decimal::new(-8300, 2), "INR", "USD", &rates());
    assert_eq!(got, Decimal::new(-100, 2).round_dp(2));
}

#[test]
fn convert_unknown_currency_returns_amount_unchanged() {
    let amount = Decimal::new(5000, 2);
    assert_eq!(convert(amount, "XYZ", "USD", &rates()), amount);
}

#[test]
fn fallback_table_covers_common_currencies() {
    let fallback = fallback_rates();
    for ccy in ["EUR", "GBP", "CAD", "JPY", "INR"] {
        assert!(fallback.contains_key(ccy), "missing {}", ccy);
        assert!(!fallback[ccy].is_zero());
    }
}

#[test]
fn cache_starts_stale_and_freshens_on_prime() {
    let mut cache = RateCache::new();
    assert!(!cache.is_fresh());
    cache.prime(rates());
    assert!(cache.is_fresh());
}

#[test]
fn fresh_cache_is_returned_without_fetching() {
    let mut cache = RateCache::new();
    cache.prime(rates());
    // offline=false would hit the network only on a stale cache; a fresh one
    // must be returned as-is.
    let map = cache.get_rates("USD", false);
    assert_eq!(map.get("EUR"), rates().get("EUR"));
}

#[test]
fn stale_offline_cache_serves_fallback_table() {
    let mut cache = RateCache::new();
    let map = cache.get_rates("USD", true);
    assert_eq!(map.get("EUR"), fallback_rates().get("EUR"));
    // Fallback service must not mark the cache fresh; the next call retries.
    assert!(!cache.is_fresh());
}

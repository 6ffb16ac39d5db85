// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Exchange-rate cache and currency conversion. One fetch per hour at most,
//! shared process-wide; on fetch failure a small static table keeps imports
//! moving and the next call retries the network. Rates are quoted per one
//! unit of the reporting currency, so conversion divides.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::utils::http_client;

pub type RateMap = HashMap<String, Decimal>;

pub const RATE_TTL: Duration = Duration::from_secs(60 * 60);

/// Process-wide cache, lazily initialized. Commands lock it once per batch
/// and pass the resulting map into the pipeline; row processing never
/// touches the network.
pub static SHARED: Lazy<Mutex<RateCache>> = Lazy::new(|| Mutex::new(RateCache::new()));

#[derive(Debug)]
pub struct RateCache {
    rates: RateMap,
    fetched_at: Option<Instant>,
}

impl RateCache {
    pub fn new() -> Self {
        RateCache {
            rates: RateMap::new(),
            fetched_at: None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.fetched_at
            .is_some_and(|at| at.elapsed() < RATE_TTL)
    }

    /// Current rate table for `base`. Cached table if younger than the TTL;
    /// otherwise fetch and replace the cache, or hand back the fallback
    /// table without touching the timestamp so the next call retries.
    pub fn get_rates(&mut self, base: &str, offline: bool) -> RateMap {
        if self.is_fresh() {
            return self.rates.clone();
        }
        if offline {
            return fallback_rates();
        }
        match fetch_rates(base) {
            Ok(rates) => {
                self.rates = rates.clone();
                self.fetched_at = Some(Instant::now());
                rates
            }
            Err(err) => {
                eprintln!("warning: rate fetch failed ({err}); using fallback rates");
                fallback_rates()
            }
        }
    }

    /// Test hook: seed the cache as if a fetch just succeeded.
    pub fn prime(&mut self, rates: RateMap) {
        self.rates = rates;
        self.fetched_at = Some(Instant::now());
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rates: HashMap<String, f64>,
}

fn fetch_rates(base: &str) -> Result<RateMap> {
    let url = format!("https://open.er-api.com/v6/latest/{base}");
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let body: RateResponse = resp.json().context("Decode rate table")?;
    let mut rates = RateMap::new();
    for (ccy, rate) in body.rates {
        if let Ok(d) = Decimal::try_from(rate) {
            if !d.is_zero() {
                rates.insert(ccy.to_uppercase(), d);
            }
        }
    }
    Ok(rates)
}

/// Static approximations used when the rate API is unreachable. Good enough
/// for a preview; re-imports pick up live rates once the network is back.
pub fn fallback_rates() -> RateMap {
    [
        ("EUR", "0.92"),
        ("GBP", "0.79"),
        ("CAD", "1.36"),
        ("AUD", "1.52"),
        ("CHF", "0.88"),
        ("JPY", "147.0"),
        ("INR", "83.0"),
        ("MXN", "18.5"),
        ("BRL", "5.4"),
        ("PLN", "3.9"),
    ]
    .into_iter()
    .filter_map(|(ccy, rate)| rate.parse::<Decimal>().ok().map(|d| (ccy.to_string(), d)))
    .collect()
}

/// Convert `amount` from `from_ccy` into the reporting currency. Identity
/// when the currency already matches or is absent; unknown currencies warn
/// and pass through unconverted — a transaction is never dropped here.
pub fn convert(amount: Decimal, from_ccy: &str, base: &str, rates: &RateMap) -> Decimal {
    let from = from_ccy.trim();
    if from.is_empty() || from.eq_ignore_ascii_case(base) {
        return amount;
    }
    match rates.get(&from.to_uppercase()) {
        Some(rate) if !rate.is_zero() => amount / *rate,
        _ => {
            eprintln!("warning: no exchange rate for '{from}'; amount left unconverted");
            amount
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::fx_errors::FxError;

/// A single rate from the external feed.
///
/// `rate` is the value of one unit of `currency` expressed in the base
/// currency of the table it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(currency: impl Into<String>, rate: Decimal) -> Self {
        Self {
            currency: currency.into(),
            rate,
        }
    }
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

/// Mapping currency -> rate, all relative to one base currency.
///
/// The base currency is always present with a rate of one.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    base_currency: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Builds a table from feed rows. Later rows for the same currency win.
    ///
    /// Rejects empty currency codes and non-positive rates, since a zero rate
    /// would make every conversion into that currency divide by zero.
    pub fn new(
        base_currency: impl Into<String>,
        exchange_rates: Vec<ExchangeRate>,
    ) -> Result<Self, FxError> {
        let base_currency = base_currency.into();
        if base_currency.trim().is_empty() {
            return Err(FxError::InvalidCurrencyCode(base_currency));
        }

        let mut rates = HashMap::with_capacity(exchange_rates.len() + 1);
        for exchange_rate in exchange_rates {
            if exchange_rate.currency.trim().is_empty() {
                return Err(FxError::InvalidCurrencyCode(exchange_rate.currency));
            }
            if exchange_rate.rate <= Decimal::ZERO {
                return Err(FxError::InvalidRate {
                    currency: exchange_rate.currency,
                    rate: exchange_rate.rate.to_string(),
                });
            }
            rates.insert(exchange_rate.currency, exchange_rate.rate);
        }
        rates.insert(base_currency.clone(), Decimal::ONE);

        Ok(Self {
            base_currency,
            rates,
        })
    }

    /// A table that only knows its base currency.
    pub fn base_only(base_currency: impl Into<String>) -> Result<Self, FxError> {
        Self::new(base_currency, Vec::new())
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }

    /// Currencies in the table, sorted for stable output.
    pub fn currencies(&self) -> Vec<&str> {
        let mut currencies: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        currencies.sort_unstable();
        currencies
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CalculatorError, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTransactionType {
    Buy,
    Sell,
}

impl StockTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockTransactionType::Buy => "buy",
            StockTransactionType::Sell => "sell",
        }
    }
}

impl fmt::Display for StockTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockTransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(StockTransactionType::Buy),
            "sell" => Ok(StockTransactionType::Sell),
            other => Err(CalculatorError::UnsupportedTransactionType(other.to_string()).into()),
        }
    }
}

/// A buy or sell of one symbol in one account.
///
/// Replay order is `(date, id)`. Identifiers are UUID v7 strings, so on the
/// same date the lexical id order is the insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: String,
    pub account_id: String,
    pub symbol: String,
    pub tx_type: StockTransactionType,
    pub shares: Decimal,
    /// Price per share in the account currency.
    pub price: Decimal,
    pub fees: Decimal,
    pub date: NaiveDate,
}

impl StockTransaction {
    pub fn validate(&self) -> Result<()> {
        let reason = if self.shares <= Decimal::ZERO {
            Some(format!("shares must be positive, got {}", self.shares))
        } else if self.price < Decimal::ZERO {
            Some(format!("price must not be negative, got {}", self.price))
        } else if self.fees < Decimal::ZERO {
            Some(format!("fees must not be negative, got {}", self.fees))
        } else if self.symbol.trim().is_empty() {
            Some("symbol is empty".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CalculatorError::InvalidTransaction {
                id: self.id.clone(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Replayed position of one symbol in one account.
///
/// This is also the shape of the holdings cache row; it can always be rebuilt
/// from the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingState {
    pub symbol: String,
    pub account_id: String,
    pub shares: Decimal,
    /// Weighted-average cost per share, fees included.
    pub avg_cost: Decimal,
    /// Cost basis of the shares currently held.
    pub total_cost: Decimal,
}

impl HoldingState {
    pub fn empty(symbol: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            account_id: account_id.into(),
            shares: Decimal::ZERO,
            avg_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.shares > Decimal::ZERO
    }
}

//! Ledger entry domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{errors::ValidationError, Error, Result};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Inflow,
    Outflow,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Inflow => "inflow",
            EntryType::Outflow => "outflow",
        }
    }

    /// The opposite direction, used for the sibling leg of a transfer.
    pub fn opposite(&self) -> EntryType {
        match self {
            EntryType::Inflow => EntryType::Outflow,
            EntryType::Outflow => EntryType::Inflow,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inflow" => Ok(EntryType::Inflow),
            "outflow" => Ok(EntryType::Outflow),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown ledger entry type: {}",
                other
            )))),
        }
    }
}

/// One dated inflow or outflow against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub account_id: String,
    pub entry_type: EntryType,
    /// Always non-negative; the direction comes from `entry_type`.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    /// Set on both legs of a transfer.
    pub transfer_id: Option<String>,
}

impl LedgerEntry {
    /// The entry's effect on the account balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Inflow => self.amount,
            EntryType::Outflow => -self.amount,
        }
    }
}

/// Input model for writing a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub account_id: String,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub transfer_id: Option<String>,
}

impl NewLedgerEntry {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Ledger entry amount must not be negative, got {}",
                self.amount
            ))));
        }
        Ok(())
    }

    /// Materializes the entry with the identifier assigned by the store.
    pub fn into_entry(self, id: String) -> LedgerEntry {
        LedgerEntry {
            id,
            account_id: self.account_id,
            entry_type: self.entry_type,
            amount: self.amount,
            date: self.date,
            payee: self.payee,
            category: self.category,
            notes: self.notes,
            transfer_id: self.transfer_id,
        }
    }
}

/// Current balance of one account, in the account's own currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub balance: Decimal,
}

//! Transfer domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;
use crate::{errors::ValidationError, Error, Result};

/// A movement of money between two accounts.
///
/// Owns exactly two ledger entries through their `transfer_id`: an outflow
/// of `from_amount` on the source and an inflow of `to_amount` on the
/// destination. The amounts differ when the accounts use different currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub from_amount: Decimal,
    pub to_amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub from_account_id: String,
    pub to_account_id: String,
    pub from_amount: Decimal,
    /// Defaults to `from_amount`.
    #[serde(default)]
    pub to_amount: Option<Decimal>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransfer {
    pub fn to_amount(&self) -> Decimal {
        self.to_amount.unwrap_or(self.from_amount)
    }

    pub fn validate(&self) -> Result<()> {
        if self.from_account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fromAccountId".to_string(),
            )));
        }
        if self.to_account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "toAccountId".to_string(),
            )));
        }
        if self.from_account_id == self.to_account_id {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cannot transfer to the same account".to_string(),
            )));
        }
        if self.from_amount <= Decimal::ZERO || self.to_amount() <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Transfer amounts must be positive, got {} and {}",
                self.from_amount,
                self.to_amount()
            ))));
        }
        Ok(())
    }

    pub fn into_transfer(self, id: String) -> Transfer {
        let to_amount = self.to_amount();
        Transfer {
            id,
            from_account_id: self.from_account_id,
            to_account_id: self.to_account_id,
            from_amount: self.from_amount,
            to_amount,
            date: self.date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferWithEntries {
    pub transfer: Transfer,
    /// Outflow on the source account
    pub from_entry: LedgerEntry,
    /// Inflow on the destination account
    pub to_entry: LedgerEntry,
}

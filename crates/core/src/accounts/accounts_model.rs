//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::accounts_constants::{account_types, is_valid_account_type};
use crate::{errors::ValidationError, Error, Result};

/// The closed set of account kinds the engine aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Bank,
    Cash,
    Stock,
    Loan,
    Credit,
    Asset,
}

impl AccountType {
    pub const ALL: [AccountType; 6] = [
        AccountType::Bank,
        AccountType::Cash,
        AccountType::Stock,
        AccountType::Loan,
        AccountType::Credit,
        AccountType::Asset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => account_types::BANK,
            AccountType::Cash => account_types::CASH,
            AccountType::Stock => account_types::STOCK,
            AccountType::Loan => account_types::LOAN,
            AccountType::Credit => account_types::CREDIT,
            AccountType::Asset => account_types::ASSET,
        }
    }

    pub fn is_liability(&self) -> bool {
        matches!(self, AccountType::Loan | AccountType::Credit)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            account_types::BANK => Ok(AccountType::Bank),
            account_types::CASH => Ok(AccountType::Cash),
            account_types::STOCK => Ok(AccountType::Stock),
            account_types::LOAN => Ok(AccountType::Loan),
            account_types::CREDIT => Ok(AccountType::Credit),
            account_types::ASSET => Ok(AccountType::Asset),
            other => Err(Error::InvalidAccountType(other.to_string())),
        }
    }
}

/// Domain model representing an account in the system.
///
/// For credit accounts `initial_balance` holds the credit limit. For asset
/// accounts it holds the current value, which ledger entries do not revalue.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub group: Option<String>,
    pub currency: String,
    pub initial_balance: Decimal,
    pub is_favorite: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Parses the stored type string into the closed enum.
    pub fn kind(&self) -> Result<AccountType> {
        AccountType::from_str(&self.account_type)
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub account_type: String,
    pub group: Option<String>,
    pub currency: String,
    pub initial_balance: Decimal,
    pub is_favorite: bool,
    pub is_active: bool,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        if !is_valid_account_type(&self.account_type) {
            return Err(Error::InvalidAccountType(self.account_type.clone()));
        }
        Ok(())
    }
}

/// Input model for updating an existing account.
///
/// Type and currency are fixed at creation. Forms may echo them back; any
/// value that differs from the stored account is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub name: String,
    pub group: Option<String>,
    pub initial_balance: Decimal,
    pub is_favorite: bool,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Validates the update against the stored account.
    ///
    /// Changing the currency would reinterpret every historical ledger entry,
    /// so both type and currency are immutable.
    pub fn validate_against(&self, existing: &Account) -> Result<()> {
        self.validate()?;
        if self.id.as_deref() != Some(existing.id.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Update targets account {:?} but was checked against {}",
                self.id, existing.id
            ))));
        }
        if let Some(account_type) = &self.account_type {
            if account_type != &existing.account_type {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Account type cannot change from {} to {}",
                    existing.account_type, account_type
                ))));
            }
        }
        if let Some(currency) = &self.currency {
            if currency != &existing.currency {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Account currency cannot change from {} to {}",
                    existing.currency, currency
                ))));
            }
        }
        Ok(())
    }

    /// Applies the mutable fields to a copy of the stored account.
    pub fn apply_to(&self, existing: &Account, updated_at: NaiveDateTime) -> Result<Account> {
        self.validate_against(existing)?;
        Ok(Account {
            name: self.name.clone(),
            group: self.group.clone(),
            initial_balance: self.initial_balance,
            is_favorite: self.is_favorite,
            is_active: self.is_active,
            updated_at,
            ..existing.clone()
        })
    }
}

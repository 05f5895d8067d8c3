//! Profit and loss domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::ledger::EntryType;

/// Income and expenses of one calendar month, in main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLMonth {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
}

impl PnLMonth {
    pub fn new(month: String) -> Self {
        PnLMonth {
            month,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            net: Decimal::ZERO,
            transaction_count: 0,
        }
    }

    pub fn add_entry(&mut self, entry_type: EntryType, converted_amount: Decimal) {
        match entry_type {
            EntryType::Inflow => self.income += converted_amount,
            EntryType::Outflow => self.expenses += converted_amount,
        }
        self.net = self.income - self.expenses;
        self.transaction_count += 1;
    }

    pub fn round(mut self) -> Self {
        self.income = self.income.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.expenses = self.expenses.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.net = self.net.round_dp(DISPLAY_DECIMAL_PRECISION);
        self
    }
}

/// Twelve months of income and expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLSummary {
    pub main_currency: String,
    pub year: i32,
    /// January to December
    pub months: Vec<PnLMonth>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_net: Decimal,
}

/// A ledger entry as listed in a month detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLTransaction {
    pub id: String,
    pub account_id: String,
    pub account_name: String,
    pub date: NaiveDate,
    pub entry_type: EntryType,
    /// Amount in the account currency
    pub amount: Decimal,
    /// Account currency
    pub currency: String,
    /// Amount in main currency
    pub converted_amount: Decimal,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLMonthDetail {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    /// Newest first
    pub transactions: Vec<PnLTransaction>,
}

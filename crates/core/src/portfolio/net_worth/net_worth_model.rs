//! Net worth domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Net worth subtotals per account type, in main currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthByType {
    /// Bank balances
    pub bank: Decimal,
    /// Cash balances
    pub cash: Decimal,
    /// Cost basis of stock holdings
    pub stock: Decimal,
    /// Stored value of asset accounts
    pub asset: Decimal,
    /// Outstanding loan principal (positive magnitude)
    pub loan: Decimal,
    /// Credit owed (positive magnitude)
    pub credit: Decimal,
}

impl NetWorthByType {
    pub fn add(&mut self, account_type: AccountType, value: Decimal) {
        match account_type {
            AccountType::Bank => self.bank += value,
            AccountType::Cash => self.cash += value,
            AccountType::Stock => self.stock += value,
            AccountType::Asset => self.asset += value,
            AccountType::Loan => self.loan += value,
            AccountType::Credit => self.credit += value,
        }
    }

    pub fn liquid_assets(&self) -> Decimal {
        self.bank + self.cash
    }

    pub fn total_debt(&self) -> Decimal {
        self.loan + self.credit
    }

    pub fn net_worth(&self) -> Decimal {
        self.bank + self.cash + self.stock + self.asset - self.loan - self.credit
    }

    pub fn round(&self) -> Self {
        NetWorthByType {
            bank: self.bank.round_dp(DISPLAY_DECIMAL_PRECISION),
            cash: self.cash.round_dp(DISPLAY_DECIMAL_PRECISION),
            stock: self.stock.round_dp(DISPLAY_DECIMAL_PRECISION),
            asset: self.asset.round_dp(DISPLAY_DECIMAL_PRECISION),
            loan: self.loan.round_dp(DISPLAY_DECIMAL_PRECISION),
            credit: self.credit.round_dp(DISPLAY_DECIMAL_PRECISION),
        }
    }
}

/// Contribution of one account to net worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNetWorth {
    pub account_id: String,
    pub name: String,
    pub account_type: AccountType,
    /// Account currency
    pub currency: String,
    /// Value in the account currency (positive magnitude for liabilities)
    pub native_value: Decimal,
    /// Value in main currency (positive magnitude for liabilities)
    pub value: Decimal,
    pub is_liability: bool,
}

/// Current net worth of a tenant, in main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    pub main_currency: String,
    /// Assets minus liabilities
    pub total_net_worth: Decimal,
    pub by_type: NetWorthByType,
    /// Bank plus cash
    pub liquid_assets: Decimal,
    /// Stock cost basis
    pub investments: Decimal,
    /// Loan plus credit owed
    pub total_debt: Decimal,
    /// Per-account contributions, ordered by account id
    pub accounts: Vec<AccountNetWorth>,
}

impl NetWorthSummary {
    pub fn empty(main_currency: impl Into<String>) -> Self {
        Self::from_breakdown(main_currency, NetWorthByType::default(), Vec::new())
    }

    /// Builds the summary from unrounded subtotals.
    ///
    /// Derived figures are computed before rounding so that they stay exact
    /// sums of the subtotals.
    pub fn from_breakdown(
        main_currency: impl Into<String>,
        by_type: NetWorthByType,
        accounts: Vec<AccountNetWorth>,
    ) -> Self {
        NetWorthSummary {
            main_currency: main_currency.into(),
            total_net_worth: by_type.net_worth().round_dp(DISPLAY_DECIMAL_PRECISION),
            liquid_assets: by_type.liquid_assets().round_dp(DISPLAY_DECIMAL_PRECISION),
            investments: by_type.stock.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_debt: by_type.total_debt().round_dp(DISPLAY_DECIMAL_PRECISION),
            by_type: by_type.round(),
            accounts,
        }
    }
}

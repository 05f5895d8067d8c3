//! Projection domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::EntryType;
use crate::recurring::Frequency;

/// Net worth figures of one month, in main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    /// `YYYY-MM`
    pub month: String,
    pub net_worth: Decimal,
    pub liquid_assets: Decimal,
    pub bank: Decimal,
    pub cash: Decimal,
    pub investments: Decimal,
    pub assets: Decimal,
    pub total_debt: Decimal,
    /// False only for the current month, which holds actual figures.
    pub is_projected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub current_net_worth: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_savings: Decimal,
    /// Savings as a percentage of income
    pub savings_rate: Decimal,
    pub projected_year_end_net_worth: Decimal,
    pub months_remaining_in_year: u32,
    pub projected_net_worth_end_of_horizon: Decimal,
}

/// Monthly equivalent of one recurring template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBreakdownItem {
    pub id: String,
    pub account_id: String,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub entry_type: EntryType,
    /// Amount per occurrence, in `currency`
    pub amount: Decimal,
    /// Account currency of the template
    pub currency: String,
    pub frequency: Frequency,
    /// Monthly equivalent in main currency
    pub monthly_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBreakdown {
    pub items: Vec<RecurringBreakdownItem>,
    pub total_monthly_income: Decimal,
    pub total_monthly_expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub main_currency: String,
    /// `YYYY-MM`
    pub current_month: String,
    /// January through the current month
    pub ytd: Vec<MonthlyData>,
    /// The current month followed by the projected months
    pub future: Vec<MonthlyData>,
    pub summary: ProjectionSummary,
    pub recurring_breakdown: RecurringBreakdown,
}

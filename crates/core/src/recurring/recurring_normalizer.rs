use rust_decimal::Decimal;

use super::recurring_model::Frequency;
use crate::ledger::EntryType;

/// Monthly equivalent of a recurring amount.
pub fn to_monthly_amount(amount: Decimal, frequency: Frequency) -> Decimal {
    match frequency {
        // Divide rather than multiply by a rounded 1/12.
        Frequency::Yearly => amount / Decimal::from(12),
        _ => amount * frequency.monthly_multiplier(),
    }
}

/// Monthly income and expense totals of a set of templates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlyTotals {
    pub fn savings(&self) -> Decimal {
        self.income - self.expenses
    }

    /// Savings as a percentage of income, zero without income.
    pub fn savings_rate(&self) -> Decimal {
        if self.income.is_zero() {
            Decimal::ZERO
        } else {
            self.savings() / self.income * Decimal::ONE_HUNDRED
        }
    }
}

/// Sums `(direction, monthly amount)` pairs already expressed in one currency.
pub fn monthly_totals<I>(items: I) -> MonthlyTotals
where
    I: IntoIterator<Item = (EntryType, Decimal)>,
{
    items
        .into_iter()
        .fold(MonthlyTotals::default(), |mut totals, (entry_type, amount)| {
            match entry_type {
                EntryType::Inflow => totals.income += amount,
                EntryType::Outflow => totals.expenses += amount,
            }
            totals
        })
}

//! Recurring module - recurring transaction templates and their monthly
//! equivalents.

mod recurring_model;
mod recurring_normalizer;
mod recurring_traits;

pub use recurring_model::{Frequency, RecurringTemplate};
pub use recurring_normalizer::{monthly_totals, to_monthly_amount, MonthlyTotals};
pub use recurring_traits::RecurringRepositoryTrait;

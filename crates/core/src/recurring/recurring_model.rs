//! Recurring template domain models.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ledger::EntryType;
use crate::{errors::ValidationError, Error, Result};

/// How often a recurring template fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Average number of occurrences per month.
    ///
    /// Weekly and biweekly use the 52/12 approximations rounded to two places,
    /// not calendar-exact counts.
    pub fn monthly_multiplier(&self) -> Decimal {
        match self {
            Frequency::Weekly => dec!(4.33),
            Frequency::Biweekly => dec!(2.17),
            Frequency::Monthly => Decimal::ONE,
            Frequency::Yearly => Decimal::ONE / Decimal::from(12),
        }
    }

    /// The due date following `date`.
    ///
    /// Monthly and yearly steps keep the day of month, clamped to the last
    /// day of shorter months (Jan 31 -> Feb 29 -> Mar 29).
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate> {
        let next = match self {
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Biweekly => date.checked_add_days(Days::new(14)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Yearly => date.checked_add_months(Months::new(12)),
        };
        next.ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Cannot advance {} past {}",
                self, date
            )))
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown recurring frequency: {}",
                other
            )))),
        }
    }
}

/// A ledger entry that repeats on a schedule.
///
/// Projection reads templates without applying them; `next_due_date` is only
/// advanced by whoever materializes the entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: String,
    pub account_id: String,
    pub entry_type: EntryType,
    /// Amount per occurrence, in the account currency.
    pub amount: Decimal,
    pub payee: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub is_active: bool,
}

impl RecurringTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Recurring amount must not be negative, got {}",
                self.amount
            ))));
        }
        Ok(())
    }

    /// Due dates from `next_due_date` up to and including `until`.
    /// Inactive templates have none.
    pub fn occurrences_until(&self, until: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        if !self.is_active {
            return Ok(dates);
        }
        let mut due = self.next_due_date;
        while due <= until {
            dates.push(due);
            due = self.frequency.advance(due)?;
        }
        Ok(dates)
    }
}

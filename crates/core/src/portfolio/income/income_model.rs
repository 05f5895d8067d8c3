use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::{errors::ValidationError, Error, Result};

/// A dividend paid on a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub id: String,
    pub account_id: String,
    pub symbol: String,
    pub ex_date: NaiveDate,
    pub pay_date: Option<NaiveDate>,
    pub gross_amount: Decimal,
    /// Tax withheld at source.
    pub tax_amount: Decimal,
    /// Defaults to the account currency when absent.
    pub currency: Option<String>,
}

impl Dividend {
    pub fn validate(&self) -> Result<()> {
        if self.gross_amount < Decimal::ZERO || self.tax_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Dividend {} has a negative amount (gross {}, tax {})",
                self.id, self.gross_amount, self.tax_amount
            ))));
        }
        Ok(())
    }

    /// The date that decides the tax year: payment date, else ex-date.
    pub fn tax_date(&self) -> NaiveDate {
        self.pay_date.unwrap_or(self.ex_date)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_date().year()
    }
}

/// Dividend totals of one calendar year, in the main currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendTaxSummary {
    pub year: i32,
    pub total_gross: Decimal,
    pub total_tax: Decimal,
    pub total_net: Decimal,
    pub count: usize,
}

impl DividendTaxSummary {
    pub fn new(year: i32) -> Self {
        DividendTaxSummary {
            year,
            total_gross: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_net: Decimal::ZERO,
            count: 0,
        }
    }

    pub fn add_dividend(&mut self, gross: Decimal, tax: Decimal) {
        self.total_gross += gross;
        self.total_tax += tax;
        self.total_net += gross - tax;
        self.count += 1;
    }

    pub fn round(mut self) -> Self {
        self.total_gross = self.total_gross.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.total_tax = self.total_tax.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.total_net = self.total_net.round_dp(DISPLAY_DECIMAL_PRECISION);
        self
    }
}

use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::RateTable;
use rust_decimal::Decimal;

/// Converts amounts through a rate table anchored to one base currency.
///
/// Every conversion goes `from -> base -> to`: the amount is first expressed
/// in the base currency, then divided by the target rate. No rounding is
/// applied here; callers round at the reporting boundary.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rate_table: RateTable,
}

impl CurrencyConverter {
    pub fn new(rate_table: RateTable) -> Self {
        CurrencyConverter { rate_table }
    }

    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }

    pub fn base_currency(&self) -> &str {
        self.rate_table.base_currency()
    }

    fn lookup(&self, currency: &str) -> Result<Decimal, FxError> {
        self.rate_table
            .rate(currency)
            .ok_or_else(|| FxError::UnknownCurrency(currency.to_string()))
    }

    /// Converts `amount` from `from_currency` into `to_currency`.
    ///
    /// Identity conversions return the amount untouched, even for a currency
    /// the table does not know.
    pub fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal, FxError> {
        if from_currency == to_currency {
            return Ok(amount);
        }

        let from_rate = self.lookup(from_currency)?;
        let to_rate = self.lookup(to_currency)?;

        let amount_in_base = amount * from_rate;
        Ok(amount_in_base / to_rate)
    }

    /// Helper for single unit conversion.
    pub fn get_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal, FxError> {
        self.convert_amount(Decimal::ONE, from_currency, to_currency)
    }
}

use log::{debug, error};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::income_model::{Dividend, DividendTaxSummary};
use super::income_traits::DividendRepositoryTrait;
use crate::accounts::AccountRepositoryTrait;
use crate::fx::{CurrencyConverter, FxRepositoryTrait};
use crate::settings::SettingsServiceTrait;
use crate::{Error, Result};

pub trait IncomeServiceTrait: Send + Sync {
    /// One summary per calendar year with dividends, oldest first.
    fn get_dividend_tax_summaries(&self) -> Result<Vec<DividendTaxSummary>>;

    /// Summary of one year; all zero when nothing was paid.
    fn get_dividend_tax_summary(&self, year: i32) -> Result<DividendTaxSummary>;
}

/// Groups dividends by tax year and converts them into `main_currency`.
///
/// `account_currencies` supplies the currency of dividends that carry none.
pub fn summarize_dividend_taxes(
    dividends: &[Dividend],
    account_currencies: &HashMap<String, String>,
    converter: &CurrencyConverter,
    main_currency: &str,
) -> Result<Vec<DividendTaxSummary>> {
    let mut by_year: BTreeMap<i32, DividendTaxSummary> = BTreeMap::new();

    for dividend in dividends {
        dividend.validate()?;
        let currency = match &dividend.currency {
            Some(currency) => currency.as_str(),
            None => account_currencies
                .get(&dividend.account_id)
                .map(String::as_str)
                .ok_or_else(|| {
                    Error::NotFound(format!(
                        "Account {} of dividend {}",
                        dividend.account_id, dividend.id
                    ))
                })?,
        };

        let gross = converter.convert_amount(dividend.gross_amount, currency, main_currency)?;
        let tax = converter.convert_amount(dividend.tax_amount, currency, main_currency)?;

        let year = dividend.tax_year();
        by_year
            .entry(year)
            .or_insert_with(|| DividendTaxSummary::new(year))
            .add_dividend(gross, tax);
    }

    Ok(by_year.into_values().map(DividendTaxSummary::round).collect())
}

pub struct IncomeService {
    settings_service: Arc<dyn SettingsServiceTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    dividend_repository: Arc<dyn DividendRepositoryTrait>,
}

impl IncomeService {
    pub fn new(
        settings_service: Arc<dyn SettingsServiceTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        dividend_repository: Arc<dyn DividendRepositoryTrait>,
    ) -> Self {
        IncomeService {
            settings_service,
            fx_repository,
            account_repository,
            dividend_repository,
        }
    }
}

impl IncomeServiceTrait for IncomeService {
    fn get_dividend_tax_summaries(&self) -> Result<Vec<DividendTaxSummary>> {
        debug!("Getting dividend tax summaries...");

        let main_currency = self.settings_service.get_main_currency()?;
        // Closed accounts still received taxable dividends.
        let accounts = self.account_repository.list(None)?;
        let account_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let account_currencies: HashMap<String, String> = accounts
            .into_iter()
            .map(|a| (a.id, a.currency))
            .collect();

        let dividends = self.dividend_repository.list_dividends(&account_ids)?;
        if dividends.is_empty() {
            return Ok(Vec::new());
        }

        let converter = CurrencyConverter::new(self.fx_repository.get_rate_table()?);
        summarize_dividend_taxes(&dividends, &account_currencies, &converter, &main_currency)
            .map_err(|e| {
                error!("Failed to summarize {} dividends: {}", dividends.len(), e);
                e
            })
    }

    fn get_dividend_tax_summary(&self, year: i32) -> Result<DividendTaxSummary> {
        Ok(self
            .get_dividend_tax_summaries()?
            .into_iter()
            .find(|summary| summary.year == year)
            .unwrap_or_else(|| DividendTaxSummary::new(year)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::account_types;
    use crate::fx::FxError;
    use crate::settings::SettingsService;
    use crate::test_support::{account, date, InMemoryStore};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn dividend(
        id: &str,
        account_id: &str,
        ex_date: &str,
        pay_date: Option<&str>,
        gross: Decimal,
        tax: Decimal,
    ) -> Dividend {
        Dividend {
            id: id.to_string(),
            account_id: account_id.to_string(),
            symbol: "VTI".to_string(),
            ex_date: date(ex_date),
            pay_date: pay_date.map(date),
            gross_amount: gross,
            tax_amount: tax,
            currency: None,
        }
    }

    fn service(store: Arc<InMemoryStore>) -> IncomeService {
        IncomeService::new(
            Arc::new(SettingsService::new(store.clone())),
            store.clone(),
            store.clone(),
            store,
        )
    }

    #[test]
    fn test_groups_by_pay_date_then_ex_date() {
        let store = InMemoryStore::new()
            .with_account(account("ira", account_types::STOCK, "USD", dec!(0)))
            // Ex-date in 2023, paid in 2024: counts for 2024.
            .with_dividend(dividend("d1", "ira", "2023-12-28", Some("2024-01-05"), dec!(100), dec!(15)))
            .with_dividend(dividend("d2", "ira", "2023-06-01", None, dec!(40), dec!(6)))
            .with_dividend(dividend("d3", "ira", "2024-03-01", None, dec!(60), dec!(9)))
            .into_arc();

        let summaries = service(store).get_dividend_tax_summaries().unwrap();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].year, 2023);
        assert_eq!(summaries[0].count, 1);
        assert_eq!(summaries[0].total_gross, dec!(40));

        assert_eq!(summaries[1].year, 2024);
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].total_gross, dec!(160));
        assert_eq!(summaries[1].total_tax, dec!(24));
        assert_eq!(summaries[1].total_net, dec!(136));
    }

    #[test]
    fn test_converts_into_main_currency() {
        let mut euro_payout = dividend("d2", "ira", "2024-05-01", None, dec!(100), dec!(25));
        euro_payout.currency = Some("EUR".to_string());

        let store = InMemoryStore::new()
            .with_account(account("ira", account_types::STOCK, "GBP", dec!(0)))
            .with_rates("USD", &[("GBP", dec!(1.25)), ("EUR", dec!(1.10))])
            .with_dividend(dividend("d1", "ira", "2024-02-01", None, dec!(80), dec!(0)))
            .with_dividend(euro_payout)
            .into_arc();

        let summary = service(store).get_dividend_tax_summary(2024).unwrap();
        // 80 GBP = 100 USD, 100 EUR = 110 USD, tax 25 EUR = 27.50 USD
        assert_eq!(summary.total_gross, dec!(210));
        assert_eq!(summary.total_tax, dec!(27.50));
        assert_eq!(summary.total_net, dec!(182.50));
    }

    #[test]
    fn test_missing_rate_fails_the_summary() {
        let store = InMemoryStore::new()
            .with_account(account("ira", account_types::STOCK, "CHF", dec!(0)))
            .with_dividend(dividend("d1", "ira", "2024-02-01", None, dec!(10), dec!(1)))
            .into_arc();

        assert!(matches!(
            service(store).get_dividend_tax_summaries(),
            Err(Error::Fx(FxError::UnknownCurrency(code))) if code == "CHF"
        ));
    }

    #[test]
    fn test_year_without_dividends_is_zero() {
        let store = InMemoryStore::new()
            .with_account(account("ira", account_types::STOCK, "USD", dec!(0)))
            .into_arc();
        let summary = service(store).get_dividend_tax_summary(2022).unwrap();
        assert_eq!(summary, DividendTaxSummary::new(2022));
    }
}

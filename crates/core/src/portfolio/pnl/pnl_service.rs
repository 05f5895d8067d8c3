use chrono::{Datelike, Months, NaiveDate};
use log::debug;
use std::sync::Arc;

use super::pnl_calculator::{month_detail, summarize_year};
use super::pnl_model::{PnLMonthDetail, PnLSummary};
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::{Result, ValidationError};
use crate::fx::{CurrencyConverter, FxRepositoryTrait};
use crate::ledger::{LedgerEntry, LedgerRepositoryTrait};
use crate::settings::SettingsServiceTrait;
use crate::Error;

pub trait PnLServiceTrait: Send + Sync {
    fn get_pnl_summary(&self, year: i32) -> Result<PnLSummary>;

    /// Detail of one month given as `YYYY-MM`.
    fn get_month_detail(&self, month: &str) -> Result<PnLMonthDetail>;
}

pub struct PnLService {
    settings_service: Arc<dyn SettingsServiceTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl PnLService {
    pub fn new(
        settings_service: Arc<dyn SettingsServiceTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        PnLService {
            settings_service,
            fx_repository,
            account_repository,
            ledger_repository,
        }
    }

    fn load(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(Vec<Account>, Vec<LedgerEntry>, CurrencyConverter)> {
        let accounts = self.account_repository.list(Some(true))?;
        let account_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let entries = self
            .ledger_repository
            .list_in_range(&account_ids, start, end)?;
        let converter = CurrencyConverter::new(self.fx_repository.get_rate_table()?);
        debug!(
            "Loaded {} entries between {} and {} for P&L",
            entries.len(),
            start,
            end
        );
        Ok((accounts, entries, converter))
    }
}

fn invalid_period(period: String) -> Error {
    Error::Validation(ValidationError::InvalidInput(format!(
        "Invalid P&L period: {}",
        period
    )))
}

impl PnLServiceTrait for PnLService {
    fn get_pnl_summary(&self, year: i32) -> Result<PnLSummary> {
        let start =
            NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| invalid_period(year.to_string()))?;
        let end =
            NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| invalid_period(year.to_string()))?;
        let main_currency = self.settings_service.get_main_currency()?;

        let (accounts, entries, converter) = self.load(start, end)?;
        summarize_year(&entries, &accounts, &converter, &main_currency, year)
    }

    fn get_month_detail(&self, month: &str) -> Result<PnLMonthDetail> {
        let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| invalid_period(month.to_string()))?;
        let main_currency = self.settings_service.get_main_currency()?;

        let (accounts, entries, converter) = self.load(start, end)?;
        month_detail(
            &entries,
            &accounts,
            &converter,
            &main_currency,
            start.year(),
            start.month(),
        )
    }
}

//! In-memory repositories shared by service tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::{Error, Result};
use crate::fx::{ExchangeRate, FxRepositoryTrait, RateTable};
use crate::holdings::{HoldingState, HoldingsRepositoryTrait, StockTransaction};
use crate::ledger::{EntryType, LedgerEntry, LedgerRepositoryTrait};
use crate::portfolio::income::{Dividend, DividendRepositoryTrait};
use crate::recurring::{RecurringRepositoryTrait, RecurringTemplate};
use crate::settings::SettingsRepositoryTrait;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn account(id: &str, account_type: &str, currency: &str, initial_balance: Decimal) -> Account {
    Account {
        id: id.to_string(),
        name: format!("{} account", id),
        account_type: account_type.to_string(),
        currency: currency.to_string(),
        initial_balance,
        is_active: true,
        ..Default::default()
    }
}

pub fn entry(
    id: &str,
    account_id: &str,
    entry_type: EntryType,
    amount: Decimal,
    on: &str,
) -> LedgerEntry {
    LedgerEntry {
        id: id.to_string(),
        account_id: account_id.to_string(),
        entry_type,
        amount,
        date: date(on),
        payee: None,
        category: None,
        notes: None,
        transfer_id: None,
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    accounts: Vec<Account>,
    entries: Vec<LedgerEntry>,
    stock_transactions: Vec<StockTransaction>,
    cached_holdings: RwLock<HashMap<String, Vec<HoldingState>>>,
    templates: Vec<RecurringTemplate>,
    dividends: Vec<Dividend>,
    rate_table: Option<RateTable>,
    settings: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn with_entry(mut self, entry: LedgerEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_stock_transaction(mut self, tx: StockTransaction) -> Self {
        self.stock_transactions.push(tx);
        self
    }

    pub fn with_template(mut self, template: RecurringTemplate) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_dividend(mut self, dividend: Dividend) -> Self {
        self.dividends.push(dividend);
        self
    }

    /// Rate table anchored to `base`, `rates` given as value of one unit in `base`.
    pub fn with_rates(mut self, base: &str, rates: &[(&str, Decimal)]) -> Self {
        let rates = rates
            .iter()
            .map(|(currency, rate)| ExchangeRate::new(*currency, *rate))
            .collect();
        self.rate_table = Some(RateTable::new(base, rates).unwrap());
        self
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings
            .get_mut()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_cached_holdings(&self, account_id: &str, holdings: Vec<HoldingState>) {
        self.cached_holdings
            .write()
            .unwrap()
            .insert(account_id.to_string(), holdings);
    }
}

impl AccountRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| is_active_filter.map_or(true, |active| a.is_active == active))
            .cloned()
            .collect())
    }
}

impl LedgerRepositoryTrait for InMemoryStore {
    fn list_by_account(&self, account_id: &str) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect())
    }

    fn list_by_accounts(&self, account_ids: &[String]) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| account_ids.contains(&e.account_id))
            .cloned()
            .collect())
    }

    fn list_in_range(
        &self,
        account_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| account_ids.contains(&e.account_id) && e.date >= start && e.date <= end)
            .cloned()
            .collect())
    }

    fn list_by_transfer(&self, transfer_id: &str) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.transfer_id.as_deref() == Some(transfer_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HoldingsRepositoryTrait for InMemoryStore {
    fn list_stock_transactions(&self, account_id: &str) -> Result<Vec<StockTransaction>> {
        Ok(self
            .stock_transactions
            .iter()
            .filter(|tx| tx.account_id == account_id)
            .cloned()
            .collect())
    }

    fn list_stock_transactions_for_accounts(
        &self,
        account_ids: &[String],
    ) -> Result<Vec<StockTransaction>> {
        Ok(self
            .stock_transactions
            .iter()
            .filter(|tx| account_ids.contains(&tx.account_id))
            .cloned()
            .collect())
    }

    fn get_cached_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>> {
        Ok(self
            .cached_holdings
            .read()
            .unwrap()
            .get(account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_holdings(&self, account_id: &str, holdings: &[HoldingState]) -> Result<()> {
        self.set_cached_holdings(account_id, holdings.to_vec());
        Ok(())
    }
}

impl RecurringRepositoryTrait for InMemoryStore {
    fn list_templates(&self, is_active_filter: Option<bool>) -> Result<Vec<RecurringTemplate>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| is_active_filter.map_or(true, |active| t.is_active == active))
            .cloned()
            .collect())
    }
}

impl DividendRepositoryTrait for InMemoryStore {
    fn list_dividends(&self, account_ids: &[String]) -> Result<Vec<Dividend>> {
        Ok(self
            .dividends
            .iter()
            .filter(|d| account_ids.contains(&d.account_id))
            .cloned()
            .collect())
    }
}

impl FxRepositoryTrait for InMemoryStore {
    fn get_rate_table(&self) -> Result<RateTable> {
        match &self.rate_table {
            Some(table) => Ok(table.clone()),
            None => Ok(RateTable::base_only("USD")?),
        }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemoryStore {
    fn get_setting(&self, setting_key: &str) -> Result<String> {
        self.settings
            .read()
            .unwrap()
            .get(setting_key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Setting {}", setting_key)))
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        self.settings
            .write()
            .unwrap()
            .insert(setting_key.to_string(), setting_value.to_string());
        Ok(())
    }
}

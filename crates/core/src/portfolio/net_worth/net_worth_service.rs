//! Net worth calculation service implementation.

use log::{debug, error};
use std::sync::Arc;

use super::net_worth_calculator::calculate_net_worth;
use super::net_worth_model::NetWorthSummary;
use super::net_worth_traits::NetWorthServiceTrait;
use crate::accounts::{account_types, AccountRepositoryTrait};
use crate::errors::Result;
use crate::fx::{CurrencyConverter, FxRepositoryTrait};
use crate::holdings::{replay_all, HoldingState, HoldingsRepositoryTrait};
use crate::ledger::LedgerRepositoryTrait;
use crate::settings::SettingsServiceTrait;

/// Service for calculating net worth.
pub struct NetWorthService {
    settings_service: Arc<dyn SettingsServiceTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
}

impl NetWorthService {
    /// Creates a new NetWorthService instance.
    pub fn new(
        settings_service: Arc<dyn SettingsServiceTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    ) -> Self {
        Self {
            settings_service,
            fx_repository,
            account_repository,
            ledger_repository,
            holdings_repository,
        }
    }

    /// Replays the holdings of the given stock accounts.
    fn replay_holdings(&self, stock_account_ids: &[String]) -> Result<Vec<HoldingState>> {
        if stock_account_ids.is_empty() {
            return Ok(Vec::new());
        }
        let transactions = self
            .holdings_repository
            .list_stock_transactions_for_accounts(stock_account_ids)?;
        let states = replay_all(&transactions)?;
        Ok(states.into_iter().filter(HoldingState::is_open).collect())
    }
}

impl NetWorthServiceTrait for NetWorthService {
    fn get_net_worth(&self) -> Result<NetWorthSummary> {
        let main_currency = self.settings_service.get_main_currency()?;
        debug!("Calculating net worth in {}", main_currency);

        let accounts = self.account_repository.list(Some(true))?;
        if accounts.is_empty() {
            return Ok(NetWorthSummary::empty(main_currency));
        }

        let account_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let stock_account_ids: Vec<String> = accounts
            .iter()
            .filter(|a| a.account_type == account_types::STOCK)
            .map(|a| a.id.clone())
            .collect();

        let entries = self.ledger_repository.list_by_accounts(&account_ids)?;
        let holdings = self.replay_holdings(&stock_account_ids)?;
        let converter = CurrencyConverter::new(self.fx_repository.get_rate_table()?);

        calculate_net_worth(&accounts, &entries, &holdings, &converter, &main_currency).map_err(
            |e| {
                error!("Net worth aggregation failed: {}", e);
                e
            },
        )
    }
}

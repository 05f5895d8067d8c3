use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::cost_basis::{replay, replay_all};
use super::holdings_model::HoldingState;
use super::holdings_traits::HoldingsRepositoryTrait;
use crate::errors::Result;

/// Trait defining the contract for holdings operations.
#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Open positions of an account, replayed from the log on read.
    fn get_holding_states(&self, account_id: &str) -> Result<Vec<HoldingState>>;

    /// One position, replayed from the log. Closed or unknown positions come
    /// back with zero shares.
    fn get_holding_state(&self, account_id: &str, symbol: &str) -> Result<HoldingState>;

    /// Cached rows that no longer match a fresh replay, with their replayed value.
    fn find_stale_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>>;

    /// Rebuilds the holdings cache of an account from its transaction log.
    async fn recalculate_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>>;
}

pub struct HoldingsService {
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(holdings_repository: Arc<dyn HoldingsRepositoryTrait>) -> Self {
        Self {
            holdings_repository,
        }
    }

    fn replay_open_positions(&self, account_id: &str) -> Result<Vec<HoldingState>> {
        let transactions = self.holdings_repository.list_stock_transactions(account_id)?;
        let states = replay_all(&transactions)?;
        Ok(states.into_iter().filter(HoldingState::is_open).collect())
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    fn get_holding_states(&self, account_id: &str) -> Result<Vec<HoldingState>> {
        self.replay_open_positions(account_id)
    }

    fn get_holding_state(&self, account_id: &str, symbol: &str) -> Result<HoldingState> {
        let transactions: Vec<_> = self
            .holdings_repository
            .list_stock_transactions(account_id)?
            .into_iter()
            .filter(|tx| tx.symbol == symbol)
            .collect();
        replay(symbol, account_id, &transactions)
    }

    fn find_stale_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>> {
        let cached = self.holdings_repository.get_cached_holdings(account_id)?;
        let transactions = self.holdings_repository.list_stock_transactions(account_id)?;
        let replayed = replay_all(&transactions)?;

        let mut stale: Vec<HoldingState> = replayed
            .iter()
            .filter(|state| {
                let cached_row = cached.iter().find(|c| c.symbol == state.symbol);
                match cached_row {
                    Some(row) => row != *state,
                    None => state.is_open(),
                }
            })
            .cloned()
            .collect();

        // Cached rows for symbols that have no transactions left.
        for row in &cached {
            if !replayed.iter().any(|state| state.symbol == row.symbol) {
                stale.push(HoldingState::empty(row.symbol.clone(), account_id));
            }
        }

        debug!(
            "Account {}: {} stale holding rows out of {}",
            account_id,
            stale.len(),
            cached.len()
        );
        Ok(stale)
    }

    async fn recalculate_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>> {
        let open_positions = self.replay_open_positions(account_id)?;
        self.holdings_repository
            .save_holdings(account_id, &open_positions)
            .await?;
        info!(
            "Recalculated {} holdings for account {}",
            open_positions.len(),
            account_id
        );
        Ok(open_positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdings::{StockTransaction, StockTransactionType};
    use crate::test_support::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tx(
        id: &str,
        symbol: &str,
        tx_type: StockTransactionType,
        shares: Decimal,
        price: Decimal,
    ) -> StockTransaction {
        StockTransaction {
            id: id.to_string(),
            account_id: "ira".to_string(),
            symbol: symbol.to_string(),
            tx_type,
            shares,
            price,
            fees: Decimal::ZERO,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn store() -> Arc<InMemoryStore> {
        InMemoryStore::new()
            .with_stock_transaction(tx("1", "VTI", StockTransactionType::Buy, dec!(4), dec!(250)))
            .with_stock_transaction(tx("2", "BND", StockTransactionType::Buy, dec!(10), dec!(72)))
            .with_stock_transaction(tx("3", "BND", StockTransactionType::Sell, dec!(10), dec!(75)))
            .into_arc()
    }

    #[test]
    fn test_get_holding_states_returns_open_positions_only() {
        let service = HoldingsService::new(store());
        let states = service.get_holding_states("ira").unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].symbol, "VTI");
        assert_eq!(states[0].total_cost, dec!(1000));
    }

    #[test]
    fn test_get_holding_state_for_closed_position() {
        let service = HoldingsService::new(store());
        let state = service.get_holding_state("ira", "BND").unwrap();
        assert_eq!(state.shares, Decimal::ZERO);
        assert_eq!(state.avg_cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_recalculate_persists_cache_and_clears_staleness() {
        let store = store();
        let service = HoldingsService::new(store.clone());

        // Empty cache: VTI is missing.
        let stale = service.find_stale_holdings("ira").unwrap();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].symbol, "VTI");

        let saved = service.recalculate_holdings("ira").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(store.get_cached_holdings("ira").unwrap(), saved);
        assert!(service.find_stale_holdings("ira").unwrap().is_empty());
    }

    #[test]
    fn test_orphaned_cache_row_is_stale() {
        let store = store();
        store.set_cached_holdings(
            "ira",
            vec![
                HoldingState {
                    symbol: "VTI".to_string(),
                    account_id: "ira".to_string(),
                    shares: dec!(4),
                    avg_cost: dec!(250),
                    total_cost: dec!(1000),
                },
                HoldingState {
                    symbol: "GONE".to_string(),
                    account_id: "ira".to_string(),
                    shares: dec!(1),
                    avg_cost: dec!(1),
                    total_cost: dec!(1),
                },
            ],
        );
        let service = HoldingsService::new(store);
        let stale = service.find_stale_holdings("ira").unwrap();
        assert_eq!(stale, vec![HoldingState::empty("GONE", "ira")]);
    }
}

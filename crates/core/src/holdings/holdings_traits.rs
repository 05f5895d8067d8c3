use async_trait::async_trait;

use super::holdings_model::{HoldingState, StockTransaction};
use crate::errors::Result;

/// Access to the stock transaction log and the holdings cache derived from it.
#[async_trait]
pub trait HoldingsRepositoryTrait: Send + Sync {
    /// Stock transactions of one account, in any order.
    fn list_stock_transactions(&self, account_id: &str) -> Result<Vec<StockTransaction>>;

    /// Stock transactions of several accounts, in any order.
    fn list_stock_transactions_for_accounts(
        &self,
        account_ids: &[String],
    ) -> Result<Vec<StockTransaction>>;

    /// The cached holding rows of one account.
    fn get_cached_holdings(&self, account_id: &str) -> Result<Vec<HoldingState>>;

    /// Replaces every cached holding row of the account with `holdings`.
    async fn save_holdings(&self, account_id: &str, holdings: &[HoldingState]) -> Result<()>;
}

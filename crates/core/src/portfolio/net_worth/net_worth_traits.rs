//! Net worth service traits.

use super::net_worth_model::NetWorthSummary;
use crate::errors::Result;

/// Trait defining the contract for net worth service operations.
pub trait NetWorthServiceTrait: Send + Sync {
    /// Current net worth of all active accounts in the main currency.
    ///
    /// Net Worth = bank + cash + stock cost basis + assets - loans - credit owed
    ///
    /// Holdings are replayed from the stock transaction log; the holdings
    /// cache is never read.
    fn get_net_worth(&self) -> Result<NetWorthSummary>;
}

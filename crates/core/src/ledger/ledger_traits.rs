use chrono::NaiveDate;

use super::ledger_model::LedgerEntry;
use crate::errors::Result;

/// Read access to ledger entries (`account_transactions`).
pub trait LedgerRepositoryTrait: Send + Sync {
    /// All entries of one account, in any order.
    fn list_by_account(&self, account_id: &str) -> Result<Vec<LedgerEntry>>;

    /// All entries of the given accounts.
    fn list_by_accounts(&self, account_ids: &[String]) -> Result<Vec<LedgerEntry>>;

    /// Entries of the given accounts dated within `[start, end]`.
    fn list_in_range(
        &self,
        account_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>>;

    /// Entries linked to one transfer.
    fn list_by_transfer(&self, transfer_id: &str) -> Result<Vec<LedgerEntry>>;
}

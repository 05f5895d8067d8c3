//! Write-side seams used by the transfer manager.

use std::sync::Arc;

use super::transfers_model::Transfer;
use crate::errors::Result;
use crate::ledger::{LedgerEntry, NewLedgerEntry};

/// Ledger writes available inside one unit of work.
pub trait LedgerWriter {
    /// Inserts an entry and returns it as stored.
    fn insert_entry(&mut self, entry: NewLedgerEntry) -> Result<LedgerEntry>;

    fn insert_transfer(&mut self, transfer: &Transfer) -> Result<()>;

    /// Deletes every entry linked to the transfer, returning how many were removed.
    fn delete_entries_by_transfer(&mut self, transfer_id: &str) -> Result<usize>;

    /// Deletes the transfer row, returning how many were removed.
    fn delete_transfer(&mut self, transfer_id: &str) -> Result<usize>;
}

/// Runs a closure as one atomic unit.
///
/// If the closure returns an error, none of its writes may remain visible.
pub trait LedgerTransactionExecutor: Send + Sync {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerWriter) -> Result<T>;
}

impl<E: LedgerTransactionExecutor> LedgerTransactionExecutor for Arc<E> {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerWriter) -> Result<T>,
    {
        (**self).execute(f)
    }
}

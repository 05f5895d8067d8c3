//! Ledger module - ledger entries and account balances.

mod ledger_calculator;
mod ledger_model;
mod ledger_service;
mod ledger_traits;

pub use ledger_calculator::{
    calculate_balance, credit_owed, net_deltas_by_account, total_inflow_outflow,
};
pub use ledger_model::{AccountBalance, EntryType, LedgerEntry, NewLedgerEntry};
pub use ledger_service::{LedgerService, LedgerServiceTrait};
pub use ledger_traits::LedgerRepositoryTrait;

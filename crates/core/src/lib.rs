//! Ledgerfolio Core - ledger aggregation and projection engine.
//!
//! Turns ledger entries, stock transactions, recurring templates and
//! dividends into balances, cost bases, monthly P&L and net worth
//! projections across currencies. Storage is reached only through the
//! repository traits defined here.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod holdings;
pub mod ledger;
pub mod portfolio;
pub mod recurring;
pub mod settings;
pub mod transfers;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

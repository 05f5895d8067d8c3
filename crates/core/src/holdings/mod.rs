//! Holdings module - stock transactions, weighted-average cost basis replay
//! and the materialized holdings cache.

pub mod cost_basis;
mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use cost_basis::{replay, replay_all};
pub use holdings_model::{HoldingState, StockTransaction, StockTransactionType};
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
pub use holdings_traits::HoldingsRepositoryTrait;

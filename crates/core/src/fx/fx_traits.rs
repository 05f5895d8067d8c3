use super::fx_model::RateTable;
use crate::errors::Result;

/// Trait defining the contract for reading exchange rates.
///
/// Rates come from an external daily feed. The engine performs no fetching,
/// caching or staleness handling of its own.
pub trait FxRepositoryTrait: Send + Sync {
    /// Returns the latest rate table, anchored to its base currency.
    fn get_rate_table(&self) -> Result<RateTable>;
}

use super::income_model::Dividend;
use crate::errors::Result;

pub trait DividendRepositoryTrait: Send + Sync {
    /// Dividends recorded on the given accounts.
    fn list_dividends(&self, account_ids: &[String]) -> Result<Vec<Dividend>>;
}

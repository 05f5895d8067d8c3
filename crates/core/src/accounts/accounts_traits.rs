//! Repository traits for accounts.

use super::accounts_model::Account;
use crate::errors::Result;

/// Read access to a tenant's accounts.
///
/// Creation, rename and deletion live in the CRUD layer outside the engine.
pub trait AccountRepositoryTrait: Send + Sync {
    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists accounts, optionally filtered by active status.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

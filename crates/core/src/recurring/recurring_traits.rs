use super::recurring_model::RecurringTemplate;
use crate::errors::Result;

/// Read access to recurring transaction templates.
pub trait RecurringRepositoryTrait: Send + Sync {
    /// Lists templates, optionally filtered by active status.
    fn list_templates(&self, is_active_filter: Option<bool>) -> Result<Vec<RecurringTemplate>>;
}

//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;

/// Key/value store for tenant settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key. Fails with `Error::NotFound` when unset.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}

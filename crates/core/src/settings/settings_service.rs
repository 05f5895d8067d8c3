use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::settings_model::{
    setting_keys, validate_currency_code, validate_projection_months, Settings, SettingsUpdate,
};
use super::SettingsRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Stored settings, with defaults for every unset key.
    fn get_settings(&self) -> Result<Settings>;

    fn get_main_currency(&self) -> Result<String>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self {
            settings_repository,
        }
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        let defaults = Settings::default();

        let main_currency = match self.get_setting_value(setting_keys::MAIN_CURRENCY)? {
            Some(value) => {
                validate_currency_code(&value)?;
                value
            }
            None => defaults.main_currency,
        };

        let projection_months_ahead =
            match self.get_setting_value(setting_keys::PROJECTION_MONTHS_AHEAD)? {
                Some(value) => {
                    let months = value.trim().parse::<u32>().map_err(|_| {
                        Error::Validation(ValidationError::InvalidInput(format!(
                            "Stored projection horizon is not a number: '{}'",
                            value
                        )))
                    })?;
                    validate_projection_months(months)?;
                    months
                }
                None => defaults.projection_months_ahead,
            };

        Ok(Settings {
            main_currency,
            projection_months_ahead,
        })
    }

    fn get_main_currency(&self) -> Result<String> {
        Ok(self.get_settings()?.main_currency)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        new_settings.validate()?;

        if let Some(currency) = &new_settings.main_currency {
            let current = self.get_main_currency()?;
            if &current != currency {
                warn!(
                    "Main currency changes from {} to {}; every aggregate is re-expressed",
                    current, currency
                );
            }
            self.settings_repository
                .update_setting(setting_keys::MAIN_CURRENCY, currency)
                .await?;
        }

        if let Some(months) = new_settings.projection_months_ahead {
            self.settings_repository
                .update_setting(setting_keys::PROJECTION_MONTHS_AHEAD, &months.to_string())
                .await?;
        }

        debug!("Settings updated: {:?}", new_settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let service = SettingsService::new(InMemoryStore::new().into_arc());
        assert_eq!(service.get_settings().unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_update_then_read_back() {
        let service = SettingsService::new(InMemoryStore::new().into_arc());
        service
            .update_settings(&SettingsUpdate {
                main_currency: Some("EUR".to_string()),
                projection_months_ahead: Some(6),
            })
            .await
            .unwrap();

        let settings = service.get_settings().unwrap();
        assert_eq!(settings.main_currency, "EUR");
        assert_eq!(settings.projection_months_ahead, 6);
    }

    #[tokio::test]
    async fn test_invalid_update_writes_nothing() {
        let service = SettingsService::new(InMemoryStore::new().into_arc());
        let result = service
            .update_settings(&SettingsUpdate {
                main_currency: Some("EUR".to_string()),
                projection_months_ahead: Some(0),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(service.get_main_currency().unwrap(), "USD");
    }

    #[test]
    fn test_corrupt_stored_value_is_an_error() {
        let store = InMemoryStore::new()
            .with_setting(setting_keys::PROJECTION_MONTHS_AHEAD, "twelve")
            .into_arc();
        let service = SettingsService::new(store);
        assert!(matches!(
            service.get_settings(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }
}

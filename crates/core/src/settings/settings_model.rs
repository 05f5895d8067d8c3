//! Settings domain models.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAIN_CURRENCY, DEFAULT_PROJECTION_MONTHS_AHEAD};
use crate::{errors::ValidationError, Error, Result};

/// Keys under which settings are stored.
pub mod setting_keys {
    pub const MAIN_CURRENCY: &str = "main_currency";
    pub const PROJECTION_MONTHS_AHEAD: &str = "projection_months_ahead";
}

/// Upper bound on the projection horizon.
pub const MAX_PROJECTION_MONTHS_AHEAD: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Tenant reporting currency; every aggregate is expressed in it.
    pub main_currency: String,
    pub projection_months_ahead: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_currency: DEFAULT_MAIN_CURRENCY.to_string(),
            projection_months_ahead: DEFAULT_PROJECTION_MONTHS_AHEAD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub main_currency: Option<String>,
    pub projection_months_ahead: Option<u32>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(currency) = &self.main_currency {
            validate_currency_code(currency)?;
        }
        if let Some(months) = self.projection_months_ahead {
            validate_projection_months(months)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_currency_code(currency: &str) -> Result<()> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Main currency must be a three-letter ISO code, got '{}'",
            currency
        ))))
    }
}

pub(crate) fn validate_projection_months(months: u32) -> Result<()> {
    if months == 0 || months > MAX_PROJECTION_MONTHS_AHEAD {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Projection horizon must be between 1 and {} months, got {}",
            MAX_PROJECTION_MONTHS_AHEAD, months
        ))));
    }
    Ok(())
}

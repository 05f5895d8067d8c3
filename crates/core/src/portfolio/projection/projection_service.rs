use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use super::projection_calculator::{build_recurring_breakdown, generate_projection};
use super::projection_model::ProjectionResult;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::fx::{CurrencyConverter, FxRepositoryTrait};
use crate::portfolio::net_worth::NetWorthServiceTrait;
use crate::recurring::RecurringRepositoryTrait;
use crate::settings::SettingsServiceTrait;

pub trait ProjectionServiceTrait: Send + Sync {
    /// Year-to-date and forward net worth series around the month of `as_of`.
    fn get_projection(&self, as_of: NaiveDate) -> Result<ProjectionResult>;
}

pub struct ProjectionService {
    settings_service: Arc<dyn SettingsServiceTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    recurring_repository: Arc<dyn RecurringRepositoryTrait>,
    net_worth_service: Arc<dyn NetWorthServiceTrait>,
}

impl ProjectionService {
    pub fn new(
        settings_service: Arc<dyn SettingsServiceTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        recurring_repository: Arc<dyn RecurringRepositoryTrait>,
        net_worth_service: Arc<dyn NetWorthServiceTrait>,
    ) -> Self {
        Self {
            settings_service,
            fx_repository,
            account_repository,
            recurring_repository,
            net_worth_service,
        }
    }
}

impl ProjectionServiceTrait for ProjectionService {
    fn get_projection(&self, as_of: NaiveDate) -> Result<ProjectionResult> {
        let settings = self.settings_service.get_settings()?;
        let current = self.net_worth_service.get_net_worth()?;

        let templates = self.recurring_repository.list_templates(Some(true))?;
        let accounts = self.account_repository.list(Some(true))?;
        let converter = CurrencyConverter::new(self.fx_repository.get_rate_table()?);

        let (breakdown, totals) = build_recurring_breakdown(
            &templates,
            &accounts,
            &converter,
            &settings.main_currency,
        )?;
        debug!(
            "Projecting {} months from {} templates, savings {}",
            settings.projection_months_ahead,
            breakdown.items.len(),
            totals.savings()
        );

        generate_projection(
            &current,
            breakdown,
            totals,
            as_of,
            settings.projection_months_ahead,
        )
    }
}

//! Linear net worth projection.
//!
//! Only liquid money moves: each month shifts bank, liquid assets and net
//! worth by the monthly savings, while cash, investments, assets and debt
//! stay at their current values. Nothing compounds.

use chrono::{Datelike, Months, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::projection_model::{
    MonthlyData, ProjectionResult, ProjectionSummary, RecurringBreakdown, RecurringBreakdownItem,
};
use crate::accounts::Account;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::fx::CurrencyConverter;
use crate::portfolio::net_worth::NetWorthSummary;
use crate::recurring::{monthly_totals, to_monthly_amount, MonthlyTotals, RecurringTemplate};

const MONTH_FORMAT: &str = "%Y-%m";

/// Monthly equivalents of the active templates, converted into `main_currency`.
///
/// Templates on accounts missing from `accounts` are skipped. The returned
/// totals are unrounded; the breakdown is rounded for display.
pub fn build_recurring_breakdown(
    templates: &[RecurringTemplate],
    accounts: &[Account],
    converter: &CurrencyConverter,
    main_currency: &str,
) -> Result<(RecurringBreakdown, MonthlyTotals)> {
    let accounts_by_id: HashMap<&str, &Account> =
        accounts.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut items = Vec::new();
    let mut amounts = Vec::new();

    for template in templates {
        if !template.is_active {
            warn!("Skipping inactive recurring template {}", template.id);
            continue;
        }
        let Some(account) = accounts_by_id.get(template.account_id.as_str()) else {
            warn!(
                "Skipping recurring template {}: account {} is not active",
                template.id, template.account_id
            );
            continue;
        };
        template.validate()?;

        let monthly_native = to_monthly_amount(template.amount, template.frequency);
        let monthly_main =
            converter.convert_amount(monthly_native, &account.currency, main_currency)?;
        amounts.push((template.entry_type, monthly_main));

        items.push(RecurringBreakdownItem {
            id: template.id.clone(),
            account_id: template.account_id.clone(),
            payee: template.payee.clone(),
            category: template.category.clone(),
            entry_type: template.entry_type,
            amount: template.amount,
            currency: account.currency.clone(),
            frequency: template.frequency,
            monthly_amount: monthly_main.round_dp(DISPLAY_DECIMAL_PRECISION),
        });
    }

    items.sort_by(|a, b| a.id.cmp(&b.id));
    let totals = monthly_totals(amounts);

    Ok((
        RecurringBreakdown {
            items,
            total_monthly_income: totals.income.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_monthly_expenses: totals.expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
        },
        totals,
    ))
}

/// Figures of one month, shifted by `offset` on the liquid side only.
fn month_data(
    current: &NetWorthSummary,
    month_start: NaiveDate,
    offset: Decimal,
    is_projected: bool,
) -> MonthlyData {
    MonthlyData {
        month: month_start.format(MONTH_FORMAT).to_string(),
        net_worth: (current.total_net_worth + offset).round_dp(DISPLAY_DECIMAL_PRECISION),
        liquid_assets: (current.liquid_assets + offset).round_dp(DISPLAY_DECIMAL_PRECISION),
        bank: (current.by_type.bank + offset).round_dp(DISPLAY_DECIMAL_PRECISION),
        cash: current.by_type.cash,
        investments: current.investments,
        assets: current.by_type.asset,
        total_debt: current.total_debt,
        is_projected,
    }
}

fn month_out_of_range(month_start: NaiveDate, months: u32) -> Error {
    Error::Unexpected(format!(
        "Month {} months after {} is out of range",
        months, month_start
    ))
}

/// Backward series, January through the month of `as_of`.
pub fn project_year_to_date(
    current: &NetWorthSummary,
    monthly_savings: Decimal,
    as_of: NaiveDate,
) -> Result<Vec<MonthlyData>> {
    let current_month = as_of.month();
    (1..=current_month)
        .map(|month| {
            let month_start = NaiveDate::from_ymd_opt(as_of.year(), month, 1)
                .ok_or_else(|| month_out_of_range(as_of, 0))?;
            let distance = Decimal::from(current_month - month);
            Ok(month_data(
                current,
                month_start,
                -(distance * monthly_savings),
                month != current_month,
            ))
        })
        .collect()
}

/// Forward series: the month of `as_of` followed by `months_ahead` months.
pub fn project_future(
    current: &NetWorthSummary,
    monthly_savings: Decimal,
    as_of: NaiveDate,
    months_ahead: u32,
) -> Result<Vec<MonthlyData>> {
    let first_of_month = as_of
        .with_day(1)
        .ok_or_else(|| month_out_of_range(as_of, 0))?;
    (0..=months_ahead)
        .map(|distance| {
            let month_start = first_of_month
                .checked_add_months(Months::new(distance))
                .ok_or_else(|| month_out_of_range(first_of_month, distance))?;
            Ok(month_data(
                current,
                month_start,
                Decimal::from(distance) * monthly_savings,
                distance > 0,
            ))
        })
        .collect()
}

/// Builds the full projection from the current net worth and recurring totals.
pub fn generate_projection(
    current: &NetWorthSummary,
    recurring_breakdown: RecurringBreakdown,
    totals: MonthlyTotals,
    as_of: NaiveDate,
    months_ahead: u32,
) -> Result<ProjectionResult> {
    let monthly_savings = totals.savings();
    let months_remaining_in_year = 12 - as_of.month();

    let ytd = project_year_to_date(current, monthly_savings, as_of)?;
    let future = project_future(current, monthly_savings, as_of, months_ahead)?;

    let summary = ProjectionSummary {
        current_net_worth: current.total_net_worth,
        monthly_income: totals.income.round_dp(DISPLAY_DECIMAL_PRECISION),
        monthly_expenses: totals.expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
        monthly_savings: monthly_savings.round_dp(DISPLAY_DECIMAL_PRECISION),
        savings_rate: totals.savings_rate().round_dp(DISPLAY_DECIMAL_PRECISION),
        projected_year_end_net_worth: (current.total_net_worth
            + Decimal::from(months_remaining_in_year) * monthly_savings)
            .round_dp(DISPLAY_DECIMAL_PRECISION),
        months_remaining_in_year,
        projected_net_worth_end_of_horizon: (current.total_net_worth
            + Decimal::from(months_ahead) * monthly_savings)
            .round_dp(DISPLAY_DECIMAL_PRECISION),
    };

    Ok(ProjectionResult {
        main_currency: current.main_currency.clone(),
        current_month: as_of.format(MONTH_FORMAT).to_string(),
        ytd,
        future,
        summary,
        recurring_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::account_types;
    use crate::fx::{ExchangeRate, RateTable};
    use crate::ledger::EntryType;
    use crate::portfolio::net_worth::NetWorthByType;
    use crate::recurring::Frequency;
    use crate::test_support::{account, date};
    use rust_decimal_macros::dec;

    fn current() -> NetWorthSummary {
        NetWorthSummary::from_breakdown(
            "USD",
            NetWorthByType {
                bank: dec!(10000),
                cash: dec!(500),
                stock: dec!(20000),
                asset: dec!(5000),
                loan: dec!(8000),
                credit: dec!(1500),
            },
            Vec::new(),
        )
    }

    fn totals(income: Decimal, expenses: Decimal) -> MonthlyTotals {
        MonthlyTotals { income, expenses }
    }

    fn template(
        id: &str,
        account_id: &str,
        entry_type: EntryType,
        amount: Decimal,
        frequency: Frequency,
    ) -> RecurringTemplate {
        RecurringTemplate {
            id: id.to_string(),
            account_id: account_id.to_string(),
            entry_type,
            amount,
            payee: None,
            category: None,
            notes: None,
            frequency,
            next_due_date: date("2024-06-01"),
            is_active: true,
        }
    }

    #[test]
    fn test_three_months_forward() {
        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(dec!(3000), dec!(2000)),
            date("2024-06-15"),
            12,
        )
        .unwrap();

        assert_eq!(result.current_month, "2024-06");
        assert_eq!(result.summary.monthly_savings, dec!(1000));

        let month = &result.future[3];
        assert_eq!(month.month, "2024-09");
        assert_eq!(month.net_worth, dec!(29000));
        assert_eq!(month.liquid_assets, dec!(13500));
        assert_eq!(month.bank, dec!(13000));
        assert_eq!(month.cash, dec!(500));
        assert_eq!(month.investments, dec!(20000));
        assert_eq!(month.assets, dec!(5000));
        assert_eq!(month.total_debt, dec!(9500));
        assert!(month.is_projected);
    }

    #[test]
    fn test_current_month_is_shared_by_both_series() {
        let current = current();
        let result = generate_projection(
            &current,
            RecurringBreakdown::default(),
            totals(dec!(4200), dec!(3100)),
            date("2024-06-15"),
            12,
        )
        .unwrap();

        let ytd_last = result.ytd.last().unwrap();
        let future_first = result.future.first().unwrap();
        assert_eq!(ytd_last, future_first);
        assert!(!ytd_last.is_projected);
        assert_eq!(ytd_last.net_worth, current.total_net_worth);
        assert_eq!(ytd_last.bank, current.by_type.bank);
        assert_eq!(ytd_last.liquid_assets, current.liquid_assets);
    }

    #[test]
    fn test_year_to_date_runs_backwards_from_current() {
        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(dec!(3000), dec!(2000)),
            date("2024-04-30"),
            12,
        )
        .unwrap();

        let months: Vec<&str> = result.ytd.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(result.ytd[0].net_worth, dec!(23000));
        assert_eq!(result.ytd[0].bank, dec!(7000));
        assert_eq!(result.ytd[0].investments, dec!(20000));
        assert_eq!(result.ytd[0].total_debt, dec!(9500));
    }

    #[test]
    fn test_future_crosses_year_boundary() {
        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(dec!(1000), dec!(1500)),
            date("2024-11-03"),
            12,
        )
        .unwrap();

        assert_eq!(result.future.len(), 13);
        assert_eq!(result.future[2].month, "2025-01");
        assert_eq!(result.future[12].month, "2025-11");
        // Negative savings drain the bank.
        assert_eq!(result.future[12].bank, dec!(4000));
        assert_eq!(result.summary.months_remaining_in_year, 1);
        assert_eq!(result.summary.projected_year_end_net_worth, dec!(25500));
        assert_eq!(result.summary.projected_net_worth_end_of_horizon, dec!(20000));
    }

    #[test]
    fn test_december_has_no_months_remaining() {
        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(dec!(3000), dec!(2000)),
            date("2024-12-31"),
            3,
        )
        .unwrap();
        assert_eq!(result.ytd.len(), 12);
        assert_eq!(result.future.len(), 4);
        assert_eq!(result.summary.months_remaining_in_year, 0);
        assert_eq!(
            result.summary.projected_year_end_net_worth,
            result.summary.current_net_worth
        );
    }

    #[test]
    fn test_savings_rate() {
        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(dec!(3000), dec!(2000)),
            date("2024-06-15"),
            12,
        )
        .unwrap();
        assert_eq!(result.summary.savings_rate, dec!(33.33));

        let result = generate_projection(
            &current(),
            RecurringBreakdown::default(),
            totals(Decimal::ZERO, dec!(200)),
            date("2024-06-15"),
            12,
        )
        .unwrap();
        assert_eq!(result.summary.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn test_recurring_breakdown_converts_and_normalizes() {
        let accounts = vec![
            account("chk", account_types::BANK, "USD", dec!(0)),
            account("eu", account_types::BANK, "EUR", dec!(0)),
        ];
        let mut inactive = template("d", "chk", EntryType::Inflow, dec!(999), Frequency::Monthly);
        inactive.is_active = false;
        let templates = vec![
            template("a", "chk", EntryType::Inflow, dec!(1000), Frequency::Biweekly),
            template("b", "eu", EntryType::Outflow, dec!(1200), Frequency::Yearly),
            template("c", "closed", EntryType::Outflow, dec!(50), Frequency::Weekly),
            inactive,
        ];
        let converter = CurrencyConverter::new(
            RateTable::new("USD", vec![ExchangeRate::new("EUR", dec!(1.10))]).unwrap(),
        );

        let (breakdown, totals) =
            build_recurring_breakdown(&templates, &accounts, &converter, "USD").unwrap();

        assert_eq!(breakdown.items.len(), 2);
        assert_eq!(breakdown.items[0].monthly_amount, dec!(2170));
        assert_eq!(breakdown.items[1].currency, "EUR");
        assert_eq!(breakdown.items[1].monthly_amount, dec!(110));
        assert_eq!(breakdown.total_monthly_income, dec!(2170));
        assert_eq!(breakdown.total_monthly_expenses, dec!(110));
        assert_eq!(totals.savings(), dec!(2060));
    }
}

use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::pnl_model::{PnLMonth, PnLMonthDetail, PnLSummary, PnLTransaction};
use crate::accounts::{Account, AccountType};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::fx::CurrencyConverter;
use crate::ledger::LedgerEntry;
use crate::Error;

fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Active bank and cash accounts by id.
fn liquid_accounts(accounts: &[Account]) -> Result<HashMap<&str, &Account>> {
    let mut liquid = HashMap::new();
    for account in accounts.iter().filter(|a| a.is_active) {
        if matches!(account.kind()?, AccountType::Bank | AccountType::Cash) {
            liquid.insert(account.id.as_str(), account);
        }
    }
    Ok(liquid)
}

/// Monthly income and expenses of `year` in `main_currency`.
///
/// Only entries of active bank and cash accounts count. Every month of the
/// year is present, empty months as zero.
pub fn summarize_year(
    entries: &[LedgerEntry],
    accounts: &[Account],
    converter: &CurrencyConverter,
    main_currency: &str,
    year: i32,
) -> Result<PnLSummary> {
    let liquid = liquid_accounts(accounts)?;
    let mut months: Vec<PnLMonth> = (1..=12)
        .map(|month| PnLMonth::new(month_label(year, month)))
        .collect();

    for entry in entries.iter().filter(|e| e.date.year() == year) {
        let Some(account) = liquid.get(entry.account_id.as_str()) else {
            continue;
        };
        let converted = converter.convert_amount(entry.amount, &account.currency, main_currency)?;
        months[entry.date.month0() as usize].add_entry(entry.entry_type, converted);
    }

    let total_income = months.iter().map(|m| m.income).sum::<Decimal>();
    let total_expenses = months.iter().map(|m| m.expenses).sum::<Decimal>();
    let months: Vec<PnLMonth> = months.into_iter().map(PnLMonth::round).collect();
    debug!(
        "P&L {}: {} entries across {} accounts",
        year,
        months.iter().map(|m| m.transaction_count).sum::<usize>(),
        liquid.len()
    );

    Ok(PnLSummary {
        main_currency: main_currency.to_string(),
        year,
        months,
        total_income: total_income.round_dp(DISPLAY_DECIMAL_PRECISION),
        total_expenses: total_expenses.round_dp(DISPLAY_DECIMAL_PRECISION),
        total_net: (total_income - total_expenses).round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

/// Totals and entries of one month, entries sorted by date then id, newest first.
pub fn month_detail(
    entries: &[LedgerEntry],
    accounts: &[Account],
    converter: &CurrencyConverter,
    main_currency: &str,
    year: i32,
    month: u32,
) -> Result<PnLMonthDetail> {
    if !(1..=12).contains(&month) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Month must be between 1 and 12, got {}",
            month
        ))));
    }

    let liquid = liquid_accounts(accounts)?;
    let mut totals = PnLMonth::new(month_label(year, month));
    let mut transactions = Vec::new();

    for entry in entries
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
    {
        let Some(account) = liquid.get(entry.account_id.as_str()) else {
            continue;
        };
        let converted = converter.convert_amount(entry.amount, &account.currency, main_currency)?;
        totals.add_entry(entry.entry_type, converted);
        transactions.push(PnLTransaction {
            id: entry.id.clone(),
            account_id: entry.account_id.clone(),
            account_name: account.name.clone(),
            date: entry.date,
            entry_type: entry.entry_type,
            amount: entry.amount,
            currency: account.currency.clone(),
            converted_amount: converted.round_dp(DISPLAY_DECIMAL_PRECISION),
            payee: entry.payee.clone(),
            category: entry.category.clone(),
            notes: entry.notes.clone(),
        });
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    let totals = totals.round();

    Ok(PnLMonthDetail {
        month: totals.month,
        income: totals.income,
        expenses: totals.expenses,
        net: totals.net,
        transactions,
    })
}

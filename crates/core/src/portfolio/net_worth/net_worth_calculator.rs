//! Pure net worth aggregation over accounts, ledger entries and holdings.

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::net_worth_model::{AccountNetWorth, NetWorthByType, NetWorthSummary};
use crate::accounts::{Account, AccountType};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::fx::CurrencyConverter;
use crate::holdings::HoldingState;
use crate::ledger::{credit_owed, net_deltas_by_account, LedgerEntry};

/// Value an account contributes, in its own currency.
///
/// Liabilities are returned as positive magnitudes.
fn native_value(
    account: &Account,
    account_type: AccountType,
    ledger_delta: Decimal,
    stock_cost_basis: Decimal,
) -> Decimal {
    let balance = account.initial_balance + ledger_delta;
    match account_type {
        AccountType::Bank | AccountType::Cash => balance,
        AccountType::Stock => stock_cost_basis,
        AccountType::Asset => account.initial_balance,
        AccountType::Loan => balance,
        AccountType::Credit => credit_owed(account.initial_balance, balance),
    }
}

/// Aggregates the active accounts into a net worth summary in `main_currency`.
///
/// `entries` and `holdings` may contain rows of other accounts; only rows of
/// the aggregated accounts are used. Any unknown account type or missing rate
/// fails the whole aggregate.
pub fn calculate_net_worth(
    accounts: &[Account],
    entries: &[LedgerEntry],
    holdings: &[HoldingState],
    converter: &CurrencyConverter,
    main_currency: &str,
) -> Result<NetWorthSummary> {
    let deltas = net_deltas_by_account(entries);

    let mut cost_basis: HashMap<&str, Decimal> = HashMap::new();
    for holding in holdings {
        *cost_basis
            .entry(holding.account_id.as_str())
            .or_insert(Decimal::ZERO) += holding.total_cost;
    }

    let mut by_type = NetWorthByType::default();
    let mut contributions = Vec::new();

    for account in accounts.iter().filter(|a| a.is_active) {
        let account_type = account.kind()?;
        let native = native_value(
            account,
            account_type,
            deltas.get(account.id.as_str()).copied().unwrap_or_default(),
            cost_basis.get(account.id.as_str()).copied().unwrap_or_default(),
        );
        let value = converter.convert_amount(native, &account.currency, main_currency)?;

        by_type.add(account_type, value);
        contributions.push(AccountNetWorth {
            account_id: account.id.clone(),
            name: account.name.clone(),
            account_type,
            currency: account.currency.clone(),
            native_value: native.round_dp(DISPLAY_DECIMAL_PRECISION),
            value: value.round_dp(DISPLAY_DECIMAL_PRECISION),
            is_liability: account_type.is_liability(),
        });
    }

    contributions.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    debug!(
        "Aggregated {} accounts into net worth {} {}",
        contributions.len(),
        by_type.net_worth(),
        main_currency
    );

    Ok(NetWorthSummary::from_breakdown(
        main_currency,
        by_type,
        contributions,
    ))
}

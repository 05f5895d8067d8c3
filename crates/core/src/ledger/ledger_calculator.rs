//! Balance arithmetic over ledger entries.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::ledger_model::{EntryType, LedgerEntry};

/// Sums inflows and outflows separately.
pub fn total_inflow_outflow<'a, I>(entries: I) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inflow, outflow), entry| {
            match entry.entry_type {
                EntryType::Inflow => (inflow + entry.amount, outflow),
                EntryType::Outflow => (inflow, outflow + entry.amount),
            }
        })
}

/// `initial_balance + Σinflow − Σoutflow`. Entry order does not matter.
pub fn calculate_balance<'a, I>(initial_balance: Decimal, entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let (inflow, outflow) = total_inflow_outflow(entries);
    initial_balance + inflow - outflow
}

/// Amount owed on a credit account whose limit is stored as the opening balance.
///
/// Clamped at zero: a balance above the limit (an overpaid card) owes nothing
/// and is not reported as a negative liability.
pub fn credit_owed(limit: Decimal, balance: Decimal) -> Decimal {
    (limit - balance).max(Decimal::ZERO)
}

/// Net signed delta per account, for aggregating many accounts in one pass.
pub fn net_deltas_by_account(entries: &[LedgerEntry]) -> HashMap<&str, Decimal> {
    let mut deltas: HashMap<&str, Decimal> = HashMap::new();
    for entry in entries {
        *deltas
            .entry(entry.account_id.as_str())
            .or_insert(Decimal::ZERO) += entry.signed_amount();
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(id: &str, account_id: &str, entry_type: EntryType, amount: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            account_id: account_id.to_string(),
            entry_type,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            payee: None,
            category: None,
            notes: None,
            transfer_id: None,
        }
    }

    #[test]
    fn test_no_entries_equals_initial_balance() {
        let entries: Vec<LedgerEntry> = Vec::new();
        assert_eq!(calculate_balance(dec!(1000), &entries), dec!(1000));
        assert_eq!(calculate_balance(dec!(-25.50), &entries), dec!(-25.50));
    }

    #[test]
    fn test_inflow_and_outflow() {
        let entries = vec![
            entry("1", "a", EntryType::Inflow, dec!(500)),
            entry("2", "a", EntryType::Outflow, dec!(200)),
        ];
        assert_eq!(calculate_balance(dec!(1000), &entries), dec!(1300));
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut entries = vec![
            entry("1", "a", EntryType::Inflow, dec!(10.10)),
            entry("2", "a", EntryType::Outflow, dec!(3.33)),
            entry("3", "a", EntryType::Outflow, dec!(7.77)),
            entry("4", "a", EntryType::Inflow, dec!(0.01)),
        ];
        let forward = calculate_balance(dec!(5), &entries);
        entries.reverse();
        assert_eq!(calculate_balance(dec!(5), &entries), forward);
        assert_eq!(forward, dec!(4.01));
    }

    #[test]
    fn test_credit_owed() {
        // Limit 2000, spent 350 -> balance 1650
        assert_eq!(credit_owed(dec!(2000), dec!(1650)), dec!(350));
        // Exactly at the limit
        assert_eq!(credit_owed(dec!(2000), dec!(2000)), Decimal::ZERO);
    }

    #[test]
    fn test_credit_owed_clamps_when_balance_exceeds_limit() {
        assert_eq!(credit_owed(dec!(2000), dec!(2100)), Decimal::ZERO);
    }

    #[test]
    fn test_net_deltas_by_account() {
        let entries = vec![
            entry("1", "a", EntryType::Inflow, dec!(100)),
            entry("2", "b", EntryType::Outflow, dec!(40)),
            entry("3", "a", EntryType::Outflow, dec!(30)),
        ];
        let deltas = net_deltas_by_account(&entries);
        assert_eq!(deltas["a"], dec!(70));
        assert_eq!(deltas["b"], dec!(-40));
        assert!(!deltas.contains_key("c"));
    }
}

use rust_decimal::Decimal;

use super::transfers_model::Transfer;
use crate::ledger::{EntryType, LedgerEntry, NewLedgerEntry};
use crate::{Error, Result};

/// The two entries a transfer owns: `(outflow on source, inflow on destination)`.
pub fn build_transfer_legs(
    transfer: &Transfer,
    from_entry_id: String,
    to_entry_id: String,
) -> (NewLedgerEntry, NewLedgerEntry) {
    let leg = |id: String, account_id: &str, entry_type: EntryType, amount: Decimal| {
        NewLedgerEntry {
            id: Some(id),
            account_id: account_id.to_string(),
            entry_type,
            amount,
            date: transfer.date,
            payee: None,
            category: None,
            notes: transfer.notes.clone(),
            transfer_id: Some(transfer.id.clone()),
        }
    };

    (
        leg(
            from_entry_id,
            &transfer.from_account_id,
            EntryType::Outflow,
            transfer.from_amount,
        ),
        leg(
            to_entry_id,
            &transfer.to_account_id,
            EntryType::Inflow,
            transfer.to_amount,
        ),
    )
}

/// Checks that `entries` form one well-formed transfer pair.
///
/// A pair is exactly two entries sharing one `transfer_id`, on two distinct
/// accounts, one inflow and one outflow, both with a positive amount.
pub fn validate_transfer_pair(entries: &[LedgerEntry]) -> Result<()> {
    let [first, second] = entries else {
        return Err(Error::AtomicityViolation(format!(
            "expected 2 transfer entries, found {}",
            entries.len()
        )));
    };

    let transfer_id = match (&first.transfer_id, &second.transfer_id) {
        (Some(a), Some(b)) if a == b => a,
        (a, b) => {
            return Err(Error::AtomicityViolation(format!(
                "entries {} and {} carry different transfer ids ({:?}, {:?})",
                first.id, second.id, a, b
            )))
        }
    };

    if first.account_id == second.account_id {
        return Err(Error::AtomicityViolation(format!(
            "both legs of transfer {} are on account {}",
            transfer_id, first.account_id
        )));
    }
    if second.entry_type != first.entry_type.opposite() {
        return Err(Error::AtomicityViolation(format!(
            "both legs of transfer {} are {}",
            transfer_id, first.entry_type
        )));
    }
    if first.amount <= Decimal::ZERO || second.amount <= Decimal::ZERO {
        return Err(Error::AtomicityViolation(format!(
            "transfer {} has a leg without a positive amount",
            transfer_id
        )));
    }
    Ok(())
}

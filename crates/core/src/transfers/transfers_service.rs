use log::{debug, error, info};
use std::sync::Arc;
use uuid::Uuid;

use super::transfers_model::{NewTransfer, TransferWithEntries};
use super::transfers_pairing::{build_transfer_legs, validate_transfer_pair};
use super::transfers_traits::LedgerTransactionExecutor;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::{EntryType, LedgerEntry, LedgerRepositoryTrait};

pub trait TransferServiceTrait: Send + Sync {
    /// Writes the transfer and both of its entries as one unit.
    fn create_transfer(&self, new_transfer: NewTransfer) -> Result<TransferWithEntries>;

    /// Removes the transfer and both of its entries as one unit.
    fn delete_transfer(&self, transfer_id: &str) -> Result<()>;

    /// The two entries of a stored transfer, outflow first.
    fn get_transfer_entries(&self, transfer_id: &str) -> Result<Vec<LedgerEntry>>;
}

pub struct TransferService<E: LedgerTransactionExecutor> {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    transaction_executor: E,
}

impl<E: LedgerTransactionExecutor> TransferService<E> {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        transaction_executor: E,
    ) -> Self {
        Self {
            account_repository,
            ledger_repository,
            transaction_executor,
        }
    }

    fn validate_accounts(&self, new_transfer: &NewTransfer) -> Result<()> {
        let from = self
            .account_repository
            .get_by_id(&new_transfer.from_account_id)?;
        let to = self
            .account_repository
            .get_by_id(&new_transfer.to_account_id)?;

        for account in [&from, &to] {
            if !account.is_active {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Account {} is not active",
                    account.id
                ))));
            }
        }
        if from.currency == to.currency && new_transfer.from_amount != new_transfer.to_amount() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Both legs of a {} transfer must carry the same amount",
                from.currency
            ))));
        }
        Ok(())
    }
}

impl<E: LedgerTransactionExecutor> TransferServiceTrait for TransferService<E> {
    fn create_transfer(&self, new_transfer: NewTransfer) -> Result<TransferWithEntries> {
        new_transfer.validate()?;
        self.validate_accounts(&new_transfer)?;

        let transfer = new_transfer.into_transfer(Uuid::now_v7().to_string());
        // v7 ids sort by creation time, so the outflow sorts first.
        let (from_leg, to_leg) = build_transfer_legs(
            &transfer,
            Uuid::now_v7().to_string(),
            Uuid::now_v7().to_string(),
        );
        debug!(
            "Creating transfer {} from {} to {}",
            transfer.id, transfer.from_account_id, transfer.to_account_id
        );

        let result = self.transaction_executor.execute(|writer| {
            writer.insert_transfer(&transfer)?;
            let from_entry = writer.insert_entry(from_leg)?;
            let to_entry = writer.insert_entry(to_leg)?;
            validate_transfer_pair(&[from_entry.clone(), to_entry.clone()])?;
            Ok(TransferWithEntries {
                transfer: transfer.clone(),
                from_entry,
                to_entry,
            })
        });

        match &result {
            Ok(_) => info!("Created transfer {}", transfer.id),
            Err(e) => error!("Transfer {} rolled back: {}", transfer.id, e),
        }
        result
    }

    fn delete_transfer(&self, transfer_id: &str) -> Result<()> {
        let result = self.transaction_executor.execute(|writer| {
            let deleted_entries = writer.delete_entries_by_transfer(transfer_id)?;
            if deleted_entries == 0 {
                return Err(Error::NotFound(format!("Transfer {}", transfer_id)));
            }
            if deleted_entries != 2 {
                return Err(Error::AtomicityViolation(format!(
                    "transfer {} had {} entries instead of 2",
                    transfer_id, deleted_entries
                )));
            }
            let deleted_transfers = writer.delete_transfer(transfer_id)?;
            if deleted_transfers != 1 {
                return Err(Error::AtomicityViolation(format!(
                    "transfer {} row count was {} instead of 1",
                    transfer_id, deleted_transfers
                )));
            }
            Ok(())
        });

        if let Err(e) = &result {
            error!("Deleting transfer {} failed: {}", transfer_id, e);
        }
        result
    }

    fn get_transfer_entries(&self, transfer_id: &str) -> Result<Vec<LedgerEntry>> {
        let mut entries = self.ledger_repository.list_by_transfer(transfer_id)?;
        if entries.is_empty() {
            return Err(Error::NotFound(format!("Transfer {}", transfer_id)));
        }
        validate_transfer_pair(&entries)?;
        entries.sort_by_key(|entry| entry.entry_type != EntryType::Outflow);
        Ok(entries)
    }
}

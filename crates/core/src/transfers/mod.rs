//! Transfers module - paired ledger entries moving money between two accounts.

mod transfers_model;
mod transfers_pairing;
mod transfers_service;
mod transfers_traits;


pub use transfers_model::{NewTransfer, Transfer, TransferWithEntries};
pub use transfers_pairing::{build_transfer_legs, validate_transfer_pair};
pub use transfers_service::{TransferService, TransferServiceTrait};
pub use transfers_traits::{LedgerTransactionExecutor, LedgerWriter};

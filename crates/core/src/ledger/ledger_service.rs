use log::debug;
use std::sync::Arc;

use super::ledger_calculator::{calculate_balance, net_deltas_by_account};
use super::ledger_model::AccountBalance;
use super::ledger_traits::LedgerRepositoryTrait;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use rust_decimal::Decimal;

/// Trait defining the contract for balance queries.
pub trait LedgerServiceTrait: Send + Sync {
    /// Current balance of one account.
    fn get_account_balance(&self, account_id: &str) -> Result<AccountBalance>;

    /// Current balances of all active accounts, ordered by account id.
    fn get_account_balances(&self) -> Result<Vec<AccountBalance>>;
}

/// Service computing balances from the ledger.
pub struct LedgerService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            ledger_repository,
        }
    }
}

impl LedgerServiceTrait for LedgerService {
    fn get_account_balance(&self, account_id: &str) -> Result<AccountBalance> {
        let account = self.account_repository.get_by_id(account_id)?;
        let entries = self.ledger_repository.list_by_account(account_id)?;

        Ok(AccountBalance {
            account_id: account.id,
            balance: calculate_balance(account.initial_balance, &entries),
        })
    }

    fn get_account_balances(&self) -> Result<Vec<AccountBalance>> {
        let accounts = self.account_repository.list(Some(true))?;
        let account_ids: Vec<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let entries = self.ledger_repository.list_by_accounts(&account_ids)?;
        let deltas = net_deltas_by_account(&entries);

        let mut balances: Vec<AccountBalance> = accounts
            .iter()
            .map(|account| AccountBalance {
                account_id: account.id.clone(),
                balance: account.initial_balance
                    + deltas
                        .get(account.id.as_str())
                        .copied()
                        .unwrap_or(Decimal::ZERO),
            })
            .collect();
        balances.sort_by(|a, b| a.account_id.cmp(&b.account_id));

        debug!("Computed balances for {} accounts", balances.len());
        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::account_types;
    use crate::ledger::EntryType;
    use crate::test_support::{account, entry, InMemoryStore};
    use crate::Error;
    use rust_decimal_macros::dec;

    fn service(store: Arc<InMemoryStore>) -> LedgerService {
        LedgerService::new(store.clone(), store)
    }

    #[test]
    fn test_account_balance() {
        let store = InMemoryStore::new()
            .with_account(account("chk", account_types::BANK, "USD", dec!(1000)))
            .with_entry(entry("e1", "chk", EntryType::Inflow, dec!(500), "2024-01-10"))
            .with_entry(entry("e2", "chk", EntryType::Outflow, dec!(200), "2024-01-11"))
            .into_arc();

        let balance = service(store).get_account_balance("chk").unwrap();
        assert_eq!(balance.account_id, "chk");
        assert_eq!(balance.balance, dec!(1300));
    }

    #[test]
    fn test_missing_account_is_an_error() {
        let store = InMemoryStore::new().into_arc();
        assert!(matches!(
            service(store).get_account_balance("nope"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_balances_skip_inactive_accounts() {
        let mut closed = account("old", account_types::CASH, "USD", dec!(10));
        closed.is_active = false;
        let store = InMemoryStore::new()
            .with_account(account("b", account_types::CASH, "EUR", dec!(20)))
            .with_account(account("a", account_types::BANK, "USD", dec!(0)))
            .with_account(closed)
            .with_entry(entry("e1", "a", EntryType::Inflow, dec!(42), "2024-02-01"))
            .with_entry(entry("e2", "old", EntryType::Inflow, dec!(1), "2024-02-01"))
            .into_arc();

        let balances = service(store).get_account_balances().unwrap();
        assert_eq!(
            balances,
            vec![
                AccountBalance {
                    account_id: "a".to_string(),
                    balance: dec!(42),
                },
                AccountBalance {
                    account_id: "b".to_string(),
                    balance: dec!(20),
                },
            ]
        );
    }
}

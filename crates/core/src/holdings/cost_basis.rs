//! Weighted-average cost basis replay.
//!
//! A holding is never updated incrementally: it is rebuilt by replaying the
//! full buy/sell history of one `(account, symbol)` pair from an empty
//! position. Replaying the same log always yields the same state.

use log::{debug, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::holdings_model::{HoldingState, StockTransaction, StockTransactionType};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Result};

/// Running totals while replaying one position.
#[derive(Debug, Default, Clone, Copy)]
struct Position {
    shares: Decimal,
    total_cost: Decimal,
}

impl Position {
    fn apply(&mut self, tx: &StockTransaction) {
        match tx.tx_type {
            StockTransactionType::Buy => {
                self.total_cost += tx.shares * tx.price + tx.fees;
                self.shares += tx.shares;
            }
            StockTransactionType::Sell => {
                if self.shares <= Decimal::ZERO {
                    warn!(
                        "Ignoring sell {} of {} {}: no shares held in account {}",
                        tx.id, tx.shares, tx.symbol, tx.account_id
                    );
                    return;
                }
                // Realized gain is not tracked; the remaining shares keep the
                // average cost they had before the sale.
                let avg_cost_before = self.total_cost / self.shares;
                self.shares -= tx.shares;
                if self.shares <= Decimal::ZERO {
                    self.shares = Decimal::ZERO;
                    self.total_cost = Decimal::ZERO;
                } else {
                    self.total_cost = self.shares * avg_cost_before;
                }
            }
        }
    }

    fn avg_cost(&self) -> Decimal {
        if self.shares > Decimal::ZERO {
            self.total_cost / self.shares
        } else {
            Decimal::ZERO
        }
    }
}

fn sort_for_replay(transactions: &mut [&StockTransaction]) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}

fn replay_sorted(
    symbol: &str,
    account_id: &str,
    transactions: &[&StockTransaction],
) -> Result<HoldingState> {
    let mut position = Position::default();
    for tx in transactions {
        tx.validate()?;
        if tx.symbol != symbol || tx.account_id != account_id {
            return Err(CalculatorError::InvalidTransaction {
                id: tx.id.clone(),
                reason: format!(
                    "belongs to {}/{} but was replayed as {}/{}",
                    tx.account_id, tx.symbol, account_id, symbol
                ),
            }
            .into());
        }
        position.apply(tx);
    }

    Ok(HoldingState {
        symbol: symbol.to_string(),
        account_id: account_id.to_string(),
        shares: position.shares,
        avg_cost: position.avg_cost().round_dp(DECIMAL_PRECISION),
        total_cost: position.total_cost.round_dp(DECIMAL_PRECISION),
    })
}

/// Replays the history of one `(account, symbol)` pair.
///
/// The input may arrive in any order; it is sorted by `(date, id)` first.
/// Every transaction must belong to the requested pair.
pub fn replay(
    symbol: &str,
    account_id: &str,
    transactions: &[StockTransaction],
) -> Result<HoldingState> {
    let mut ordered: Vec<&StockTransaction> = transactions.iter().collect();
    sort_for_replay(&mut ordered);
    replay_sorted(symbol, account_id, &ordered)
}

/// Replays every `(account, symbol)` pair found in `transactions`.
///
/// Pairs are independent, so they are replayed in parallel. The result is
/// sorted by `(account_id, symbol)` and includes closed positions.
pub fn replay_all(transactions: &[StockTransaction]) -> Result<Vec<HoldingState>> {
    let mut groups: BTreeMap<(&str, &str), Vec<&StockTransaction>> = BTreeMap::new();
    for tx in transactions {
        groups
            .entry((tx.account_id.as_str(), tx.symbol.as_str()))
            .or_default()
            .push(tx);
    }

    let groups: Vec<((&str, &str), Vec<&StockTransaction>)> = groups.into_iter().collect();
    debug!(
        "Replaying {} transactions across {} positions",
        transactions.len(),
        groups.len()
    );

    groups
        .into_par_iter()
        .map(|((account_id, symbol), mut txs)| {
            sort_for_replay(&mut txs);
            replay_sorted(symbol, account_id, &txs)
        })
        .collect()
}

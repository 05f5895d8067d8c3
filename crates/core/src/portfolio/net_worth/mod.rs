//! Net worth calculation module.
//!
//! Aggregates the current value of every active account into the main
//! currency, with a breakdown by account type.

mod net_worth_calculator;
mod net_worth_model;
mod net_worth_service;
mod net_worth_traits;

pub use net_worth_calculator::calculate_net_worth;
pub use net_worth_model::*;
pub use net_worth_service::*;
pub use net_worth_traits::*;

//! Monthly profit and loss over bank and cash accounts.

mod pnl_calculator;
mod pnl_model;
mod pnl_service;

pub use pnl_calculator::{month_detail, summarize_year};
pub use pnl_model::*;
pub use pnl_service::{PnLService, PnLServiceTrait};

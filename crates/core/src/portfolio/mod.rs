//! Portfolio aggregates: net worth, projection, profit and loss, dividend income.

pub mod income;
pub mod net_worth;
pub mod pnl;
pub mod projection;

pub use income::*;
pub use net_worth::*;
pub use pnl::*;
pub use projection::*;

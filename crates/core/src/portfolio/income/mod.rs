//! Dividend income and its yearly tax summary.

mod income_model;
mod income_service;
mod income_traits;

pub use income_model::*;
pub use income_service::*;
pub use income_traits::*;

use thiserror::Error;

/// Errors raised by the currency conversion layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Currency '{0}' is not present in the rate table")]
    UnknownCurrency(String),

    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: String },

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}

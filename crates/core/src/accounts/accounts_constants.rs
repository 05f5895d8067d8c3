/// Account type constants, as stored by the repository layer
pub mod account_types {
    pub const BANK: &str = "bank";
    pub const CASH: &str = "cash";
    pub const STOCK: &str = "stock";
    pub const LOAN: &str = "loan";
    pub const CREDIT: &str = "credit";
    pub const ASSET: &str = "asset";
}

/// Returns true if the given account type is valid.
pub fn is_valid_account_type(account_type: &str) -> bool {
    matches!(
        account_type,
        account_types::BANK
            | account_types::CASH
            | account_types::STOCK
            | account_types::LOAN
            | account_types::CREDIT
            | account_types::ASSET
    )
}

/// Returns true if the account type is a liability.
pub fn is_liability_type(account_type: &str) -> bool {
    matches!(account_type, account_types::LOAN | account_types::CREDIT)
}

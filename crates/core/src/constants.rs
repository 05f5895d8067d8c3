/// Decimal precision for share quantities, prices and average cost
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for money amounts in reported DTOs
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Main currency used when no setting is stored
pub const DEFAULT_MAIN_CURRENCY: &str = "USD";

/// Number of forward months produced by the projection
pub const DEFAULT_PROJECTION_MONTHS_AHEAD: u32 = 12;

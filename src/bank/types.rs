//! Types used throughout the banking system.

/// Money type, an exact decimal amount in the account's single currency.
/// The scale is kept as written, so `50` and `50.00` render differently.
pub type Money = rust_decimal::Decimal;

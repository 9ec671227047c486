//! Centralized rule ids for semiquote.

/// Quote style of string and template literals.
pub const RULE_ID_QUOTES: &str = "quotes";
/// Statement-terminating semicolons.
pub const RULE_ID_SEMI: &str = "semi";

/// Every rule id, in registration order.
pub const ALL_RULE_IDS: &[&str] = &[RULE_ID_QUOTES, RULE_ID_SEMI];

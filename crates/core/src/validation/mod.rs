//! Request validation engine.
//!
//! Provides rule types, the per-entity rule sets, a pure-logic evaluator and
//! the typed accessor over input that passed evaluation. Existence checks
//! against the database are emitted as [`ExistenceCheck`]s and resolved by
//! the caller.

pub mod evaluator;
pub mod input;
pub mod rule_sets;
pub mod rules;

pub use evaluator::evaluate_rules;
pub use input::ValidatedInput;
pub use rules::{
    ExistenceCheck, FieldErrors, FieldRule, FieldRules, FieldViolation, ValidationResult,
};

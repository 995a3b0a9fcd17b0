//! Validation rule and result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::DbId;

use super::input::ValidatedInput;

/// A single constraint applied to one request field.
///
/// Every rule except [`FieldRule::Required`] passes when the field is absent
/// or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Present, not null, not a blank string and not an empty array.
    Required,
    /// A JSON string.
    Text,
    /// A string of at most this many characters.
    MaxLength(u64),
    /// `true`, `false`, `0`, `1`, `"0"` or `"1"`.
    Boolean,
    /// A JSON integer or an integer string that fits in an `i32`.
    Integer,
    /// A four-digit year, as an integer or a string.
    Year,
    /// A string or number whose text form is one of the listed values.
    OneOf(&'static [&'static str]),
    /// A JSON array.
    Array,
    /// An array whose every element is the id of a live row in the table.
    Exists(&'static str),
}

impl FieldRule {
    /// Short machine name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FieldRule::Required => "required",
            FieldRule::Text => "string",
            FieldRule::MaxLength(_) => "max",
            FieldRule::Boolean => "boolean",
            FieldRule::Integer => "integer",
            FieldRule::Year => "date_format",
            FieldRule::OneOf(_) => "in",
            FieldRule::Array => "array",
            FieldRule::Exists(_) => "exists",
        }
    }

    /// Human-readable message for a violation of this rule on `field`.
    pub fn message(&self, field: &str) -> String {
        let attribute = field.replace('_', " ");
        match self {
            FieldRule::Required => format!("The {attribute} field is required."),
            FieldRule::Text => format!("The {attribute} must be a string."),
            FieldRule::MaxLength(max) => {
                format!("The {attribute} may not be greater than {max} characters.")
            }
            FieldRule::Boolean => format!("The {attribute} field must be true or false."),
            FieldRule::Integer => format!("The {attribute} must be an integer."),
            FieldRule::Year => format!("The {attribute} does not match the format Y."),
            FieldRule::OneOf(_) | FieldRule::Exists(_) => {
                format!("The selected {attribute} is invalid.")
            }
            FieldRule::Array => format!("The {attribute} must be an array."),
        }
    }
}

/// The rules applied to one field of a request body.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [FieldRule],
}

impl FieldRules {
    pub const fn new(field: &'static str, rules: &'static [FieldRule]) -> Self {
        Self { field, rules }
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule: FieldRule) -> Self {
        Self {
            field: field.to_string(),
            rule: rule.name(),
            message: rule.message(field),
        }
    }
}

/// Ids that must be checked against `table` before the input is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceCheck {
    pub field: &'static str,
    pub table: &'static str,
    /// Distinct ids, in first-seen order.
    pub ids: Vec<DbId>,
}

/// Violation messages keyed by field name.
///
/// Serializes as `{ "field": ["message", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<FieldViolation> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldViolation>>(iter: I) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in iter {
            let messages = map.entry(violation.field).or_default();
            if !messages.contains(&violation.message) {
                messages.push(violation.message);
            }
        }
        Self(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The given data was invalid.")
    }
}

/// Outcome of evaluating a rule set against one request body.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub violations: Vec<FieldViolation>,
    /// Database lookups still owed before the input can be accepted.
    pub existence_checks: Vec<ExistenceCheck>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a violation discovered outside the pure evaluator.
    pub fn reject(&mut self, field: &str, rule: FieldRule) {
        self.violations.push(FieldViolation::new(field, rule));
    }

    pub fn into_errors(self) -> FieldErrors {
        self.violations.into_iter().collect()
    }

    /// Accept `data` if no violations were recorded.
    ///
    /// Callers must resolve `existence_checks` first.
    pub fn into_validated(self, data: Map<String, Value>) -> Result<ValidatedInput, FieldErrors> {
        if self.is_valid() {
            Ok(ValidatedInput::new(data))
        } else {
            Err(self.into_errors())
        }
    }
}

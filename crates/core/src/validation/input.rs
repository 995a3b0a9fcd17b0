//! Typed access to request bodies that passed validation.
//!
//! The coercion helpers are shared with the evaluator so that a value the
//! rules accept is always one the accessors can convert.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"));

/// Interpret `true`, `false`, `0`, `1`, `"0"` and `"1"` as a boolean.
pub(crate) fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret a JSON integer or an integer string as an `i32`.
pub(crate) fn as_integer(value: &Value) -> Option<i32> {
    let wide = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(wide).ok()
}

/// Interpret a four-digit integer or string as a year.
pub(crate) fn as_year(value: &Value) -> Option<i32> {
    let text = match value {
        Value::Number(n) => n.as_i64()?.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    if YEAR_PATTERN.is_match(&text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Text form of a string or number, used for enumerated values.
pub(crate) fn as_choice(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse every element of an array as a UUID, collapsing duplicates.
///
/// Returns `None` if the value is not an array or any element is not a
/// UUID string.
pub(crate) fn as_id_list(value: &Value) -> Option<Vec<DbId>> {
    let items = value.as_array()?;
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = item.as_str().and_then(|s| DbId::parse_str(s).ok())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Some(ids)
}

/// A request body that satisfied its rule set.
///
/// Accessors return [`CoreError::Internal`] when asked for a field that the
/// rule set did not guarantee, which indicates a mismatch between a rule set
/// and the code reading it.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    data: Map<String, Value>,
}

impl ValidatedInput {
    pub(crate) fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    fn present(&self, field: &str) -> Option<&Value> {
        self.data.get(field).filter(|v| !v.is_null())
    }

    fn malformed(field: &str) -> CoreError {
        CoreError::Internal(format!("validated field `{field}` is missing or malformed"))
    }

    /// A required string field.
    pub fn text(&self, field: &str) -> Result<String, CoreError> {
        self.optional_text(field)
            .ok_or_else(|| Self::malformed(field))
    }

    /// A nullable string field. Absent and `null` both read as `None`.
    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.present(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// An optional boolean field.
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.present(field).and_then(as_flag)
    }

    /// A required integer field. Year fields read through here as well.
    pub fn integer(&self, field: &str) -> Result<i32, CoreError> {
        self.present(field)
            .and_then(|v| as_integer(v).or_else(|| as_year(v)))
            .ok_or_else(|| Self::malformed(field))
    }

    /// A required enumerated field, in its text form.
    pub fn choice(&self, field: &str) -> Result<String, CoreError> {
        self.present(field)
            .and_then(as_choice)
            .ok_or_else(|| Self::malformed(field))
    }

    /// A required list of ids, with duplicates collapsed.
    pub fn ids(&self, field: &str) -> Result<Vec<DbId>, CoreError> {
        self.present(field)
            .and_then(as_id_list)
            .ok_or_else(|| Self::malformed(field))
    }
}

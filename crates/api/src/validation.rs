//! Request body validation against a resource's rule set.
//!
//! Rules are evaluated by `catalog_core` as pure logic; the existence
//! checks it emits are resolved here against the database.

use axum::body::Bytes;
use catalog_core::error::CoreError;
use catalog_core::validation::{evaluate_rules, FieldRule, FieldRules, ValidatedInput};
use catalog_db::repositories::LookupRepo;
use catalog_db::DbPool;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Validate a raw request body, returning typed access to its fields.
///
/// The body is read regardless of `Content-Type`. An empty body, `null` and
/// `[]` all count as an empty object, so every required field is reported
/// with a 422. Malformed JSON and any other non-object body are a 400.
pub async fn validate_body(
    pool: &DbPool,
    rule_set: &[FieldRules],
    body: &Bytes,
) -> AppResult<ValidatedInput> {
    let data = parse_body(body)?;

    let mut result = evaluate_rules(rule_set, &data);

    for check in std::mem::take(&mut result.existence_checks) {
        if !LookupRepo::all_active(pool, check.table, &check.ids).await? {
            result.reject(check.field, FieldRule::Exists(check.table));
        }
    }

    if !result.is_valid() {
        tracing::debug!(
            fields = ?result.violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>(),
            "Request failed validation"
        );
    }

    result
        .into_validated(data)
        .map_err(|errors| AppError::Core(CoreError::Validation(errors)))
}

fn parse_body(body: &[u8]) -> AppResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        AppError::BadRequest(format!("Failed to parse the request body as JSON: {e}"))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

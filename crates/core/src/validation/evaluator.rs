//! Rule evaluator: pure logic, no database access.

use serde_json::{Map, Value};
use validator::ValidateLength;

use super::input::{as_choice, as_flag, as_id_list, as_integer, as_year};
use super::rules::{ExistenceCheck, FieldRule, FieldRules, FieldViolation, ValidationResult};

/// Evaluate every rule of `rule_set` against a request body.
///
/// All violations are collected; a failing rule does not stop the remaining
/// rules of the same field or of later fields. `Exists` rules whose ids are
/// well formed are returned as pending [`ExistenceCheck`]s.
pub fn evaluate_rules(rule_set: &[FieldRules], data: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::default();

    for field_rules in rule_set {
        let field = field_rules.field;
        let value = data.get(field).filter(|v| !v.is_null());

        for &rule in field_rules.rules {
            match rule {
                FieldRule::Exists(table) => {
                    if let Some(value) = value.filter(|v| v.is_array()) {
                        match as_id_list(value) {
                            Some(ids) if ids.is_empty() => {}
                            Some(ids) => result.existence_checks.push(ExistenceCheck {
                                field,
                                table,
                                ids,
                            }),
                            None => result.reject(field, rule),
                        }
                    }
                }
                _ => {
                    if !passes(rule, value) {
                        result.violations.push(FieldViolation::new(field, rule));
                    }
                }
            }
        }
    }

    result
}

fn passes(rule: FieldRule, value: Option<&Value>) -> bool {
    let value = match (rule, value) {
        (FieldRule::Required, value) => return is_present(value),
        (_, None) => return true,
        (_, Some(v)) => v,
    };

    match rule {
        FieldRule::Text => value.is_string(),
        FieldRule::MaxLength(max) => match value {
            Value::String(s) => s.validate_length(None, Some(max), None),
            _ => true,
        },
        FieldRule::Boolean => as_flag(value).is_some(),
        FieldRule::Integer => as_integer(value).is_some(),
        FieldRule::Year => as_year(value).is_some(),
        FieldRule::OneOf(allowed) => {
            as_choice(value).is_some_and(|text| allowed.contains(&text.as_str()))
        }
        FieldRule::Array => value.is_array(),
        FieldRule::Required | FieldRule::Exists(_) => true,
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::validation::rule_sets::{
        CAST_MEMBER_RULES, CATEGORY_RULES, GENRES_FIELD, VIDEO_RULES,
    };

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn messages(rule_set: &[FieldRules], body: Value, field: &str) -> Vec<String> {
        let errors = evaluate_rules(rule_set, &data(body)).into_errors();
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn empty_video_body_reports_every_required_field() {
        let result = evaluate_rules(VIDEO_RULES, &Map::new());
        let errors = result.into_errors();

        for field in [
            "title",
            "description",
            "year_launched",
            "rating",
            "duration",
            "categories_id",
            "genres_id",
        ] {
            let expected = format!("The {} field is required.", field.replace('_', " "));
            assert_eq!(errors.get(field), Some(&[expected][..]), "field {field}");
        }
        assert!(!errors.contains("opened"));
    }

    #[test]
    fn invalid_video_body_collects_every_violation() {
        let body = json!({
            "title": "a".repeat(256),
            "description": "description",
            "year_launched": "d",
            "opened": 10,
            "rating": "6",
            "duration": "s",
            "categories_id": 123,
            "genres_id": "a",
        });
        let errors = evaluate_rules(VIDEO_RULES, &data(body)).into_errors();

        assert_eq!(
            errors.get("title"),
            Some(&["The title may not be greater than 255 characters.".to_string()][..])
        );
        assert_eq!(
            errors.get("year_launched"),
            Some(&["The year launched does not match the format Y.".to_string()][..])
        );
        assert_eq!(
            errors.get("opened"),
            Some(&["The opened field must be true or false.".to_string()][..])
        );
        assert_eq!(
            errors.get("rating"),
            Some(&["The selected rating is invalid.".to_string()][..])
        );
        assert_eq!(
            errors.get("duration"),
            Some(&["The duration must be an integer.".to_string()][..])
        );
        assert_eq!(
            errors.get("categories_id"),
            Some(&["The categories id must be an array.".to_string()][..])
        );
        assert_eq!(
            errors.get("genres_id"),
            Some(&["The genres id must be an array.".to_string()][..])
        );
        assert!(!errors.contains("description"));
    }

    #[test]
    fn valid_video_body_emits_existence_checks() {
        let category = Uuid::new_v4();
        let genre = Uuid::new_v4();
        let body = json!({
            "title": "Title",
            "description": "Description",
            "year_launched": 2021,
            "opened": true,
            "rating": "12",
            "duration": 8,
            "categories_id": [category.to_string(), category.to_string()],
            "genres_id": [genre.to_string()],
        });
        let result = evaluate_rules(VIDEO_RULES, &data(body));

        assert!(result.is_valid());
        assert_eq!(
            result.existence_checks,
            vec![
                ExistenceCheck {
                    field: "categories_id",
                    table: "categories",
                    ids: vec![category],
                },
                ExistenceCheck {
                    field: "genres_id",
                    table: "genres",
                    ids: vec![genre],
                },
            ]
        );
    }

    #[test]
    fn malformed_ids_fail_exists_without_lookup() {
        let body = json!({ GENRES_FIELD: ["1"] });
        let result = evaluate_rules(VIDEO_RULES, &data(body));

        assert!(result.existence_checks.is_empty());
        let errors = result.into_errors();
        assert_eq!(
            errors.get(GENRES_FIELD),
            Some(&["The selected genres id is invalid.".to_string()][..])
        );
    }

    #[test]
    fn numeric_rating_matches_text_form() {
        assert!(messages(VIDEO_RULES, json!({"rating": 10}), "rating").is_empty());
        assert!(messages(VIDEO_RULES, json!({"rating": "L"}), "rating").is_empty());
        assert_eq!(
            messages(VIDEO_RULES, json!({"rating": 6}), "rating"),
            vec!["The selected rating is invalid."]
        );
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let name = "é".repeat(255);
        assert!(messages(CATEGORY_RULES, json!({"name": name}), "name").is_empty());
    }

    #[test]
    fn blank_string_is_not_present() {
        assert_eq!(
            messages(CATEGORY_RULES, json!({"name": "   "}), "name"),
            vec!["The name field is required."]
        );
    }

    #[test]
    fn optional_fields_accept_null() {
        let body = json!({"name": "Drama", "description": null, "is_active": null});
        assert!(evaluate_rules(CATEGORY_RULES, &data(body)).is_valid());
    }

    #[test]
    fn non_string_name_is_rejected() {
        assert_eq!(
            messages(CATEGORY_RULES, json!({"name": 123}), "name"),
            vec!["The name must be a string."]
        );
    }

    #[test]
    fn cast_member_type_must_be_known() {
        assert_eq!(
            messages(CAST_MEMBER_RULES, json!({"name": "X", "type": 3}), "type"),
            vec!["The selected type is invalid."]
        );
        assert!(messages(CAST_MEMBER_RULES, json!({"name": "X", "type": "2"}), "type").is_empty());
    }
}

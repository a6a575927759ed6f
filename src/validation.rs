use serde_json::Value;

use crate::error::AppError;
use crate::models::{CreateTodoPayload, NewTodo, TodoPatch, UpdateTodoPayload};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_NOT_STRING: &str = "Title must be a string";
pub const TITLE_EMPTY: &str = "Title cannot be empty";
pub const TITLE_TOO_LONG: &str = "Title must not exceed 100 characters";
pub const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
pub const DESCRIPTION_TOO_LONG: &str = "Description must not exceed 500 characters";
pub const COMPLETED_NOT_BOOL: &str = "Completed must be a boolean";
pub const UPDATE_EMPTY: &str = "At least one field is required for update";

// Violations in fixed order, empty means valid
pub fn validate_create(payload: &CreateTodoPayload) -> Vec<String> {
    let mut errors = Vec::new();

    match payload.title.value() {
        Some(value) if !is_blank(value) => push_err(&mut errors, check_title(value)),
        _ => errors.push(TITLE_REQUIRED),
    }
    if let Some(value) = payload.description.value() {
        push_err(&mut errors, check_description(value));
    }

    errors.into_iter().map(String::from).collect()
}

pub fn validate_update(payload: &UpdateTodoPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if payload.title.is_missing()
        && payload.description.is_missing()
        && payload.completed.is_missing()
    {
        errors.push(UPDATE_EMPTY);
    }
    if let Some(value) = payload.title.value() {
        push_err(&mut errors, check_title(value));
    }
    if let Some(value) = payload.description.value() {
        push_err(&mut errors, check_description(value));
    }
    if let Some(value) = payload.completed.value() {
        if !value.is_boolean() {
            errors.push(COMPLETED_NOT_BOOL);
        }
    }

    errors.into_iter().map(String::from).collect()
}

pub fn parse_create(payload: CreateTodoPayload) -> Result<NewTodo, AppError> {
    let errors = validate_create(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(NewTodo {
        title: payload.title.into_string().unwrap_or_default(),
        description: payload.description.into_string(),
    })
}

pub fn parse_update(payload: UpdateTodoPayload) -> Result<TodoPatch, AppError> {
    let errors = validate_update(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let completed = payload.completed.as_bool();
    Ok(TodoPatch {
        title: payload.title.into_string(),
        description: payload.description.into_string(),
        completed,
    })
}

fn push_err(errors: &mut Vec<&'static str>, result: Result<(), &'static str>) {
    if let Err(message) = result {
        errors.push(message);
    }
}

// Values a client could send that still mean "no title"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

// Length is measured on the raw value, emptiness on the trimmed one
fn check_title(value: &Value) -> Result<(), &'static str> {
    let Value::String(title) = value else {
        return Err(TITLE_NOT_STRING);
    };
    if title.trim().is_empty() {
        return Err(TITLE_EMPTY);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TITLE_TOO_LONG);
    }
    Ok(())
}

fn check_description(value: &Value) -> Result<(), &'static str> {
    let Value::String(description) = value else {
        return Err(DESCRIPTION_NOT_STRING);
    };
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(DESCRIPTION_TOO_LONG);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: &str) -> Vec<String> {
        validate_create(&serde_json::from_str(json).unwrap())
    }

    fn update(json: &str) -> Vec<String> {
        validate_update(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn create_accepts_title_only() {
        assert!(create(r#"{"title":"Buy milk"}"#).is_empty());
    }

    #[test]
    fn create_requires_title() {
        assert_eq!(create(r#"{"description":"x"}"#), vec![TITLE_REQUIRED]);
        assert_eq!(create(r#"{"title":null}"#), vec![TITLE_REQUIRED]);
        assert_eq!(create(r#"{"title":""}"#), vec![TITLE_REQUIRED]);
        assert_eq!(create(r#"{"title":false}"#), vec![TITLE_REQUIRED]);
    }

    #[test]
    fn create_rejects_non_string_title() {
        assert_eq!(create(r#"{"title":123}"#), vec![TITLE_NOT_STRING]);
        assert_eq!(create(r#"{"title":["a"]}"#), vec![TITLE_NOT_STRING]);
    }

    #[test]
    fn create_rejects_whitespace_title() {
        assert_eq!(create(r#"{"title":"   "}"#), vec![TITLE_EMPTY]);
    }

    #[test]
    fn title_length_boundary() {
        let ok = serde_json::json!({ "title": "a".repeat(100) }).to_string();
        let too_long = serde_json::json!({ "title": "a".repeat(101) }).to_string();
        assert!(create(&ok).is_empty());
        assert_eq!(create(&too_long), vec![TITLE_TOO_LONG]);
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "é".repeat(100);
        let json = serde_json::json!({ "title": title }).to_string();
        assert!(create(&json).is_empty());
    }

    #[test]
    fn description_length_boundary() {
        let ok = serde_json::json!({ "title": "t", "description": "d".repeat(500) }).to_string();
        let too_long =
            serde_json::json!({ "title": "t", "description": "d".repeat(501) }).to_string();
        assert!(create(&ok).is_empty());
        assert_eq!(create(&too_long), vec![DESCRIPTION_TOO_LONG]);
    }

    #[test]
    fn create_reports_title_before_description() {
        assert_eq!(
            create(r#"{"description":123}"#),
            vec![TITLE_REQUIRED, DESCRIPTION_NOT_STRING]
        );
    }

    #[test]
    fn create_rejects_null_description() {
        assert_eq!(
            create(r#"{"title":"t","description":null}"#),
            vec![DESCRIPTION_NOT_STRING]
        );
    }

    #[test]
    fn update_requires_some_field() {
        assert_eq!(update("{}"), vec![UPDATE_EMPTY]);
        assert_eq!(update(r#"{"unrelated":1}"#), vec![UPDATE_EMPTY]);
    }

    #[test]
    fn update_rejects_non_boolean_completed() {
        assert_eq!(update(r#"{"completed":"true"}"#), vec![COMPLETED_NOT_BOOL]);
    }

    #[test]
    fn update_treats_null_title_as_wrong_type() {
        assert_eq!(update(r#"{"title":null}"#), vec![TITLE_NOT_STRING]);
    }

    #[test]
    fn update_collects_every_violation_in_order() {
        assert_eq!(
            update(r#"{"title":"  ","description":5,"completed":1}"#),
            vec![TITLE_EMPTY, DESCRIPTION_NOT_STRING, COMPLETED_NOT_BOOL]
        );
    }

    #[test]
    fn parse_update_keeps_untrimmed_values() {
        let payload = serde_json::from_str(r#"{"title":"  spaced  "}"#).unwrap();
        let patch = parse_update(payload).unwrap();
        assert_eq!(patch.title.as_deref(), Some("  spaced  "));
        assert_eq!(patch.description, None);
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn parse_create_surfaces_validation_error() {
        let payload = serde_json::from_str(r#"{"title":"   "}"#).unwrap();
        match parse_create(payload) {
            Err(AppError::Validation(details)) => assert_eq!(details, vec![TITLE_EMPTY]),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

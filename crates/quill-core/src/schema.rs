//! Payload validation for create and update requests.
//!
//! Bodies arrive as raw JSON and are checked field by field, so a single
//! response can report every problem at once. Objects are strict: keys
//! other than `title`, `author` and `status` are rejected.
//!
//! | Field | Rule |
//! |-------|------|
//! | `title` | string, 1..=100 characters |
//! | `author` | string, non-empty |
//! | `status` | `published`, `draft` or `in_review` |

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{ArticlePatch, ArticleStatus, NewArticle};

pub const TITLE_MAX_CHARS: usize = 100;

const FIELDS: [&str; 3] = ["title", "author", "status"];

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", summary(.fields))]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, Vec<String>>,
}

fn summary(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

/// Validate a create body. Every field is required.
pub fn validate_new(body: &Value) -> Result<NewArticle, ValidationErrors> {
    let patch = validate_fields(body, true)?;
    match patch {
        ArticlePatch {
            title: Some(title),
            author: Some(author),
            status: Some(status),
        } => Ok(NewArticle {
            title,
            author,
            status,
        }),
        // validate_fields reports missing fields when `required` is set
        _ => Err(ValidationErrors::default()),
    }
}

/// Validate an update body. Every field is optional, but present fields
/// obey the same rules as on create.
pub fn validate_patch(body: &Value) -> Result<ArticlePatch, ValidationErrors> {
    validate_fields(body, false)
}

fn validate_fields(body: &Value, required: bool) -> Result<ArticlePatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(obj) = body.as_object() else {
        errors.add("_body", "Expected a JSON object");
        return Err(errors);
    };

    for key in obj.keys() {
        if !FIELDS.contains(&key.as_str()) {
            errors.add(key, "Unrecognized key");
        }
    }

    let title = check_string(obj, "title", required, "Title is required", &mut errors);
    if let Some(ref t) = title {
        if t.chars().count() > TITLE_MAX_CHARS {
            errors.add(
                "title",
                format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            );
        }
    }

    let author = check_string(obj, "author", required, "Author is required", &mut errors);

    let status = match obj.get("status") {
        None if required => {
            errors.add("status", "Status is required");
            None
        }
        None => None,
        Some(v) => match v.as_str().map(str::parse::<ArticleStatus>) {
            Some(Ok(status)) => Some(status),
            _ => {
                errors.add("status", "Status is required");
                None
            }
        },
    };

    if errors.is_empty() {
        Ok(ArticlePatch {
            title,
            author,
            status,
        })
    } else {
        Err(errors)
    }
}

/// A present field must be a non-empty string; a missing one is only an
/// error when `required`.
fn check_string(
    obj: &Map<String, Value>,
    field: &str,
    required: bool,
    required_msg: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(field) {
        None => {
            if required {
                errors.add(field, required_msg);
            }
            None
        }
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            errors.add(field, required_msg);
            None
        }
        Some(_) => {
            errors.add(field, "Expected a string");
            None
        }
    }
}

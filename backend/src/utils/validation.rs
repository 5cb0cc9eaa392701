//! Imperative field validation over raw JSON payloads.
//!
//! Each input type declares an ordered list of [`FieldSpec`]s. Validation
//! walks every field, so a single pass reports all failing fields at once,
//! and never consults external state.

use crate::errors::{FieldError, NON_FIELD_ERRORS};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::ValidateEmail;

/// A constraint applied to a field value after presence and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Email,
    MinLength(usize),
    MaxLength(usize),
    /// Upper bound on the UTF-8 encoded size, for values fed to bcrypt.
    MaxBytes(usize),
}

/// Declaration of a single expected string field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Strip leading and trailing whitespace before blank and rule checks.
    pub trim_whitespace: bool,
    pub rules: &'static [Rule],
}

/// Field values that passed validation, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidatedFields(BTreeMap<&'static str, String>);

impl ValidatedFields {
    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Removes and returns a field value, leaving an empty string if absent.
    pub fn take(&mut self, field: &str) -> String {
        self.0.remove(field).unwrap_or_default()
    }
}

impl Rule {
    fn check(&self, field: &str, value: &str) -> Option<FieldError> {
        match *self {
            Rule::Email => {
                if value.validate_email() {
                    None
                } else {
                    Some(FieldError::new(
                        field,
                        "invalid",
                        "Enter a valid email address.",
                    ))
                }
            }
            Rule::MinLength(min) if value.chars().count() < min => Some(FieldError::new(
                field,
                "min_length",
                format!("Ensure this field has at least {} characters.", min),
            )),
            Rule::MaxLength(max) if value.chars().count() > max => Some(FieldError::new(
                field,
                "max_length",
                format!("Ensure this field has no more than {} characters.", max),
            )),
            Rule::MaxBytes(max) if value.len() > max => Some(FieldError::new(
                field,
                "max_length",
                format!("Ensure this field has no more than {} bytes.", max),
            )),
            _ => None,
        }
    }
}

/// Error reported when the payload itself is not a JSON object.
pub fn not_an_object(value: &Value) -> FieldError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    };
    FieldError::new(
        NON_FIELD_ERRORS,
        "invalid",
        format!("Invalid data. Expected a dictionary, but got {}.", kind),
    )
}

/// Validates `payload` against `fields`, collecting every failure.
pub fn validate_fields(
    fields: &[FieldSpec],
    payload: &Map<String, Value>,
) -> Result<ValidatedFields, Vec<FieldError>> {
    let mut validated = ValidatedFields::default();
    let mut errors = Vec::new();

    for spec in fields {
        match validate_field(spec, payload.get(spec.name)) {
            Ok(value) => {
                validated.0.insert(spec.name, value);
            }
            Err(field_errors) => errors.extend(field_errors),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

fn validate_field(spec: &FieldSpec, raw: Option<&Value>) -> Result<String, Vec<FieldError>> {
    let fail = |code: &str, message: &str| vec![FieldError::new(spec.name, code, message)];

    let text = match raw {
        None => return Err(fail("required", "This field is required.")),
        Some(Value::Null) => return Err(fail("null", "This field may not be null.")),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(fail("invalid", "Not a valid string.")),
    };

    let value = if spec.trim_whitespace {
        text.trim().to_string()
    } else {
        text
    };

    if value.is_empty() {
        return Err(fail("blank", "This field may not be blank."));
    }

    let errors: Vec<FieldError> = spec
        .rules
        .iter()
        .filter_map(|rule| rule.check(spec.name, &value))
        .collect();

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

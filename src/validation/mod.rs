//! Declarative request-body validation.
//!
//! A route declares a list of [`FieldRule`]s; [`validate_body`] applies them
//! to the parsed JSON body and returns every violation as a human-readable
//! message. The engine is a pure function of (rules, body): no I/O, no
//! panics, and malformed input produces messages instead of errors.

pub mod rules;

use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Per-field constraint set applied by [`validate_body`].
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    required: bool,
    kind: FieldKind,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl FieldRule {
    pub fn text(field: &'static str) -> Self {
        Self {
            field,
            required: false,
            kind: FieldKind::Text,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn number(field: &'static str) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(field)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Compiles `pattern` anchored at both ends, so a match always covers
    /// the whole string. Panics on an invalid expression, which is a
    /// programming error in a rule set, not bad input.
    pub fn pattern(mut self, pattern: &str) -> Self {
        let anchored = format!("^(?:{pattern})$");
        self.pattern = Some(Regex::new(&anchored).expect("field rule pattern must be valid"));
        self
    }
}

/// Applies `rules` to `body` in declaration order, accumulating all
/// violations rather than stopping at the first. Returns an empty list iff
/// every rule is satisfied. Bodies that are not JSON objects are treated as
/// having no fields at all.
pub fn validate_body(rules: &[FieldRule], body: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for rule in rules {
        let value = body.get(rule.field);

        // Absent, null and empty-string all count as "not provided".
        let missing = match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            if rule.required {
                errors.push(format!("{} is required", rule.field));
            }
            continue;
        }
        let value = value.expect("present value");

        match rule.kind {
            FieldKind::Text => {
                let Some(text) = value.as_str() else {
                    errors.push(format!("{} must be text", rule.field));
                    continue;
                };
                let length = text.chars().count();
                if let Some(min) = rule.min_length {
                    if length < min {
                        errors.push(format!(
                            "{} must have at least {} characters",
                            rule.field, min
                        ));
                    }
                }
                if let Some(max) = rule.max_length {
                    if length > max {
                        errors.push(format!(
                            "{} must have at most {} characters",
                            rule.field, max
                        ));
                    }
                }
                if let Some(pattern) = &rule.pattern {
                    if !pattern.is_match(text) {
                        errors.push(format!("{} has an invalid format", rule.field));
                    }
                }
            }
            FieldKind::Number => {
                let numeric = match value {
                    Value::Number(_) => true,
                    Value::String(s) => s.trim().parse::<f64>().is_ok(),
                    _ => false,
                };
                if !numeric {
                    errors.push(format!("{} must be a number", rule.field));
                }
            }
        }
    }

    errors
}

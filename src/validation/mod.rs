//! Field-level request validation.
//!
//! Every Tembo operation and every inbound callback declares a [`Schema`]:
//! an ordered list of fields, each with its rules. Validation walks the
//! fields in declaration order and collects one message per violated rule, so
//! callers see every problem at once instead of only the first.

pub mod normalize;
pub mod schemas;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2024-01-31`
    Date,
    /// `2024-01-31 13:45:00`
    DateTime,
    /// `2024-01-31T13:45:00Z`
    IsoUtc,
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Date => "%Y-%m-%d",
            DateFormat::DateTime => "%Y-%m-%d %H:%M:%S",
            DateFormat::IsoUtc => "%Y-%m-%dT%H:%M:%SZ",
        }
    }

    /// Format as it appears in messages.
    pub fn label(&self) -> &'static str {
        match self {
            DateFormat::Date => "Y-m-d",
            DateFormat::DateTime => "Y-m-d H:i:s",
            DateFormat::IsoUtc => "Y-m-d\\TH:i:s\\Z",
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            DateFormat::Date => NaiveDate::parse_from_str(value, self.pattern()).is_ok(),
            _ => NaiveDateTime::parse_from_str(value, self.pattern()).is_ok(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Str,
    Numeric,
    Email,
    Date,
    Format(DateFormat),
    In(&'static [&'static str]),
    /// Must be a date strictly before the named field.
    Before(&'static str),
    /// Must be a date strictly after the named field.
    After(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Dotted path into the payload, e.g. `identityInfo.idType`.
    pub path: &'static str,
    pub nullable: bool,
    pub rules: &'static [Rule],
}

impl Field {
    pub const fn required(path: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            path,
            nullable: false,
            rules,
        }
    }

    pub const fn nullable(path: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            path,
            nullable: true,
            rules,
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        let messages = self.violations(payload);
        if messages.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = self.name, count = messages.len(), "Validation failed");
            Err(ValidationErrors::new(messages))
        }
    }

    pub fn violations(&self, payload: &Value) -> Vec<String> {
        let mut messages = Vec::new();

        for field in self.fields {
            let value = lookup(payload, field.path).filter(|v| !is_blank(v));
            let attribute = attribute_name(field.path);

            let Some(value) = value else {
                if !field.nullable {
                    messages.push(format!("The {} field is required.", attribute));
                }
                continue;
            };

            for rule in field.rules {
                if let Some(message) = check(rule, value, &attribute, payload) {
                    messages.push(message);
                }
            }
        }

        messages
    }
}

fn check(rule: &Rule, value: &Value, attribute: &str, payload: &Value) -> Option<String> {
    let text = value.as_str();

    let passes = match rule {
        Rule::Str => value.is_string(),
        Rule::Numeric => is_numeric(value),
        Rule::Email => text.map(validator::validate_email).unwrap_or(false),
        Rule::Date => text.and_then(parse_date).is_some(),
        Rule::Format(format) => text.map(|t| format.matches(t)).unwrap_or(false),
        Rule::In(allowed) => text.map(|t| allowed.contains(&t)).unwrap_or(false),
        Rule::Before(other) => compare_dates(value, payload, other)
            .map(|ordering| ordering.is_lt())
            .unwrap_or(false),
        Rule::After(other) => compare_dates(value, payload, other)
            .map(|ordering| ordering.is_gt())
            .unwrap_or(false),
    };

    if passes {
        return None;
    }

    Some(match rule {
        Rule::Str => format!("The {} field must be a string.", attribute),
        Rule::Numeric => format!("The {} field must be a number.", attribute),
        Rule::Email => format!("The {} field must be a valid email address.", attribute),
        Rule::Date => format!("The {} field must be a valid date.", attribute),
        Rule::Format(format) => format!(
            "The {} field must match the format {}.",
            attribute,
            format.label()
        ),
        Rule::In(_) => format!("The selected {} is invalid.", attribute),
        Rule::Before(other) => format!(
            "The {} field must be a date before {}.",
            attribute,
            attribute_name(other)
        ),
        Rule::After(other) => format!(
            "The {} field must be a date after {}.",
            attribute,
            attribute_name(other)
        ),
    })
}

fn compare_dates(value: &Value, payload: &Value, other: &str) -> Option<std::cmp::Ordering> {
    let own = value.as_str().and_then(parse_date)?;
    let other = lookup(payload, other)?.as_str().and_then(parse_date)?;
    Some(own.cmp(&other))
}

pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(payload, |current, segment| current.as_object()?.get(segment))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => text.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false),
        _ => false,
    }
}

/// Accepts the date shapes Tembo sends and expects.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }

    // Offsets with or without a colon
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(parsed) = DateTime::parse_from_str(value, pattern) {
            return Some(parsed.naive_utc());
        }
    }

    // %.f also matches no fraction at all
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(parsed);
        }
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `identityInfo.idType` becomes `identity info.id type`.
pub fn attribute_name(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            let mut words = String::with_capacity(segment.len() + 4);
            for (i, ch) in segment.chars().enumerate() {
                if ch.is_uppercase() {
                    if i > 0 {
                        words.push(' ');
                    }
                    words.extend(ch.to_lowercase());
                } else if ch == '_' {
                    words.push(' ');
                } else {
                    words.push(ch);
                }
            }
            words
        })
        .collect::<Vec<_>>()
        .join(".")
}

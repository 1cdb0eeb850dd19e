//! Extraction reply parsing
//!
//! Turns the JSON reply of an extraction collaborator (receipt reader,
//! free-text parser) into candidate expenses. Replies are often wrapped in
//! Markdown code fences and may hold one object or a list of objects.
//! Missing or malformed fields fall back to defaults; only a reply that is
//! not JSON at all is an error.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, NewExpense, Spender, DATE_FORMAT};

/// Item label used when the reply names none
pub const UNKNOWN_ITEM: &str = "unknown";

/// Parse an extraction reply into candidate expenses
///
/// `fallback_date` is used for entries without a valid date and
/// `fallback_category` for entries without a category.
pub fn parse_extraction(
    reply: &str,
    fallback_date: NaiveDate,
    fallback_category: &str,
) -> LedgerResult<Vec<NewExpense>> {
    let body = strip_code_fences(reply);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LedgerError::Import(format!("Reply is not valid JSON: {}", e)))?;

    let objects = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(LedgerError::Import(format!(
                "Expected an object or a list of objects, got {}",
                kind(&other)
            )))
        }
    };

    objects
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(fields) => Ok(to_expense(fields, fallback_date, fallback_category)),
            other => Err(LedgerError::Import(format!(
                "Entry {} is {}, expected an object",
                index + 1,
                kind(other)
            ))),
        })
        .collect()
}

/// Remove surrounding ```json / ``` fences
fn strip_code_fences(reply: &str) -> &str {
    let mut body = reply.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn text<'v>(fields: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn to_expense(
    fields: &Map<String, Value>,
    fallback_date: NaiveDate,
    fallback_category: &str,
) -> NewExpense {
    let date = match text(fields, "date") {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap_or_else(|_| {
            tracing::warn!(date = raw, "Unreadable date in reply, using {}", fallback_date);
            fallback_date
        }),
        None => fallback_date,
    };

    let spender = match text(fields, "spender") {
        Some(raw) => raw.parse::<Spender>().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unknown spender in reply, using joint");
            Spender::Joint
        }),
        None => Spender::Joint,
    };

    NewExpense {
        date,
        item: text(fields, "item").unwrap_or(UNKNOWN_ITEM).to_string(),
        amount: amount(fields.get("amount")),
        category: text(fields, "category")
            .unwrap_or(fallback_category)
            .to_string(),
        spender,
    }
}

fn amount(value: Option<&Value>) -> Money {
    let parsed = match value {
        None | Some(Value::Null) => return Money::zero(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(units) => Some(Money::from_units(units)).filter(Money::within_limit),
            None => n.as_f64().and_then(Money::from_whole_f64),
        },
        Some(Value::String(s)) => Money::parse(s).ok(),
        Some(_) => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::warn!(amount = ?value, "Unreadable amount in reply, using 0");
        Money::zero()
    })
}

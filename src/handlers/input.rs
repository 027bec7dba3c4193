//! Request-body validation shared by the handlers. Everything here runs
//! before any database access.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Trimmed, non-empty text or a validation error carrying `message`.
pub fn required_text(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Blank strings collapse to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts JSON numbers and numeric strings.
pub fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A caller-declared ordering: non-empty, numeric, no repeats.
pub fn ordered_ids(field: &str, values: Option<Vec<Value>>) -> Result<Vec<i64>> {
    let values = values
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} must be a non-empty array")))?;
    distinct_ids(field, &values)
}

/// Like [`ordered_ids`] but an empty array is allowed.
pub fn id_set(field: &str, values: Option<Vec<Value>>) -> Result<Vec<i64>> {
    let values =
        values.ok_or_else(|| AppError::Validation(format!("{field} must be an array")))?;
    distinct_ids(field, &values)
}

fn distinct_ids(field: &str, values: &[Value]) -> Result<Vec<i64>> {
    let ids = values
        .iter()
        .map(as_id)
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| AppError::Validation(format!("{field} must contain only numbers")))?;

    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    if !ids.iter().all(|id| seen.insert(*id)) {
        return Err(AppError::Validation(format!("{field} must be unique")));
    }

    Ok(ids)
}

/// `"YYYY-MM-DD"` (or an RFC 3339 timestamp) normalised to UTC midnight.
/// `None` and blank strings clear the date.
pub fn due_date(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .ok_or_else(|| AppError::Validation("Invalid dueDate".to_string()))?;

    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}

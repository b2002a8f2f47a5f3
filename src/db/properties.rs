use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::HashMap;

use crate::db::views::View;
use crate::domain::dates::normalize_day_first;
use crate::domain::property::{PropertyCutoff, PropertyStatus};
use crate::errors::AuditError;

/// The flag comes from a typed column or from a JSON payload, so any storage
/// class can show up. Values that don't read as a boolean become `None`.
fn flag(property: &str, raw: Value) -> Option<bool> {
    match raw {
        Value::Null => None,
        Value::Integer(v) => Some(v != 0),
        Value::Real(v) => Some(v != 0.0),
        Value::Text(ref t) => match t.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => {
                tracing::debug!(property, raw = ?raw, "unreadable active flag");
                None
            }
        },
        Value::Blob(_) => {
            tracing::debug!(property, "blob active flag ignored");
            None
        }
    }
}

/// Properties the master view marks as offboarding. Rows whose cutoff text
/// does not normalize to a date are skipped.
pub fn fetch_property_cutoffs(conn: &Connection) -> Result<Vec<PropertyCutoff>, AuditError> {
    let view = View::PropertyCutoffs;
    let mut stmt = conn
        .prepare(view.sql())
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,         // nickname
                row.get::<_, Value>(1)?,          // active
                row.get::<_, Option<String>>(2)?, // country
                row.get::<_, Option<String>>(3)?, // city
                row.get::<_, Option<String>>(4)?, // offboarding_cutoff
            ))
        })
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let mut out = Vec::new();
    for r in rows {
        let (property_name, active, country, city, raw_cutoff) =
            r.map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

        let Some(cutoff) = raw_cutoff.as_deref().and_then(normalize_day_first) else {
            tracing::debug!(property = %property_name, raw = ?raw_cutoff, "unreadable cutoff, skipped");
            continue;
        };

        let status = PropertyStatus::from_flag(flag(&property_name, active));
        out.push(PropertyCutoff {
            property_name,
            status,
            country,
            city,
            cutoff,
        });
    }
    Ok(out)
}

/// Activity status per listing nickname.
pub fn fetch_listing_activity(
    conn: &Connection,
) -> Result<HashMap<String, PropertyStatus>, AuditError> {
    let view = View::ListingActivity;
    let mut stmt = conn
        .prepare(view.sql())
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?))
        })
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let mut out = HashMap::new();
    for r in rows {
        let (nickname, active) =
            r.map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;
        let status = PropertyStatus::from_flag(flag(&nickname, active));
        out.insert(nickname, status);
    }
    Ok(out)
}

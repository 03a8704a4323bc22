//! Bail application operations.

use chrono::Utc;
use legalai_core::{BailFormId, Error, Result, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::models::{BailForm, BailFormData};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Internal(format!("JSON encode error: {e}")))
}

/// Store a bail form submitted by `submitted_by`.
pub fn create_bail_form(
    conn: &Connection,
    submitted_by: UserId,
    data: &BailFormData,
) -> Result<BailForm> {
    let id = BailFormId::new();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        &format!(
            "INSERT INTO bail_forms ({}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
            BailForm::COLUMNS
        ),
        rusqlite::params![
            id.to_string(),
            submitted_by.to_string(),
            to_json(&data.petitioner)?,
            to_json(&data.respondent)?,
            to_json(&data.police_station)?,
            to_json(&data.act_sections)?,
            to_json(&data.bail)?,
            created_at,
        ],
    )
    .map_err(|e| {
        if e.to_string().contains("FOREIGN KEY constraint failed") {
            Error::not_found("user", submitted_by)
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(BailForm {
        id,
        submitted_by,
        data: data.clone(),
        created_at,
    })
}

/// Get a bail form by primary key.
pub fn get_bail_form(conn: &Connection, id: BailFormId) -> Result<Option<BailForm>> {
    let q = format!("SELECT {} FROM bail_forms WHERE id = ?1", BailForm::COLUMNS);
    conn.query_row(&q, [id.to_string()], BailForm::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List bail forms newest first, optionally only those from one submitter.
pub fn list_bail_forms(conn: &Connection, submitted_by: Option<UserId>) -> Result<Vec<BailForm>> {
    let (sql, params) = match submitted_by {
        Some(user) => (
            format!(
                "SELECT {} FROM bail_forms WHERE submitted_by = ?1 ORDER BY created_at DESC, rowid DESC",
                BailForm::COLUMNS
            ),
            vec![user.to_string()],
        ),
        None => (
            format!(
                "SELECT {} FROM bail_forms ORDER BY created_at DESC, rowid DESC",
                BailForm::COLUMNS
            ),
            Vec::new(),
        ),
    };

    let mut stmt = conn.prepare(&sql).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params), BailForm::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

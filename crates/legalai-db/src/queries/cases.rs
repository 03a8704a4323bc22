//! Court case operations.

use chrono::Utc;
use legalai_core::{CaseDetails, CaseId, CaseStatus, Error, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::CourtCase;

/// Filter for [`list_cases`].
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Insert a new case and return it.
pub fn create_case(conn: &Connection, details: &CaseDetails) -> Result<CourtCase> {
    let id = CaseId::new();
    let created_at = Utc::now().to_rfc3339();
    let d = details;

    conn.execute(
        &format!(
            "INSERT INTO court_cases ({}) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,\
             ?16,?17,?18,?19,?20,?21,?22,?23,?24,?25,?26,?27,?28,?29)",
            CourtCase::COLUMNS
        ),
        rusqlite::params![
            id.to_string(),
            d.case_title,
            d.case_number,
            d.filing_number,
            d.filing_date,
            d.filing_year,
            d.listing_date,
            d.plaintiff_name,
            d.defendant_name,
            d.plaintiff_lawyer_name,
            d.defendant_lawyer_name,
            d.judge_name,
            d.offense_type,
            d.days_in_custody,
            d.bail_status,
            d.next_hearing_date,
            d.petitioner_name,
            d.respondent_name,
            d.advocate_name,
            d.act_section,
            d.time_served_in_prison,
            d.case_risk_score,
            d.bailable,
            d.cognizable,
            d.punishment,
            d.section,
            d.status.map(|s| s.as_str()),
            d.priority,
            created_at,
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(CourtCase {
        id,
        details: details.clone(),
        created_at,
    })
}

/// Get a case by primary key.
pub fn get_case(conn: &Connection, id: CaseId) -> Result<Option<CourtCase>> {
    let q = format!("SELECT {} FROM court_cases WHERE id = ?1", CourtCase::COLUMNS);
    conn.query_row(&q, [id.to_string()], CourtCase::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List cases, newest first.
pub fn list_cases(conn: &Connection, filter: &CaseFilter) -> Result<Vec<CourtCase>> {
    let mut sql = format!("SELECT {} FROM court_cases", CourtCase::COLUMNS);
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(status) = filter.status {
        sql.push_str(" WHERE status = ?");
        params.push(Box::new(status.as_str()));
    }

    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    // SQLite needs a LIMIT before it accepts an OFFSET.
    match (filter.limit, filter.offset) {
        (Some(limit), offset) => {
            sql.push_str(&format!(" LIMIT {limit} OFFSET {}", offset.unwrap_or(0)));
        }
        (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
        (None, None) => {}
    }

    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map(param_refs.as_slice(), CourtCase::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

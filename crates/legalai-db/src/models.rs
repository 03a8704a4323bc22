//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use legalai_core::{BailFormId, CaseDetails, CaseId, CaseStatus, Role, TokenId, UserId};
use rusqlite::types::Type;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use legalai_core::BailFormData;

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

fn conversion_error(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s).map_err(|e| conversion_error(idx, e))?;
    Ok(T::from(uuid))
}

/// Parse a JSON document from a text column.
fn parse_json<T: DeserializeOwned>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    serde_json::from_str(&s).map_err(|e| conversion_error(idx, e))
}

fn parse_role(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Role> {
    let s: String = row.get(idx)?;
    s.parse().map_err(|e| conversion_error(idx, e))
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: UserProfile,
    pub created_at: String,
    pub updated_at: String,
}

/// Optional personal details collected at registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub address: String,
    pub phone: String,
    pub secondary_phone: String,
    pub father_name: String,
    pub mother_name: String,
    pub gender: String,
    pub dob: String,
    pub nationality: String,
    pub caste: String,
    pub occupation: String,
    pub jail: Option<String>,
}

impl User {
    pub(crate) const COLUMNS: &'static str = "id, first_name, last_name, email, password_hash, role, \
        address, phone, secondary_phone, father_name, mother_name, gender, dob, nationality, \
        caste, occupation, jail, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            password_hash: row.get(4)?,
            role: parse_role(row, 5)?,
            profile: UserProfile {
                address: row.get(6)?,
                phone: row.get(7)?,
                secondary_phone: row.get(8)?,
                father_name: row.get(9)?,
                mother_name: row.get(10)?,
                gender: row.get(11)?,
                dob: row.get(12)?,
                nationality: row.get(13)?,
                caste: row.get(14)?,
                occupation: row.get(15)?,
                jail: row.get(16)?,
            },
            created_at: row.get(17)?,
            updated_at: row.get(18)?,
        })
    }

    /// Whether this account has a real bcrypt hash and may log in.
    pub fn can_login(&self) -> bool {
        self.password_hash.starts_with("$2")
    }
}

/// Data needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: UserProfile,
}

// ---------------------------------------------------------------------------
// AuthToken
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: TokenId,
    pub user_id: UserId,
    pub token: String,
    pub expires_at: String,
}

impl AuthToken {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            user_id: parse_id(row, 1)?,
            token: row.get(2)?,
            expires_at: row.get(3)?,
        })
    }
}

// ---------------------------------------------------------------------------
// CourtCase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CourtCase {
    pub id: CaseId,
    pub details: CaseDetails,
    pub created_at: String,
}

impl CourtCase {
    pub(crate) const COLUMNS: &'static str = "id, case_title, case_number, filing_number, \
        filing_date, filing_year, listing_date, plaintiff_name, defendant_name, \
        plaintiff_lawyer_name, defendant_lawyer_name, judge_name, offense_type, days_in_custody, \
        bail_status, next_hearing_date, petitioner_name, respondent_name, advocate_name, \
        act_section, time_served_in_prison, case_risk_score, bailable, cognizable, punishment, \
        section, status, priority, created_at";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let status: Option<String> = row.get(26)?;
        let status = status
            .map(|s| s.parse::<CaseStatus>())
            .transpose()
            .map_err(|e| conversion_error(26, e))?;

        Ok(Self {
            id: parse_id(row, 0)?,
            details: CaseDetails {
                case_title: row.get(1)?,
                case_number: row.get(2)?,
                filing_number: row.get(3)?,
                filing_date: row.get(4)?,
                filing_year: row.get(5)?,
                listing_date: row.get(6)?,
                plaintiff_name: row.get(7)?,
                defendant_name: row.get(8)?,
                plaintiff_lawyer_name: row.get(9)?,
                defendant_lawyer_name: row.get(10)?,
                judge_name: row.get(11)?,
                offense_type: row.get(12)?,
                days_in_custody: row.get(13)?,
                bail_status: row.get(14)?,
                next_hearing_date: row.get(15)?,
                petitioner_name: row.get(16)?,
                respondent_name: row.get(17)?,
                advocate_name: row.get(18)?,
                act_section: row.get(19)?,
                time_served_in_prison: row.get(20)?,
                case_risk_score: row.get(21)?,
                bailable: row.get(22)?,
                cognizable: row.get(23)?,
                punishment: row.get(24)?,
                section: row.get(25)?,
                status,
                priority: row.get(27)?,
            },
            created_at: row.get(28)?,
        })
    }
}

// ---------------------------------------------------------------------------
// BailForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BailForm {
    pub id: BailFormId,
    pub submitted_by: UserId,
    pub data: BailFormData,
    pub created_at: String,
}

impl BailForm {
    pub(crate) const COLUMNS: &'static str =
        "id, submitted_by, petitioner, respondent, police_station, act_sections, bail, created_at";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            submitted_by: parse_id(row, 1)?,
            data: BailFormData {
                petitioner: parse_json(row, 2)?,
                respondent: parse_json(row, 3)?,
                police_station: parse_json(row, 4)?,
                act_sections: parse_json(row, 5)?,
                bail: parse_json(row, 6)?,
            },
            created_at: row.get(7)?,
        })
    }
}

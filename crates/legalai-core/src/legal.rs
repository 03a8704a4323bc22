//! Legal-domain enums and the sections of a bail application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role. Decides which dashboards and actions a user may reach.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(alias = "User")]
    User,
    #[serde(alias = "Lawyer")]
    Lawyer,
    #[serde(alias = "Judge")]
    Judge,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Lawyer => "lawyer",
            Role::Judge => "judge",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "lawyer" => Ok(Role::Lawyer),
            "judge" => Ok(Role::Judge),
            other => Err(Error::Validation(format!("Unknown role: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a court case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum CaseStatus {
    Open,
    Closed,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::Closed => "Closed",
            CaseStatus::InProgress => "In Progress",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "open" => Ok(CaseStatus::Open),
            "closed" => Ok(CaseStatus::Closed),
            "in progress" | "inprogress" => Ok(CaseStatus::InProgress),
            _ => Err(Error::Validation(format!("Unknown case status: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Bail application sections
// ---------------------------------------------------------------------------

/// The person applying for bail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Petitioner {
    pub name: String,
    pub gender: String,
    pub dob: String,
    pub age: Option<u32>,
    pub advocate_name: String,
    pub bar_regn_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
}

/// The opposing party, usually the state or an organisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Respondent {
    pub organization_details: String,
    pub organization_name: String,
    pub respondent_name: String,
    pub advocate_name: String,
    pub bar_regn_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
}

/// FIR and police-station details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PoliceStation {
    pub challan_type: String,
    pub state: String,
    pub district: String,
    pub police_station_code: String,
    pub fir_type: String,
    pub fir_no: String,
    pub fir_year: String,
    pub date_of_offence: String,
    pub fir_date: String,
}

/// One act together with the sections invoked under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ActSection {
    pub act: String,
    pub sections: String,
}

/// Details of the bail being requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BailDetails {
    pub case_type: String,
    pub crime_registered_office: String,
    pub fir_no: String,
    pub ipc_section: String,
    pub case_description: String,
    pub offence_type: String,
    pub offence_against: String,
}

/// The sections of a bail application as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BailFormData {
    pub petitioner: Petitioner,
    pub respondent: Respondent,
    pub police_station: PoliceStation,
    #[serde(rename = "actSection", alias = "actSections")]
    pub act_sections: Vec<ActSection>,
    pub bail: BailDetails,
}

// ---------------------------------------------------------------------------
// Court case
// ---------------------------------------------------------------------------

/// Everything recorded about a court case apart from its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseDetails {
    pub case_title: String,
    pub case_number: String,
    pub filing_number: String,
    pub filing_date: String,
    pub filing_year: String,
    pub listing_date: String,
    pub plaintiff_name: String,
    pub defendant_name: String,
    pub plaintiff_lawyer_name: String,
    pub defendant_lawyer_name: String,
    pub judge_name: String,
    pub offense_type: String,
    pub days_in_custody: i64,
    pub bail_status: String,
    pub next_hearing_date: String,
    pub petitioner_name: String,
    pub respondent_name: String,
    pub advocate_name: String,
    pub act_section: String,
    pub time_served_in_prison: String,
    pub case_risk_score: f64,
    pub bailable: String,
    pub cognizable: String,
    pub punishment: String,
    pub section: String,
    pub status: Option<CaseStatus>,
    pub priority: String,
}

impl Default for CaseDetails {
    fn default() -> Self {
        Self {
            case_title: String::new(),
            case_number: String::new(),
            filing_number: String::new(),
            filing_date: String::new(),
            filing_year: String::new(),
            listing_date: String::new(),
            plaintiff_name: String::new(),
            defendant_name: String::new(),
            plaintiff_lawyer_name: String::new(),
            defendant_lawyer_name: String::new(),
            judge_name: String::new(),
            offense_type: String::new(),
            days_in_custody: 0,
            bail_status: String::new(),
            next_hearing_date: String::new(),
            petitioner_name: String::new(),
            respondent_name: String::new(),
            advocate_name: String::new(),
            act_section: String::new(),
            time_served_in_prison: String::new(),
            case_risk_score: 0.0,
            bailable: "no".into(),
            cognizable: "yes".into(),
            punishment: String::new(),
            section: String::new(),
            status: None,
            priority: String::new(),
        }
    }
}

impl CaseDetails {
    /// Check that every mandatory field is present and the counters are sane.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("caseTitle", &self.case_title),
            ("caseNumber", &self.case_number),
            ("filingNumber", &self.filing_number),
            ("filingDate", &self.filing_date),
            ("filingYear", &self.filing_year),
            ("listingDate", &self.listing_date),
            ("plaintiffName", &self.plaintiff_name),
            ("defendantName", &self.defendant_name),
            ("plaintiffLawyerName", &self.plaintiff_lawyer_name),
            ("defendantLawyerName", &self.defendant_lawyer_name),
            ("judgeName", &self.judge_name),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if self.days_in_custody < 0 {
            return Err(Error::validation("daysInCustody must not be negative"));
        }
        if !self.case_risk_score.is_finite() {
            return Err(Error::validation("caseRiskScore must be a number"));
        }
        Ok(())
    }
}

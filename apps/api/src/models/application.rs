#![allow(dead_code)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an application. The scoring engine only ever drives the
/// single transition `applied → shortlisted`; every other move is a manual
/// HR (or candidate withdrawal) action recorded in status history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Shortlisted,
    InterviewScheduled,
    Interviewed,
    Selected,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::InterviewScheduled => "interview-scheduled",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "screening" => Ok(ApplicationStatus::Screening),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "interview-scheduled" => Ok(ApplicationStatus::InterviewScheduled),
            "interviewed" => Ok(ApplicationStatus::Interviewed),
            "selected" => Ok(ApplicationStatus::Selected),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "withdrawn" => Ok(ApplicationStatus::Withdrawn),
            other => Err(format!("Unknown application status '{other}'")),
        }
    }
}

/// One candidate's application to one job, with the embedded analysis and
/// score fields the apply handler persists after scoring.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub cover_letter: Option<String>,
    pub notice_period: Option<String>,
    pub willing_to_relocate: bool,
    pub resume_filename: String,
    pub resume_original_name: String,
    pub resume_size: i64,
    /// Skills the AI service extracted from the resume.
    pub skills: Vec<String>,
    pub summary: Option<String>,
    pub skill_match: i16,
    pub experience_match: i16,
    pub overall_score: i16,
    pub recommendations: Vec<String>,
    /// True when extraction failed and the application was scored on
    /// degraded (empty) inputs.
    pub analysis_error: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    pub fn status(&self) -> Result<ApplicationStatus, String> {
        self.status.parse()
    }
}

/// Append-only status history entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusChangeRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub from_status: String,
    pub to_status: String,
    pub changed_by: Option<Uuid>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HrNoteRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub note: String,
    pub added_by: Uuid,
    pub is_private: bool,
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        let all = [
            ApplicationStatus::Applied,
            ApplicationStatus::Screening,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::Interviewed,
            ApplicationStatus::Selected,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("hired".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewScheduled).unwrap();
        assert_eq!(json, "\"interview-scheduled\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"shortlisted\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Shortlisted);
    }
}

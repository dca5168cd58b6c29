#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::screening::{ExperienceRequirement, ScreeningPolicy};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub posted_by: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience_min: f64,
    pub experience_max: Option<f64>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    pub remote: bool,
    pub employment_type: String,
    pub category: String,
    /// draft | active | paused | closed | expired
    pub status: String,
    pub screening_enabled: bool,
    pub screening_minimum_score: i16,
    pub screening_auto_shortlist: bool,
    pub views: i32,
    pub applications: i32,
    pub shortlisted: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    /// The job's experience range as the scoring engine consumes it.
    pub fn experience_requirement(&self) -> ExperienceRequirement {
        ExperienceRequirement::new(self.experience_min, self.experience_max)
    }

    /// The job's AI screening policy as the shortlist decision consumes it.
    pub fn screening_policy(&self) -> ScreeningPolicy {
        ScreeningPolicy {
            enabled: self.screening_enabled,
            auto_shortlist: self.screening_auto_shortlist,
            minimum_score: self.screening_minimum_score.clamp(0, 100) as u8,
        }
    }

    pub fn is_open_for_applications(&self) -> bool {
        self.status == "active"
    }

    /// "Remote" or "City, State, Country" with empty parts dropped.
    pub fn full_location(&self) -> String {
        if self.remote {
            return "Remote".to_string();
        }
        [
            self.location_city.as_deref(),
            self.location_state.as_deref(),
            self.location_country.as_deref(),
        ]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

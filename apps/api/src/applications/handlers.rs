//! Axum route handlers for the Applications API.
//!
//! The apply handler is the scoring engine's one caller: it proxies the
//! resume to the extraction service, degrades the inputs on failure, scores
//! synchronously, persists the result, and applies the auto-shortlist
//! transition exactly once.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::{estimate_experience_years, ResumeAnalysis, ResumeAnalyzer};
use crate::errors::AppError;
use crate::models::application::{
    ApplicationRow, ApplicationStatus, HrNoteRow, StatusChangeRow,
};
use crate::models::job::JobRow;
use crate::pagination::PageParams;
use crate::screening::{decide_shortlist, score_candidate, ScoreBundle};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub application: ApplicationRow,
    pub shortlisted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListApplicationsParams {
    pub user_id: Uuid,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListApplicationsParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationRow>,
    pub count: usize,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct ApplicationDetailResponse {
    pub application: ApplicationRow,
    pub status_history: Vec<StatusChangeRow>,
    pub hr_notes: Vec<HrNoteRow>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub changed_by: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub note: String,
    pub added_by: Uuid,
    #[serde(default = "default_true")]
    pub is_private: bool,
}

fn default_true() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Apply flow helpers
// ────────────────────────────────────────────────────────────────────────────

struct ResumeUpload {
    filename: String,
    content_type: String,
    data: Bytes,
}

#[derive(Default)]
struct ApplyForm {
    user_id: Option<Uuid>,
    cover_letter: Option<String>,
    notice_period: Option<String>,
    willing_to_relocate: bool,
    resume: Option<ResumeUpload>,
}

async fn read_apply_form(mut multipart: Multipart) -> Result<ApplyForm, AppError> {
    let mut form = ApplyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                form.resume = Some(ResumeUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            "user_id" => {
                let value = field.text().await.unwrap_or_default();
                let id = value
                    .parse()
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                form.user_id = Some(id);
            }
            "cover_letter" => form.cover_letter = Some(field.text().await.unwrap_or_default()),
            "notice_period" => form.notice_period = Some(field.text().await.unwrap_or_default()),
            "willing_to_relocate" => {
                form.willing_to_relocate = field.text().await.unwrap_or_default() == "true";
            }
            _ => {} // unknown fields are ignored
        }
    }

    Ok(form)
}

/// Calls the extraction service; on failure returns empty inputs plus an
/// error flag so the application is still scored and persisted. Degrade the
/// inputs, never the scoring function.
async fn run_analysis(
    analyzer: &dyn ResumeAnalyzer,
    upload: &ResumeUpload,
) -> (ResumeAnalysis, bool) {
    match analyzer
        .analyze(&upload.filename, &upload.content_type, upload.data.clone())
        .await
    {
        Ok(analysis) => (analysis, false),
        Err(e) => {
            warn!("Resume analysis failed, continuing with degraded inputs: {e}");
            (ResumeAnalysis::default(), true)
        }
    }
}

/// Timestamp-prefixed storage name so repeated uploads never collide.
fn stored_filename(original: &str) -> String {
    format!("{}_{original}", Utc::now().timestamp_millis())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/apply
///
/// Multipart submission: `resume` file plus `user_id` and optional
/// application details. Scores the candidate against the job and may
/// auto-shortlist per the job's screening policy.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let form = read_apply_form(multipart).await?;

    let user_id = form
        .user_id
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let upload = form
        .resume
        .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;

    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    if !job.is_open_for_applications() {
        return Err(AppError::Validation(
            "Job is not active for applications".to_string(),
        ));
    }

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have already applied for this job".to_string(),
        ));
    }

    info!("Processing resume for job '{}' ({job_id})", job.title);

    let (analysis, analysis_error) = run_analysis(state.analyzer.as_ref(), &upload).await;
    let candidate_years = estimate_experience_years(&analysis);

    let bundle: ScoreBundle = score_candidate(
        state.skill_matcher.as_ref(),
        &analysis.skills,
        candidate_years,
        &job.required_skills,
        &job.experience_requirement(),
    );
    let decision = decide_shortlist(bundle.overall_score, &job.screening_policy());

    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, user_id, job_id, company_id, cover_letter, notice_period,
             willing_to_relocate, resume_filename, resume_original_name, resume_size,
             skills, summary, skill_match, experience_match, overall_score,
             recommendations, analysis_error, status, created_at, updated_at)
        VALUES
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
             $11, $12, $13, $14, $15, $16, $17, 'applied', NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job_id)
    .bind(job.company_id)
    .bind(&form.cover_letter)
    .bind(&form.notice_period)
    .bind(form.willing_to_relocate)
    .bind(stored_filename(&upload.filename))
    .bind(&upload.filename)
    .bind(upload.data.len() as i64)
    .bind(&analysis.skills)
    .bind(&analysis.summary)
    .bind(bundle.skill_match as i16)
    .bind(bundle.experience_match as i16)
    .bind(bundle.overall_score as i16)
    .bind(&bundle.recommendations)
    .bind(analysis_error)
    .fetch_one(&state.db)
    .await
    // A concurrent apply can slip past the duplicate check above; the
    // unique (user_id, job_id) index catches it and still answers 409.
    .map_err(|e| AppError::conflict_on_unique(e, "You have already applied for this job"))?;

    sqlx::query("UPDATE jobs SET applications = applications + 1 WHERE id = $1")
        .bind(job_id)
        .execute(&state.db)
        .await?;

    // One-way, one-time transition, evaluated only here.
    let application = if decision.shortlist {
        info!(
            "Auto-shortlisting application {} (score {})",
            application.id, bundle.overall_score
        );
        transition_status(
            &state,
            application,
            ApplicationStatus::Shortlisted,
            None,
            Some(decision.reason.clone()),
        )
        .await?
    } else {
        application
    };

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            message: "Application submitted successfully".to_string(),
            shortlisted: decision.shortlist,
            application,
        }),
    ))
}

/// GET /api/v1/applications
///
/// Lists a user's applications, newest first, optionally filtered by status.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<ListApplicationsParams>,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let status = match &params.status {
        Some(s) => Some(
            s.parse::<ApplicationStatus>()
                .map_err(AppError::Validation)?,
        ),
        None => None,
    };
    let page = params.page_params();

    let applications = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT * FROM applications
        WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(params.user_id)
    .bind(status.map(|s| s.as_str()))
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&state.db)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)",
    )
    .bind(params.user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ApplicationListResponse {
        count: applications.len(),
        total,
        total_pages: page.total_pages(total),
        current_page: page.page(),
        applications,
    }))
}

/// GET /api/v1/applications/:id
///
/// Returns the application with its analysis, status history, and HR notes.
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationDetailResponse>, AppError> {
    let application = fetch_application(&state, application_id).await?;

    let status_history = sqlx::query_as::<_, StatusChangeRow>(
        "SELECT * FROM status_changes WHERE application_id = $1 ORDER BY changed_at",
    )
    .bind(application_id)
    .fetch_all(&state.db)
    .await?;

    let hr_notes = sqlx::query_as::<_, HrNoteRow>(
        "SELECT * FROM hr_notes WHERE application_id = $1 ORDER BY added_at",
    )
    .bind(application_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ApplicationDetailResponse {
        application,
        status_history,
        hr_notes,
    }))
}

/// PUT /api/v1/applications/:id/status
///
/// Manual HR transition. The target status must be a known state; the change
/// is appended to status history.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let new_status = req
        .status
        .parse::<ApplicationStatus>()
        .map_err(AppError::Validation)?;

    let application = fetch_application(&state, application_id).await?;
    let updated =
        transition_status(&state, application, new_status, req.changed_by, req.notes).await?;

    Ok(Json(updated))
}

/// PUT /api/v1/applications/:id/withdraw
///
/// Candidate withdrawal. Idempotence is deliberate: withdrawing twice is a
/// conflict, matching the platform's one-way withdrawal rule.
pub async fn handle_withdraw(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationRow>, AppError> {
    let application = fetch_application(&state, application_id).await?;

    if application.status == ApplicationStatus::Withdrawn.as_str() {
        return Err(AppError::Conflict(
            "Application is already withdrawn".to_string(),
        ));
    }

    let updated = transition_status(
        &state,
        application,
        ApplicationStatus::Withdrawn,
        None,
        Some("Withdrawn by candidate".to_string()),
    )
    .await?;

    Ok(Json(updated))
}

/// POST /api/v1/applications/:id/notes
///
/// Adds an HR note (private by default).
pub async fn handle_add_note(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<AddNoteRequest>,
) -> Result<(StatusCode, Json<HrNoteRow>), AppError> {
    if req.note.trim().is_empty() {
        return Err(AppError::Validation("note cannot be empty".to_string()));
    }

    // Ensure the application exists before attaching a note.
    fetch_application(&state, application_id).await?;

    let note = sqlx::query_as::<_, HrNoteRow>(
        r#"
        INSERT INTO hr_notes (id, application_id, note, added_by, is_private, added_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application_id)
    .bind(req.note.trim())
    .bind(req.added_by)
    .bind(req.is_private)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared persistence helpers
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_application(
    state: &AppState,
    application_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(application_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

/// Records the status change in history, updates the row, and keeps the
/// job's shortlist counter in step.
async fn transition_status(
    state: &AppState,
    application: ApplicationRow,
    new_status: ApplicationStatus,
    changed_by: Option<Uuid>,
    notes: Option<String>,
) -> Result<ApplicationRow, AppError> {
    sqlx::query(
        r#"
        INSERT INTO status_changes
            (id, application_id, from_status, to_status, changed_by, notes, changed_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application.id)
    .bind(&application.status)
    .bind(new_status.as_str())
    .bind(changed_by)
    .bind(&notes)
    .execute(&state.db)
    .await?;

    let updated = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(new_status.as_str())
    .bind(application.id)
    .fetch_one(&state.db)
    .await?;

    if new_status == ApplicationStatus::Shortlisted {
        sqlx::query("UPDATE jobs SET shortlisted = shortlisted + 1 WHERE id = $1")
            .bind(application.job_id)
            .execute(&state.db)
            .await?;
    }

    Ok(updated)
}

//! Axum route handlers for the Jobs API.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::job::JobRow;
use crate::pagination::PageParams;
use crate::screening::ScreeningPolicy;
use crate::state::AppState;

const EMPLOYMENT_TYPES: &[&str] = &["full-time", "part-time", "contract", "internship"];

const JOB_STATUSES: &[&str] = &["draft", "active", "paused", "closed", "expired"];

const JOB_CATEGORIES: &[&str] = &[
    "Technology",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "Other",
];

/// Shared filter predicate for the public job listing. Every filter is
/// optional; a NULL bind leaves its clause inert.
const JOB_FILTERS: &str = "\
    status = 'active' \
    AND ($1::text IS NULL \
         OR title ILIKE '%' || $1 || '%' \
         OR description ILIKE '%' || $1 || '%' \
         OR EXISTS (SELECT 1 FROM unnest(required_skills) skill \
                    WHERE skill ILIKE '%' || $1 || '%')) \
    AND ($2::text IS NULL OR category = $2) \
    AND ($3::text IS NULL OR employment_type = $3) \
    AND ($4::uuid IS NULL OR company_id = $4) \
    AND ($5::text IS NULL OR remote \
         OR location_city ILIKE '%' || $5 || '%' \
         OR location_state ILIKE '%' || $5 || '%' \
         OR location_country ILIKE '%' || $5 || '%') \
    AND ($6::float8 IS NULL OR experience_min >= $6) \
    AND ($7::float8 IS NULL OR (experience_max IS NOT NULL AND experience_max <= $7)) \
    AND ($8::bigint IS NULL OR (salary_min IS NOT NULL AND salary_min >= $8)) \
    AND ($9::bigint IS NULL OR (salary_max IS NOT NULL AND salary_max <= $9))";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub company_id: Uuid,
    pub posted_by: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub experience_min: f64,
    pub experience_max: Option<f64>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    #[serde(default)]
    pub remote: bool,
    pub employment_type: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub screening: ScreeningPolicy,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub experience_min: Option<f64>,
    pub experience_max: Option<f64>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    pub remote: Option<bool>,
    pub employment_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub screening: Option<ScreeningPolicy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobFilterParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub employment_type: Option<String>,
    pub company: Option<Uuid>,
    pub location: Option<String>,
    pub experience_min: Option<f64>,
    pub experience_max: Option<f64>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl JobFilterParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyJobsParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl CompanyJobsParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JobApplicationsParams {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl JobApplicationsParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub count: usize,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct JobApplicationsResponse {
    pub applications: Vec<ApplicationRow>,
    pub count: usize,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub status_summary: Vec<StatusCount>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_create_job(req: &CreateJobRequest) -> Result<(), String> {
    if req.title.trim().is_empty() {
        return Err("title cannot be empty".to_string());
    }
    if req.description.trim().is_empty() {
        return Err("description cannot be empty".to_string());
    }
    if req.experience_min < 0.0 {
        return Err("experience_min cannot be negative".to_string());
    }
    if let Some(max) = req.experience_max {
        if max < req.experience_min {
            return Err("experience_max cannot be below experience_min".to_string());
        }
    }
    if let (Some(min), Some(max)) = (req.salary_min, req.salary_max) {
        if max < min {
            return Err("salary_max cannot be below salary_min".to_string());
        }
    }
    if req.screening.minimum_score > 100 {
        return Err("screening minimum_score must be between 0 and 100".to_string());
    }
    if let Some(employment_type) = &req.employment_type {
        if !EMPLOYMENT_TYPES.contains(&employment_type.as_str()) {
            return Err(format!("Unknown employment type '{employment_type}'"));
        }
    }
    if let Some(category) = &req.category {
        if !JOB_CATEGORIES.contains(&category.as_str()) {
            return Err(format!("Unknown category '{category}'"));
        }
    }
    Ok(())
}

/// Overlays the provided update fields onto the stored row.
fn apply_job_update(job: &mut JobRow, req: &UpdateJobRequest) {
    if let Some(title) = &req.title {
        job.title = title.trim().to_string();
    }
    if let Some(description) = &req.description {
        job.description = description.trim().to_string();
    }
    if let Some(skills) = &req.required_skills {
        job.required_skills = skills.clone();
    }
    if let Some(min) = req.experience_min {
        job.experience_min = min;
    }
    if let Some(max) = req.experience_max {
        job.experience_max = Some(max);
    }
    if let Some(min) = req.salary_min {
        job.salary_min = Some(min);
    }
    if let Some(max) = req.salary_max {
        job.salary_max = Some(max);
    }
    if let Some(currency) = &req.salary_currency {
        job.salary_currency = currency.clone();
    }
    if let Some(city) = &req.location_city {
        job.location_city = Some(city.clone());
    }
    if let Some(state) = &req.location_state {
        job.location_state = Some(state.clone());
    }
    if let Some(country) = &req.location_country {
        job.location_country = Some(country.clone());
    }
    if let Some(remote) = req.remote {
        job.remote = remote;
    }
    if let Some(employment_type) = &req.employment_type {
        job.employment_type = employment_type.clone();
    }
    if let Some(category) = &req.category {
        job.category = category.clone();
    }
    if let Some(status) = &req.status {
        job.status = status.clone();
    }
    if let Some(policy) = &req.screening {
        job.screening_enabled = policy.enabled;
        job.screening_minimum_score = policy.minimum_score as i16;
        job.screening_auto_shortlist = policy.auto_shortlist;
    }
}

/// Validates a job row after an update has been overlaid onto it, so that
/// cross-field rules see the merged values rather than the patch alone.
fn validate_job_update(job: &JobRow) -> Result<(), String> {
    if job.title.is_empty() {
        return Err("title cannot be empty".to_string());
    }
    if job.description.is_empty() {
        return Err("description cannot be empty".to_string());
    }
    if job.experience_min < 0.0 {
        return Err("experience_min cannot be negative".to_string());
    }
    if let Some(max) = job.experience_max {
        if max < job.experience_min {
            return Err("experience_max cannot be below experience_min".to_string());
        }
    }
    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        if max < min {
            return Err("salary_max cannot be below salary_min".to_string());
        }
    }
    if !EMPLOYMENT_TYPES.contains(&job.employment_type.as_str()) {
        return Err(format!("Unknown employment type '{}'", job.employment_type));
    }
    if !JOB_CATEGORIES.contains(&job.category.as_str()) {
        return Err(format!("Unknown category '{}'", job.category));
    }
    if !JOB_STATUSES.contains(&job.status.as_str()) {
        return Err(format!("Unknown job status '{}'", job.status));
    }
    if !(0..=100).contains(&job.screening_minimum_score) {
        return Err("screening minimum_score must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Resolves the sort option for a job's application listing into an ORDER BY
/// clause. The column set is a fixed allowlist; the sort option never reaches
/// the SQL text directly.
fn application_sort_clause(sort_by: Option<&str>, order: Option<&str>) -> Result<String, String> {
    let column = match sort_by.unwrap_or("created_at") {
        "created_at" => "created_at",
        "overall_score" => "overall_score",
        other => return Err(format!("Cannot sort applications by '{other}'")),
    };
    let direction = match order.unwrap_or("desc") {
        "asc" => "ASC",
        "desc" => "DESC",
        other => return Err(format!("Unknown sort order '{other}'")),
    };
    Ok(format!("{column} {direction}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
///
/// Creates an active job posting with its AI screening policy.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    validate_create_job(&req).map_err(AppError::Validation)?;

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, company_id, posted_by, title, description, required_skills,
             experience_min, experience_max, salary_min, salary_max, salary_currency,
             location_city, location_state, location_country, remote, employment_type,
             category, status, screening_enabled, screening_minimum_score,
             screening_auto_shortlist, views, applications, shortlisted,
             created_at, updated_at)
        VALUES
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
             $12, $13, $14, $15, $16, $17, 'active', $18, $19, $20, 0, 0, 0, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.company_id)
    .bind(req.posted_by)
    .bind(req.title.trim())
    .bind(req.description.trim())
    .bind(&req.required_skills)
    .bind(req.experience_min)
    .bind(req.experience_max)
    .bind(req.salary_min)
    .bind(req.salary_max)
    .bind(req.salary_currency.as_deref().unwrap_or("INR"))
    .bind(&req.location_city)
    .bind(&req.location_state)
    .bind(&req.location_country)
    .bind(req.remote)
    .bind(req.employment_type.as_deref().unwrap_or("full-time"))
    .bind(req.category.as_deref().unwrap_or("Technology"))
    .bind(req.screening.enabled)
    .bind(req.screening.minimum_score as i16)
    .bind(req.screening.auto_shortlist)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
///
/// Lists active jobs, newest first, paginated. Supports optional filters:
/// `search` (title, description, skills), `category`, `employment_type`,
/// `company`, `location` (remote jobs always match), `experience_min`,
/// `experience_max`, `salary_min` and `salary_max`.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobFilterParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let page = params.page_params();

    let list_sql = format!(
        "SELECT * FROM jobs WHERE {JOB_FILTERS} ORDER BY created_at DESC LIMIT $10 OFFSET $11"
    );
    let jobs = sqlx::query_as::<_, JobRow>(&list_sql)
        .bind(&params.search)
        .bind(&params.category)
        .bind(&params.employment_type)
        .bind(params.company)
        .bind(&params.location)
        .bind(params.experience_min)
        .bind(params.experience_max)
        .bind(params.salary_min)
        .bind(params.salary_max)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&state.db)
        .await?;

    let count_sql = format!("SELECT COUNT(*) FROM jobs WHERE {JOB_FILTERS}");
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(&params.search)
        .bind(&params.category)
        .bind(&params.employment_type)
        .bind(params.company)
        .bind(&params.location)
        .bind(params.experience_min)
        .bind(params.experience_max)
        .bind(params.salary_min)
        .bind(params.salary_max)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(JobListResponse {
        count: jobs.len(),
        total,
        total_pages: page.total_pages(total),
        current_page: page.page(),
        jobs,
    }))
}

/// GET /api/v1/jobs/:id
///
/// Returns a job posting and bumps its view counter.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = sqlx::query_as::<_, JobRow>(
        "UPDATE jobs SET views = views + 1 WHERE id = $1 RETURNING *",
    )
    .bind(job_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
///
/// Partially updates a job posting. Setting `status` to `closed` is how a
/// posting is taken off the board while keeping its applications.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    let mut job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    apply_job_update(&mut job, &req);
    validate_job_update(&job).map_err(AppError::Validation)?;

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            title = $2, description = $3, required_skills = $4,
            experience_min = $5, experience_max = $6,
            salary_min = $7, salary_max = $8, salary_currency = $9,
            location_city = $10, location_state = $11, location_country = $12,
            remote = $13, employment_type = $14, category = $15, status = $16,
            screening_enabled = $17, screening_minimum_score = $18,
            screening_auto_shortlist = $19, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.required_skills)
    .bind(job.experience_min)
    .bind(job.experience_max)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.salary_currency)
    .bind(&job.location_city)
    .bind(&job.location_state)
    .bind(&job.location_country)
    .bind(job.remote)
    .bind(&job.employment_type)
    .bind(&job.category)
    .bind(&job.status)
    .bind(job.screening_enabled)
    .bind(job.screening_minimum_score)
    .bind(job.screening_auto_shortlist)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
///
/// Hard-deletes a posting. A job that has received applications cannot be
/// deleted; it should be closed via PUT instead so the applications keep
/// their history.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<DeleteJobResponse>, AppError> {
    let received: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(&state.db)
        .await?;
    if received > 0 {
        return Err(AppError::Conflict(
            "Job has applications and cannot be deleted; close it instead".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    Ok(Json(DeleteJobResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

/// GET /api/v1/jobs/company/:company_id
///
/// Lists a company's own postings across all statuses, with optional
/// `status` and `search` filters.
pub async fn handle_company_jobs(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(params): Query<CompanyJobsParams>,
) -> Result<Json<JobListResponse>, AppError> {
    if let Some(status) = &params.status {
        if !JOB_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!("Unknown job status '{status}'")));
        }
    }
    let page = params.page_params();

    let jobs = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT * FROM jobs
        WHERE company_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL
               OR title ILIKE '%' || $3 || '%'
               OR description ILIKE '%' || $3 || '%')
        ORDER BY created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(company_id)
    .bind(&params.status)
    .bind(&params.search)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&state.db)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM jobs
        WHERE company_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL
               OR title ILIKE '%' || $3 || '%'
               OR description ILIKE '%' || $3 || '%')
        "#,
    )
    .bind(company_id)
    .bind(&params.status)
    .bind(&params.search)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(JobListResponse {
        count: jobs.len(),
        total,
        total_pages: page.total_pages(total),
        current_page: page.page(),
        jobs,
    }))
}

/// GET /api/v1/jobs/:id/applications
///
/// Lists the applications a posting has received, for HR review. Supports a
/// `status` filter and sorting by `created_at` (default) or `overall_score`,
/// and includes a per-status count summary for the whole posting.
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<JobApplicationsParams>,
) -> Result<Json<JobApplicationsResponse>, AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let status_filter = match &params.status {
        Some(raw) => Some(
            ApplicationStatus::from_str(raw)
                .map_err(AppError::Validation)?
                .as_str()
                .to_string(),
        ),
        None => None,
    };
    let order_clause = application_sort_clause(params.sort_by.as_deref(), params.order.as_deref())
        .map_err(AppError::Validation)?;
    let page = params.page_params();

    let list_sql = format!(
        "SELECT * FROM applications \
         WHERE job_id = $1 AND ($2::text IS NULL OR status = $2) \
         ORDER BY {order_clause} LIMIT $3 OFFSET $4"
    );
    let applications = sqlx::query_as::<_, ApplicationRow>(&list_sql)
        .bind(job_id)
        .bind(&status_filter)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&state.db)
        .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE job_id = $1 AND ($2::text IS NULL OR status = $2)",
    )
    .bind(job_id)
    .bind(&status_filter)
    .fetch_one(&state.db)
    .await?;

    let status_summary: Vec<StatusCount> = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM applications WHERE job_id = $1 GROUP BY status",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(status, count)| StatusCount { status, count })
    .collect();

    Ok(Json(JobApplicationsResponse {
        count: applications.len(),
        total,
        total_pages: page.total_pages(total),
        current_page: page.page(),
        applications,
        status_summary,
    }))
}

/// GET /api/v1/jobs/categories
///
/// Returns the distinct categories currently in use across postings.
pub async fn handle_get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT category FROM jobs ORDER BY category")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(CategoryListResponse { categories }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request() -> CreateJobRequest {
        CreateJobRequest {
            company_id: Uuid::new_v4(),
            posted_by: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            description: "Own the pipelines.".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            experience_min: 2.0,
            experience_max: Some(6.0),
            salary_min: Some(900_000),
            salary_max: Some(1_800_000),
            salary_currency: None,
            location_city: None,
            location_state: None,
            location_country: None,
            remote: true,
            employment_type: Some("full-time".to_string()),
            category: Some("Technology".to_string()),
            screening: ScreeningPolicy::default(),
        }
    }

    fn stored_job() -> JobRow {
        let now = Utc::now();
        JobRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            posted_by: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            description: "Own the pipelines.".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            experience_min: 2.0,
            experience_max: Some(6.0),
            salary_min: Some(900_000),
            salary_max: Some(1_800_000),
            salary_currency: "INR".to_string(),
            location_city: Some("Pune".to_string()),
            location_state: Some("Maharashtra".to_string()),
            location_country: Some("India".to_string()),
            remote: false,
            employment_type: "full-time".to_string(),
            category: "Technology".to_string(),
            status: "active".to_string(),
            screening_enabled: true,
            screening_minimum_score: 60,
            screening_auto_shortlist: false,
            views: 0,
            applications: 0,
            shortlisted: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_create_job(&request()).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut req = request();
        req.title = "   ".to_string();
        assert!(validate_create_job(&req).is_err());
    }

    #[test]
    fn test_inverted_experience_range_rejected() {
        let mut req = request();
        req.experience_max = Some(1.0);
        assert!(validate_create_job(&req).is_err());
    }

    #[test]
    fn test_inverted_salary_range_rejected() {
        let mut req = request();
        req.salary_max = Some(100);
        assert!(validate_create_job(&req).is_err());
    }

    #[test]
    fn test_unknown_employment_type_rejected() {
        let mut req = request();
        req.employment_type = Some("gig".to_string());
        assert!(validate_create_job(&req).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut req = request();
        req.category = Some("Astrology".to_string());
        assert!(validate_create_job(&req).is_err());
    }

    #[test]
    fn test_missing_experience_max_allowed() {
        let mut req = request();
        req.experience_max = None;
        assert!(validate_create_job(&req).is_ok());
    }

    #[test]
    fn test_update_overlays_only_provided_fields() {
        let mut job = stored_job();
        let update = UpdateJobRequest {
            title: Some("  Senior Data Engineer  ".to_string()),
            status: Some("closed".to_string()),
            ..UpdateJobRequest::default()
        };
        apply_job_update(&mut job, &update);
        assert_eq!(job.title, "Senior Data Engineer");
        assert_eq!(job.status, "closed");
        assert_eq!(job.description, "Own the pipelines.");
        assert_eq!(job.experience_min, 2.0);
        assert!(validate_job_update(&job).is_ok());
    }

    #[test]
    fn test_update_screening_policy_overlays_all_three_fields() {
        let mut job = stored_job();
        let update = UpdateJobRequest {
            screening: Some(ScreeningPolicy {
                enabled: true,
                auto_shortlist: true,
                minimum_score: 75,
            }),
            ..UpdateJobRequest::default()
        };
        apply_job_update(&mut job, &update);
        assert!(job.screening_auto_shortlist);
        assert_eq!(job.screening_minimum_score, 75);
    }

    #[test]
    fn test_update_validates_merged_experience_range() {
        let mut job = stored_job();
        let update = UpdateJobRequest {
            experience_max: Some(1.0),
            ..UpdateJobRequest::default()
        };
        apply_job_update(&mut job, &update);
        assert!(validate_job_update(&job).is_err());
    }

    #[test]
    fn test_update_rejects_unknown_status() {
        let mut job = stored_job();
        let update = UpdateJobRequest {
            status: Some("archived".to_string()),
            ..UpdateJobRequest::default()
        };
        apply_job_update(&mut job, &update);
        assert!(validate_job_update(&job).is_err());
    }

    #[test]
    fn test_sort_clause_defaults_to_newest_first() {
        assert_eq!(
            application_sort_clause(None, None).unwrap(),
            "created_at DESC"
        );
    }

    #[test]
    fn test_sort_clause_supports_score_ascending() {
        assert_eq!(
            application_sort_clause(Some("overall_score"), Some("asc")).unwrap(),
            "overall_score ASC"
        );
    }

    #[test]
    fn test_sort_clause_rejects_unlisted_column() {
        assert!(application_sort_clause(Some("resume_size"), None).is_err());
        assert!(application_sort_clause(Some("created_at"), Some("sideways")).is_err());
    }
}

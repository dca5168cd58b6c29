use std::sync::Arc;

use sqlx::PgPool;

use crate::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::screening::SkillMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Resume extraction client. Trait object so tests can stub the AI service.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Pluggable per-pair skill comparison. Default: ContainmentMatcher.
    pub skill_matcher: Arc<dyn SkillMatcher>,
}

//! Candidate Scoring & Shortlisting Engine.
//!
//! Pure and synchronous: no I/O, no shared state, total over its input
//! domain. The apply handler supplies safe defaults (empty skills, zero
//! years) when resume analysis fails upstream, so scoring itself can never
//! fail — degrade the inputs, never the scoring function.

pub mod experience;
pub mod policy;
pub mod recommend;
pub mod skills;

pub use experience::{match_experience, ExperienceRequirement};
pub use policy::{decide_shortlist, ScreeningPolicy, ShortlistDecision};
pub use recommend::{build_score_bundle, ScoreBundle};
pub use skills::{match_skills, ContainmentMatcher, SkillMatcher};

/// Runs the three stages end to end: skill match, experience match, then
/// aggregation with recommendation text. The shortlist decision is a
/// separate call because the caller owns the status transition.
pub fn score_candidate(
    matcher: &dyn SkillMatcher,
    candidate_skills: &[String],
    candidate_years: f64,
    required_skills: &[String],
    requirement: &ExperienceRequirement,
) -> ScoreBundle {
    let skill_match = match_skills(matcher, candidate_skills, required_skills);
    let experience_match = match_experience(candidate_years, requirement);
    build_score_bundle(skill_match, experience_match)
}

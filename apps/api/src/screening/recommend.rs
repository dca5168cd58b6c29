//! Score aggregation and recommendation text.
//!
//! Combines the skill and experience percentages into an overall score and
//! generates the human-readable recommendation lines HR sees on an
//! application.

use serde::{Deserialize, Serialize};

/// The engine's output for one scored application. Immutable once produced;
/// the apply handler embeds these fields into the application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub skill_match: u8,
    pub experience_match: u8,
    /// round((skill_match + experience_match) / 2), half-up.
    pub overall_score: u8,
    pub recommendations: Vec<String>,
}

/// Builds the full score bundle from the two stage percentages.
pub fn build_score_bundle(skill_match: u8, experience_match: u8) -> ScoreBundle {
    let mean = (skill_match as f64 + experience_match as f64) / 2.0;
    ScoreBundle {
        skill_match,
        experience_match,
        overall_score: mean.round() as u8,
        recommendations: build_recommendations(skill_match, experience_match, mean),
    }
}

/// Recommendation lines, in order. Skill and experience lines are emitted for
/// the low (<60) and high (≥80) bands; the [60, 80) band is deliberately
/// silent. Exactly one closing line is always emitted, banded on the
/// unrounded mean.
fn build_recommendations(skill_match: u8, experience_match: u8, overall: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if skill_match < 60 {
        recommendations.push(format!(
            "Candidate has {skill_match}% skill match. Consider skills assessment."
        ));
    } else if skill_match >= 80 {
        recommendations.push(format!(
            "Excellent skill match ({skill_match}%). Strong technical fit."
        ));
    }

    if experience_match < 60 {
        recommendations.push(format!(
            "Experience match is {experience_match}%. May need additional training."
        ));
    } else if experience_match >= 80 {
        recommendations.push(format!(
            "Great experience match ({experience_match}%). Good fit for the role."
        ));
    }

    if overall >= 75.0 {
        recommendations.push("Highly recommended candidate for interview.".to_string());
    } else if overall >= 60.0 {
        recommendations.push("Good candidate, consider for next round.".to_string());
    } else {
        recommendations.push("May not be the best fit for this role.".to_string());
    }

    recommendations
}

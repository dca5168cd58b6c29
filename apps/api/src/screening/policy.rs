//! Shortlist policy — decides whether scoring auto-advances an application.
//!
//! Evaluated exactly once, immediately after scoring. The only transition
//! the engine ever triggers is `applied → shortlisted`; everything else is
//! a manual HR action.

use serde::{Deserialize, Serialize};

/// Per-job AI screening configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    pub enabled: bool,
    pub auto_shortlist: bool,
    pub minimum_score: u8,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_shortlist: false,
            minimum_score: 60,
        }
    }
}

/// Outcome of the shortlist policy for one application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistDecision {
    pub shortlist: bool,
    pub reason: String,
}

/// Shortlists iff screening is enabled, auto-shortlist is on, and the overall
/// score meets the policy minimum. Otherwise the application stays in its
/// initial state pending manual review.
pub fn decide_shortlist(overall_score: u8, policy: &ScreeningPolicy) -> ShortlistDecision {
    if !policy.enabled {
        return ShortlistDecision {
            shortlist: false,
            reason: "AI screening is disabled for this job".to_string(),
        };
    }
    if !policy.auto_shortlist {
        return ShortlistDecision {
            shortlist: false,
            reason: "Auto-shortlist is disabled; awaiting manual review".to_string(),
        };
    }
    if overall_score < policy.minimum_score {
        return ShortlistDecision {
            shortlist: false,
            reason: format!(
                "Overall score {overall_score} is below the minimum of {}",
                policy.minimum_score
            ),
        };
    }
    ShortlistDecision {
        shortlist: true,
        reason: "Auto-shortlisted by AI screening".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(enabled: bool, auto_shortlist: bool, minimum_score: u8) -> ScreeningPolicy {
        ScreeningPolicy {
            enabled,
            auto_shortlist,
            minimum_score,
        }
    }

    #[test]
    fn test_shortlists_when_all_conditions_hold() {
        let decision = decide_shortlist(65, &policy(true, true, 60));
        assert!(decision.shortlist);
        assert_eq!(decision.reason, "Auto-shortlisted by AI screening");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(decide_shortlist(60, &policy(true, true, 60)).shortlist);
        assert!(!decide_shortlist(59, &policy(true, true, 60)).shortlist);
    }

    #[test]
    fn test_disabled_screening_never_shortlists() {
        let decision = decide_shortlist(100, &policy(false, true, 0));
        assert!(!decision.shortlist);
        assert!(decision.reason.contains("disabled"));
    }

    #[test]
    fn test_manual_review_when_auto_shortlist_off() {
        let decision = decide_shortlist(100, &policy(true, false, 0));
        assert!(!decision.shortlist);
        assert!(decision.reason.contains("manual review"));
    }

    #[test]
    fn test_below_minimum_reports_both_scores() {
        let decision = decide_shortlist(55, &policy(true, true, 70));
        assert!(!decision.shortlist);
        assert!(decision.reason.contains("55"));
        assert!(decision.reason.contains("70"));
    }

    #[test]
    fn test_default_policy_requires_manual_shortlisting() {
        let decision = decide_shortlist(100, &ScreeningPolicy::default());
        assert!(!decision.shortlist);
    }
}

//! Experience Matcher — fits a candidate's estimated years against a job's
//! declared range. Under-qualification scales linearly to zero;
//! over-qualification is penalized per year with a floor.

use serde::{Deserialize, Serialize};

/// When a job declares a minimum but no maximum, the acceptable window
/// extends this many years above the minimum.
pub const DEFAULT_WINDOW_YEARS: f64 = 5.0;

/// Points deducted per year of experience beyond the acceptable maximum.
pub const OVERQUALIFIED_PENALTY_PER_YEAR: f64 = 5.0;

/// Over-qualification never scores below this.
pub const OVERQUALIFIED_FLOOR: u8 = 80;

/// A job's acceptable experience range in years. `max` is optional; when
/// absent the effective maximum is `min + DEFAULT_WINDOW_YEARS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub min: f64,
    pub max: Option<f64>,
}

impl ExperienceRequirement {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    fn effective_max(&self) -> f64 {
        self.max.unwrap_or(self.min + DEFAULT_WINDOW_YEARS)
    }
}

/// Computes the experience match percentage.
///
/// Precedence matters: a zero minimum short-circuits to 100 before any
/// boundary arithmetic, so a candidate with 0 years against `min = 0`
/// scores 100 rather than landing on the lower boundary.
pub fn match_experience(candidate_years: f64, requirement: &ExperienceRequirement) -> u8 {
    if requirement.min == 0.0 {
        return 100;
    }

    let max_required = requirement.effective_max();

    if candidate_years >= requirement.min && candidate_years <= max_required {
        100
    } else if candidate_years < requirement.min {
        let scaled = (100.0 * candidate_years / requirement.min).round();
        scaled.max(0.0) as u8
    } else {
        let over_by = candidate_years - max_required;
        let penalized = (100.0 - over_by * OVERQUALIFIED_PENALTY_PER_YEAR).round();
        penalized.max(OVERQUALIFIED_FLOOR as f64) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_minimum_is_full_match() {
        let req = ExperienceRequirement::new(0.0, None);
        assert_eq!(match_experience(0.0, &req), 100);
        assert_eq!(match_experience(3.0, &req), 100);
        assert_eq!(match_experience(40.0, &req), 100);
    }

    #[test]
    fn test_within_range_is_full_match() {
        let req = ExperienceRequirement::new(2.0, Some(5.0));
        assert_eq!(match_experience(3.0, &req), 100);
        // boundaries are inclusive
        assert_eq!(match_experience(2.0, &req), 100);
        assert_eq!(match_experience(5.0, &req), 100);
    }

    #[test]
    fn test_underqualified_scales_linearly() {
        // No max given → window is [4, 9]; 1 < 4 → round(100 × 1/4) = 25
        let req = ExperienceRequirement::new(4.0, None);
        assert_eq!(match_experience(1.0, &req), 25);
        assert_eq!(match_experience(0.0, &req), 0);
    }

    #[test]
    fn test_default_window_extends_five_years() {
        let req = ExperienceRequirement::new(4.0, None);
        // 9 years sits on the default window's upper boundary
        assert_eq!(match_experience(9.0, &req), 100);
        // one year beyond it → 95
        assert_eq!(match_experience(10.0, &req), 95);
    }

    #[test]
    fn test_overqualified_penalty_per_year() {
        let req = ExperienceRequirement::new(4.0, Some(8.0));
        // over by 1 year → 100 − 5 = 95
        assert_eq!(match_experience(9.0, &req), 95);
        // over by 4 years → 100 − 20 = 80, floor reached exactly
        assert_eq!(match_experience(12.0, &req), 80);
    }

    #[test]
    fn test_overqualified_never_below_floor() {
        let req = ExperienceRequirement::new(4.0, Some(8.0));
        assert_eq!(match_experience(30.0, &req), OVERQUALIFIED_FLOOR);
    }

    #[test]
    fn test_fractional_years_from_role_estimates() {
        // 3 roles × 1.5 years = 4.5, inside [2, 6]
        let req = ExperienceRequirement::new(2.0, Some(6.0));
        assert_eq!(match_experience(4.5, &req), 100);
    }

    #[test]
    fn test_negative_years_clamp_to_zero() {
        // Not rejected, just coerced through the under-qualified branch.
        let req = ExperienceRequirement::new(4.0, None);
        assert_eq!(match_experience(-1.0, &req), 0);
    }
}

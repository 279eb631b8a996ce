use crate::models::{AchievementProfile, ScoreWeights};

/// InCoScore calculator
///
/// Scoring formula:
/// score = (
///     hackathons * 10 +
///     internships * 15 +
///     research_papers * 20 +
///     coding_score * 0.5 +
///     competition_wins * 12
/// )
///
/// rounded to two decimals, ties to even.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Compute the InCoScore for a profile
    ///
    /// Total over all inputs; negative counters are not rejected here.
    pub fn compute_score(&self, profile: &AchievementProfile) -> f64 {
        let w = &self.weights;
        let raw = profile.hackathons as f64 * w.hackathons
            + profile.internships as f64 * w.internships
            + profile.research_papers as f64 * w.research_papers
            + profile.coding_score * w.coding_score
            + profile.competition_wins as f64 * w.competition_wins;

        round_to_cents(raw)
    }
}

/// Compute the InCoScore with the default weights
#[inline]
pub fn compute_score(profile: &AchievementProfile) -> f64 {
    Scorer::default().compute_score(profile)
}

/// Round to two decimal places, ties to even
#[inline]
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(h: i32, i: i32, r: i32, c: f64, w: i32) -> AchievementProfile {
        AchievementProfile {
            hackathons: h,
            internships: i,
            research_papers: r,
            coding_score: c,
            competition_wins: w,
        }
    }

    #[test]
    fn test_reference_profile() {
        let score = compute_score(&profile(2, 1, 0, 80.0, 1));
        assert_eq!(score, 87.0);
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(compute_score(&AchievementProfile::default()), 0.0);
    }

    #[test]
    fn test_each_weight() {
        assert_eq!(compute_score(&profile(1, 0, 0, 0.0, 0)), 10.0);
        assert_eq!(compute_score(&profile(0, 1, 0, 0.0, 0)), 15.0);
        assert_eq!(compute_score(&profile(0, 0, 1, 0.0, 0)), 20.0);
        assert_eq!(compute_score(&profile(0, 0, 0, 1.0, 0)), 0.5);
        assert_eq!(compute_score(&profile(0, 0, 0, 0.0, 1)), 12.0);
    }

    #[test]
    fn test_half_cent_rounds_to_even() {
        // 0.25 * 0.5 = 0.125 exactly; half-away-from-zero would give 0.13
        assert_eq!(compute_score(&profile(0, 0, 0, 0.25, 0)), 0.12);
        // 0.75 * 0.5 = 0.375 exactly; even neighbour is 0.38
        assert_eq!(compute_score(&profile(0, 0, 0, 0.75, 0)), 0.38);
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        assert_eq!(compute_score(&profile(-1, 0, 0, 0.0, 0)), -10.0);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = Scorer::new(ScoreWeights {
            hackathons: 1.0,
            internships: 1.0,
            research_papers: 1.0,
            coding_score: 1.0,
            competition_wins: 1.0,
        });
        assert_eq!(scorer.compute_score(&profile(1, 2, 3, 4.5, 5)), 15.5);
    }
}

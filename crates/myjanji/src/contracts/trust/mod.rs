mod presenter;

pub use presenter::{format_trust_score, TierColors, TrustBadge, TrustTier};

use presenter::round_to_cents;

use serde::{Deserialize, Serialize};
use std::fmt;

use super::stats::ContractStats;

/// Linear bonus/penalty model mapping contract outcomes to a trust score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustModel {
    pub baseline: f64,
    pub completed_weight: f64,
    pub completed_cap: f64,
    pub expired_penalty: f64,
    pub breached_penalty: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl TrustModel {
    pub const fn standard() -> Self {
        Self {
            baseline: 3.0,
            completed_weight: 0.3,
            completed_cap: 2.0,
            expired_penalty: 0.2,
            breached_penalty: 0.5,
            floor: 0.0,
            ceiling: 5.0,
        }
    }

    /// Score a user's contract history.
    ///
    /// Users without contracts sit at the baseline. Otherwise the completed
    /// bonus (capped) is added, then expiry and breach penalties are
    /// subtracted, and the result is clamped and rounded to two decimals.
    pub fn score(&self, stats: &ContractStats) -> TrustScore {
        if stats.total == 0 {
            return TrustScore(self.baseline);
        }

        let bonus = (f64::from(stats.completed) * self.completed_weight).min(self.completed_cap);
        let mut raw = self.baseline + bonus;
        raw -= f64::from(stats.expired) * self.expired_penalty;
        raw -= f64::from(stats.breached) * self.breached_penalty;

        TrustScore::bounded(raw, self.floor, self.ceiling)
    }

    /// Score and build the display badge in one step.
    pub fn assess(&self, stats: ContractStats) -> TrustAssessment {
        let score = self.score(&stats);
        TrustAssessment {
            stats,
            score,
            badge: TrustBadge::for_score(score.value()),
        }
    }
}

impl Default for TrustModel {
    fn default() -> Self {
        Self::standard()
    }
}

/// Score on the `[0.00, 5.00]` scale, always on a two-decimal grid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TrustScore(f64);

impl TrustScore {
    pub const NEUTRAL: TrustScore = TrustScore(3.0);

    fn bounded(raw: f64, floor: f64, ceiling: f64) -> Self {
        Self(round_to_cents(raw.clamp(floor, ceiling)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn tier(self) -> TrustTier {
        TrustTier::from_score(self.0)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_trust_score(self.0))
    }
}

/// Stats, score, and badge for a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustAssessment {
    pub stats: ContractStats,
    pub score: TrustScore,
    pub badge: TrustBadge,
}

/// Score with the standard model.
pub fn calculate_trust_score(stats: &ContractStats) -> TrustScore {
    TrustModel::standard().score(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_two_decimals() {
        let score = TrustScore::bounded(3.7000000000000006, 0.0, 5.0);
        assert_eq!(score.value(), 3.7);

        let score = TrustScore::bounded(2.345, 0.0, 5.0);
        assert_eq!(score.to_string().len(), 4);
    }

    #[test]
    fn bounded_clamps_before_rounding() {
        assert_eq!(TrustScore::bounded(-1.25, 0.0, 5.0).value(), 0.0);
        assert_eq!(TrustScore::bounded(5.004, 0.0, 5.0).value(), 5.0);
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        assert_eq!(TrustScore::bounded(0.125, 0.0, 5.0).value(), 0.13);
        assert_eq!(TrustScore::bounded(0.375, 0.0, 5.0).value(), 0.38);
    }

    #[test]
    fn score_serializes_as_plain_number() {
        let json = serde_json::to_string(&TrustScore::NEUTRAL).expect("serialize");
        assert_eq!(json, "3.0");
    }
}

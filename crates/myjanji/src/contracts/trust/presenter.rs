use serde::{Deserialize, Serialize};
use std::fmt;

/// Display bucket for a trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustTier {
    Low,
    Medium,
    High,
}

impl TrustTier {
    /// Lower bounds are inclusive: 2.00 is Medium and 4.00 is High.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            TrustTier::High
        } else if score >= 2.0 {
            TrustTier::Medium
        } else {
            TrustTier::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrustTier::Low => "Low Trust",
            TrustTier::Medium => "Medium Trust",
            TrustTier::High => "High Trust",
        }
    }

    pub const fn colors(self) -> TierColors {
        match self {
            TrustTier::Low => TierColors {
                background: "#fee2e2",
                foreground: "#991b1b",
            },
            TrustTier::Medium => TierColors {
                background: "#fef9c3",
                foreground: "#854d0e",
            },
            TrustTier::High => TierColors {
                background: "#dcfce7",
                foreground: "#166534",
            },
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Everything a client needs to render a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustBadge {
    pub tier: TrustTier,
    pub label: &'static str,
    pub colors: TierColors,
    pub display: String,
}

impl TrustBadge {
    /// Tier and display are both taken from the score rounded to cents.
    pub fn for_score(score: f64) -> Self {
        let rounded = round_to_cents(score);
        let tier = TrustTier::from_score(rounded);
        Self {
            tier,
            label: tier.label(),
            colors: tier.colors(),
            display: format!("{rounded:.2}"),
        }
    }
}

pub fn format_trust_score(score: f64) -> String {
    format!("{:.2}", round_to_cents(score))
}

/// Rounds half away from zero; `{:.2}` alone rounds exact ties to even.
pub(crate) fn round_to_cents(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_switch_at_inclusive_lower_bounds() {
        assert_eq!(TrustTier::from_score(0.0), TrustTier::Low);
        assert_eq!(TrustTier::from_score(1.99), TrustTier::Low);
        assert_eq!(TrustTier::from_score(2.0), TrustTier::Medium);
        assert_eq!(TrustTier::from_score(3.99), TrustTier::Medium);
        assert_eq!(TrustTier::from_score(4.0), TrustTier::High);
        assert_eq!(TrustTier::from_score(5.0), TrustTier::High);
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_trust_score(3.0), "3.00");
        assert_eq!(format_trust_score(4.5), "4.50");
        assert_eq!(format_trust_score(0.0), "0.00");
    }

    #[test]
    fn formatting_rounds_midpoints_away_from_zero() {
        assert_eq!(format_trust_score(0.125), "0.13");
        assert_eq!(format_trust_score(2.375), "2.38");
        assert_eq!(format_trust_score(4.625), "4.63");
    }

    #[test]
    fn badge_tier_follows_displayed_score() {
        let medium = TrustBadge::for_score(1.999);
        assert_eq!(medium.display, "2.00");
        assert_eq!(medium.tier, TrustTier::Medium);

        let high = TrustBadge::for_score(3.996);
        assert_eq!(high.display, "4.00");
        assert_eq!(high.tier, TrustTier::High);
        assert_eq!(high.label, "High Trust");
    }

    #[test]
    fn badge_carries_label_and_colors() {
        let badge = TrustBadge::for_score(1.5);
        assert_eq!(badge.tier, TrustTier::Low);
        assert_eq!(badge.label, "Low Trust");
        assert_eq!(badge.display, "1.50");
        assert_ne!(
            TrustTier::Low.colors().background,
            TrustTier::High.colors().background
        );
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&TrustTier::Medium).expect("serialize");
        assert_eq!(json, "\"medium\"");
    }
}

mod allocation;
mod contribution;
mod engine;
mod error;
mod health;
mod types;

pub use allocation::{AllocationDraft, allocate, draft_allocation};
pub use contribution::{ContributionPlan, plan_contribution};
pub use engine::{MAX_AMOUNT, build_recommendation, emergency_fund_months, recommend};
pub use error::EngineError;
pub use health::{FixedJitter, RandomJitter, ScoreJitter, health_score};
pub use types::{
    Allocation, AssetClass, ContributionBreakdown, InvestmentGoal, InvestmentHorizon, Profile,
    Recommendation, RiskTolerance,
};

/// Rounds half-way cases towards positive infinity, so `12.5 -> 13` and
/// `-2.5 -> -2`.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn round_half_up_breaks_ties_upwards() {
        assert_eq!(round_half_up(12.5), 13.0);
        assert_eq!(round_half_up(61.5), 62.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(round_half_up(0.49), 0.0);
    }
}

use super::round_half_up;
use super::types::{Allocation, AssetClass, ContributionBreakdown};

/// Share of the monthly surplus recommended for investing.
const SURPLUS_SHARE: f64 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContributionPlan {
    pub monthly_surplus: f64,
    pub recommended_contribution: i64,
    pub breakdown: ContributionBreakdown,
}

fn largest_class(allocation: &Allocation) -> AssetClass {
    let mut largest = AssetClass::Equity;
    for class in AssetClass::ALL {
        if allocation.percent(class) > allocation.percent(largest) {
            largest = class;
        }
    }
    largest
}

/// Splits half of the monthly surplus across the allocation.
///
/// Each bucket is rounded on its own; whatever the rounding leaves over is
/// folded into the bucket with the largest share, so the buckets always sum
/// to `recommended_contribution`. A negative surplus yields a negative plan.
pub fn plan_contribution(income: f64, expenses: f64, allocation: &Allocation) -> ContributionPlan {
    let monthly_surplus = income - expenses;
    let recommended_contribution = round_half_up(monthly_surplus * SURPLUS_SHARE) as i64;

    let mut breakdown = ContributionBreakdown::default();
    for class in AssetClass::ALL {
        let share = recommended_contribution as f64 * f64::from(allocation.percent(class)) / 100.0;
        *breakdown.amount_mut(class) = round_half_up(share) as i64;
    }

    let residue = recommended_contribution - breakdown.total();
    if residue != 0 {
        *breakdown.amount_mut(largest_class(allocation)) += residue;
    }

    ContributionPlan {
        monthly_surplus,
        recommended_contribution,
        breakdown,
    }
}

use tracing::debug;

use super::allocation::allocate;
use super::contribution::plan_contribution;
use super::health::{RandomJitter, ScoreJitter, health_score};
use super::types::{Profile, Recommendation};
use super::{EngineError, round_half_up};

const INSURANCE_YEARS_OF_INCOME: f64 = 10.0;
const PROJECTION_YEARS: i64 = 15;
/// Flat growth multiplier applied to contributions over the projection
/// window in place of a compounding model.
const CORPUS_MULTIPLIER: i64 = 13;

/// Largest monthly amount callers should pass for income, expenses or
/// investments. Keeps every derived figure exactly representable.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Months of expenses covered by current investments, or 0 when there are
/// no expenses to cover. Saturates at `u64::MAX` for sub-unit expenses.
pub fn emergency_fund_months(investments: f64, expenses: f64) -> u64 {
    if expenses > 0.0 {
        round_half_up(investments / expenses) as u64
    } else {
        debug!(investments, expenses, "no monthly expenses, emergency fund months set to 0");
        0
    }
}

fn within_amount_cap(value: f64, field: &'static str) -> Result<(), EngineError> {
    if value.abs() > MAX_AMOUNT {
        return Err(EngineError::invalid(
            field,
            format!("must not exceed {MAX_AMOUNT:.0} in magnitude, got {value}"),
        ));
    }
    Ok(())
}

fn project_corpus(contribution: i64) -> Result<i64, EngineError> {
    contribution
        .checked_mul(12 * PROJECTION_YEARS * CORPUS_MULTIPLIER)
        .ok_or_else(|| {
            EngineError::invalid(
                "monthlyIncome",
                format!("surplus too large to project, contribution {contribution}"),
            )
        })
}

/// Derives the full recommendation for `profile`, drawing the health score
/// perturbation from `jitter`.
///
/// The health score is computed first and its income check runs before
/// anything else is derived. Income and expenses beyond [`MAX_AMOUNT`] are
/// rejected so the integer figures can never overflow.
pub fn build_recommendation<J: ScoreJitter + ?Sized>(
    profile: &Profile,
    jitter: &mut J,
) -> Result<Recommendation, EngineError> {
    let health_score = health_score(
        profile.monthly_income,
        profile.monthly_expenses,
        profile.current_investments,
        jitter,
    )?;
    within_amount_cap(profile.monthly_income, "monthlyIncome")?;
    within_amount_cap(profile.monthly_expenses, "monthlyExpenses")?;

    let allocation = allocate(
        profile.age,
        profile.risk_tolerance,
        profile.investment_horizon,
    );
    let plan = plan_contribution(
        profile.monthly_income,
        profile.monthly_expenses,
        &allocation,
    );

    let projected_corpus = project_corpus(plan.recommended_contribution)?;

    debug!(
        age = profile.age,
        risk = %profile.risk_tolerance,
        horizon = %profile.investment_horizon,
        health_score,
        surplus = plan.monthly_surplus,
        contribution = plan.recommended_contribution,
        "derived recommendation"
    );

    Ok(Recommendation {
        name: profile.name.clone(),
        age: profile.age,
        monthly_income: profile.monthly_income,
        monthly_expenses: profile.monthly_expenses,
        current_investments: profile.current_investments,
        risk_tolerance: profile.risk_tolerance,
        investment_goal: profile.investment_goal,
        investment_horizon: profile.investment_horizon,
        health_score,
        allocation,
        recommended_contribution: plan.recommended_contribution,
        contribution_breakdown: plan.breakdown,
        emergency_fund_months: emergency_fund_months(
            profile.current_investments,
            profile.monthly_expenses,
        ),
        recommended_insurance: profile.monthly_income * 12.0 * INSURANCE_YEARS_OF_INCOME,
        projected_corpus,
    })
}

/// [`build_recommendation`] with a freshly seeded random jitter.
pub fn recommend(profile: &Profile) -> Result<Recommendation, EngineError> {
    build_recommendation(profile, &mut RandomJitter::from_entropy())
}

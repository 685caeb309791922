use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{EngineError, round_half_up};

const BASE_SCORE: f64 = 300.0;
const SAVINGS_RATE_WEIGHT: f64 = 10.0;
const INVESTMENT_RATIO_WEIGHT: f64 = 300.0;
const MAX_SCORE: i32 = 1000;

/// Upper (exclusive) bound of the per-call score perturbation.
pub const JITTER_SPAN: f64 = 50.0;

/// Source of the perturbation added to every health score. Implementations
/// must return values in `[0, JITTER_SPAN)`.
pub trait ScoreJitter {
    fn jitter(&mut self) -> f64;
}

/// Uniform jitter drawn from an owned RNG.
#[derive(Debug, Clone)]
pub struct RandomJitter<R> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    /// Fresh OS-seeded generator, so no call shares state with another.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ScoreJitter for RandomJitter<R> {
    fn jitter(&mut self) -> f64 {
        self.rng.gen_range(0.0..JITTER_SPAN)
    }
}

/// Constant jitter for reproducible scores.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedJitter(pub f64);

impl ScoreJitter for FixedJitter {
    fn jitter(&mut self) -> f64 {
        self.0
    }
}

/// Scores financial health on a 0-1000 scale from the savings rate and the
/// size of the investment cushion relative to annual income.
///
/// Fails when `income` is not strictly positive, since both ratios divide
/// by it.
pub fn health_score<J: ScoreJitter + ?Sized>(
    income: f64,
    expenses: f64,
    investments: f64,
    jitter: &mut J,
) -> Result<i32, EngineError> {
    if !income.is_finite() || income <= 0.0 {
        return Err(EngineError::invalid(
            "monthlyIncome",
            format!("must be a positive amount, got {income}"),
        ));
    }

    let savings_rate = (income - expenses) / income * 100.0;
    let investment_ratio = investments / (income * 12.0);
    let raw = BASE_SCORE
        + savings_rate * SAVINGS_RATE_WEIGHT
        + investment_ratio * INVESTMENT_RATIO_WEIGHT
        + jitter.jitter();

    Ok((round_half_up(raw) as i32).clamp(0, MAX_SCORE))
}

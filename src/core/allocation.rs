use tracing::debug;

use super::round_half_up;
use super::types::{Allocation, InvestmentHorizon, RiskTolerance};

const BASE_EQUITY: f64 = 50.0;
const BASE_DEBT: f64 = 30.0;
const GOLD_PERCENT: i32 = 10;

const GLIDE_PIVOT_AGE: f64 = 25.0;
const EQUITY_GLIDE_PER_YEAR: f64 = 0.7;
const DEBT_GLIDE_PER_YEAR: f64 = 0.6;

const SHORT_HORIZON_EQUITY_CUT: f64 = 25.0;
const SHORT_HORIZON_EQUITY_FLOOR: f64 = 20.0;
const SHORT_HORIZON_DEBT_BOOST: f64 = 20.0;
const LONG_HORIZON_EQUITY_BOOST: f64 = 15.0;
const LONG_HORIZON_DEBT_CUT: f64 = 10.0;

const EQUITY_MIN: i32 = 15;
const EQUITY_MAX: i32 = 90;
const DEBT_MIN: i32 = 5;
const DEBT_MAX: i32 = 70;

/// Equity, debt and gold after clamping and rounding, before real estate
/// takes up the remainder.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AllocationDraft {
    pub(crate) equity: i32,
    pub(crate) debt: i32,
    pub(crate) gold: i32,
}

impl AllocationDraft {
    pub fn equity(&self) -> i32 {
        self.equity
    }

    pub fn debt(&self) -> i32 {
        self.debt
    }

    pub fn gold(&self) -> i32 {
        self.gold
    }

    /// What is left for real estate. Negative when equity and debt together
    /// exceed 90 percent.
    pub fn residue(&self) -> i32 {
        100 - self.equity - self.debt - self.gold
    }

    /// Resolves the draft into a split that sums to 100 with no negative
    /// class. A deficit is taken from debt down to its floor first, then
    /// from equity.
    pub fn balance(self) -> Allocation {
        let residue = self.residue();
        if residue >= 0 {
            return Allocation {
                equity: self.equity,
                debt: self.debt,
                gold: self.gold,
                real_estate: residue,
            };
        }

        let mut deficit = -residue;
        let from_debt = deficit.min((self.debt - DEBT_MIN).max(0));
        let debt = self.debt - from_debt;
        deficit -= from_debt;
        // equity + 5 + 10 > 100 here only when equity > 85, so this stays >= 15
        let equity = self.equity - deficit;

        debug!(
            raw_equity = self.equity,
            raw_debt = self.debt,
            residue,
            equity,
            debt,
            "absorbed negative real estate residue"
        );

        Allocation {
            equity,
            debt,
            gold: self.gold,
            real_estate: 0,
        }
    }
}

fn equity_tilt(risk: RiskTolerance) -> f64 {
    match risk {
        RiskTolerance::Aggressive => 30.0,
        RiskTolerance::Moderate => 15.0,
        RiskTolerance::Conservative => -20.0,
    }
}

fn clamp_round(value: f64, min: i32, max: i32) -> i32 {
    round_half_up(value.clamp(f64::from(min), f64::from(max))) as i32
}

/// Runs the glide path and horizon rules, returning the rounded split
/// without touching a negative real estate residue.
pub fn draft_allocation(
    age: u32,
    risk: RiskTolerance,
    horizon: InvestmentHorizon,
) -> AllocationDraft {
    let mut equity = BASE_EQUITY + equity_tilt(risk);
    let mut debt = BASE_DEBT;

    let years_from_pivot = f64::from(age) - GLIDE_PIVOT_AGE;
    equity -= years_from_pivot * EQUITY_GLIDE_PER_YEAR;
    debt += years_from_pivot * DEBT_GLIDE_PER_YEAR;

    match horizon {
        InvestmentHorizon::Under5Years => {
            equity = (equity - SHORT_HORIZON_EQUITY_CUT).max(SHORT_HORIZON_EQUITY_FLOOR);
            debt += SHORT_HORIZON_DEBT_BOOST;
        }
        InvestmentHorizon::FiveToTenYears => {}
        InvestmentHorizon::Over10Years => {
            equity += LONG_HORIZON_EQUITY_BOOST;
            debt -= LONG_HORIZON_DEBT_CUT;
        }
    }

    AllocationDraft {
        equity: clamp_round(equity, EQUITY_MIN, EQUITY_MAX),
        debt: clamp_round(debt, DEBT_MIN, DEBT_MAX),
        gold: GOLD_PERCENT,
    }
}

/// Maps age, risk tolerance and horizon to a four-way split summing to 100.
pub fn allocate(age: u32, risk: RiskTolerance, horizon: InvestmentHorizon) -> Allocation {
    draft_allocation(age, risk, horizon).balance()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_inputs() -> impl Iterator<Item = (u32, RiskTolerance, InvestmentHorizon)> {
        (18u32..=50).flat_map(|age| {
            RiskTolerance::ALL.into_iter().flat_map(move |risk| {
                InvestmentHorizon::ALL
                    .into_iter()
                    .map(move |horizon| (age, risk, horizon))
            })
        })
    }

    #[test]
    fn moderate_thirty_year_old_draft_has_negative_residue() {
        let draft =
            draft_allocation(30, RiskTolerance::Moderate, InvestmentHorizon::FiveToTenYears);
        assert_eq!(
            draft,
            AllocationDraft {
                equity: 62,
                debt: 33,
                gold: 10,
            }
        );
        assert_eq!(draft.residue(), -5);
    }

    #[test]
    fn moderate_thirty_year_old_deficit_comes_out_of_debt() {
        let allocation =
            allocate(30, RiskTolerance::Moderate, InvestmentHorizon::FiveToTenYears);
        assert_eq!(
            allocation,
            Allocation {
                equity: 62,
                debt: 28,
                gold: 10,
                real_estate: 0,
            }
        );
    }

    #[test]
    fn deficit_beyond_debt_floor_is_taken_from_equity() {
        let draft =
            draft_allocation(25, RiskTolerance::Aggressive, InvestmentHorizon::Over10Years);
        assert_eq!(draft.equity, 90);
        assert_eq!(draft.debt, 20);
        assert_eq!(draft.residue(), -20);

        let allocation = draft.balance();
        assert_eq!(
            allocation,
            Allocation {
                equity: 85,
                debt: 5,
                gold: 10,
                real_estate: 0,
            }
        );
    }

    #[test]
    fn short_horizon_floors_equity_at_twenty() {
        let allocation =
            allocate(50, RiskTolerance::Conservative, InvestmentHorizon::Under5Years);
        assert_eq!(
            allocation,
            Allocation {
                equity: 20,
                debt: 65,
                gold: 10,
                real_estate: 5,
            }
        );
    }

    #[test]
    fn young_conservative_glides_towards_equity() {
        let allocation =
            allocate(18, RiskTolerance::Conservative, InvestmentHorizon::FiveToTenYears);
        assert_eq!(
            allocation,
            Allocation {
                equity: 35,
                debt: 26,
                gold: 10,
                real_estate: 29,
            }
        );
    }

    #[test]
    fn positive_residue_is_left_untouched() {
        let draft = AllocationDraft {
            equity: 40,
            debt: 30,
            gold: 10,
        };
        assert_eq!(draft.balance().real_estate, 20);
    }

    #[test]
    fn debt_below_floor_is_never_raised_to_cover_deficit() {
        let draft = AllocationDraft {
            equity: 90,
            debt: 3,
            gold: 10,
        };
        assert_eq!(draft.residue(), -3);
        assert_eq!(
            draft.balance(),
            Allocation {
                equity: 87,
                debt: 3,
                gold: 10,
                real_estate: 0,
            }
        );
    }

    #[test]
    fn draft_accessors_expose_rounded_split() {
        let draft =
            draft_allocation(18, RiskTolerance::Conservative, InvestmentHorizon::Under5Years);
        assert_eq!(
            (draft.equity(), draft.debt(), draft.gold()),
            (draft.equity, draft.debt, draft.gold)
        );
    }

    #[test]
    fn every_input_sums_to_one_hundred_without_negative_classes() {
        for (age, risk, horizon) in all_inputs() {
            let allocation = allocate(age, risk, horizon);
            assert_eq!(
                allocation.total(),
                100,
                "age={age} risk={risk} horizon={horizon}: {allocation:?}"
            );
            assert!(allocation.real_estate >= 0, "{allocation:?}");
            assert_eq!(allocation.gold, 10);
        }
    }

    #[test]
    fn every_input_keeps_equity_and_debt_within_bounds() {
        for (age, risk, horizon) in all_inputs() {
            let draft = draft_allocation(age, risk, horizon);
            assert!((EQUITY_MIN..=EQUITY_MAX).contains(&draft.equity), "{draft:?}");
            assert!((DEBT_MIN..=DEBT_MAX).contains(&draft.debt), "{draft:?}");

            let allocation = draft.balance();
            assert!(
                (EQUITY_MIN..=EQUITY_MAX).contains(&allocation.equity),
                "{allocation:?}"
            );
            assert!(
                (DEBT_MIN..=DEBT_MAX).contains(&allocation.debt),
                "{allocation:?}"
            );
        }
    }

    #[test]
    fn equity_never_rises_with_age() {
        for risk in RiskTolerance::ALL {
            for horizon in InvestmentHorizon::ALL {
                let equities: Vec<i32> = (18u32..=50)
                    .map(|age| allocate(age, risk, horizon).equity)
                    .collect();
                assert!(
                    equities.windows(2).all(|pair| pair[1] <= pair[0]),
                    "risk={risk} horizon={horizon}: {equities:?}"
                );
            }
        }
    }
}

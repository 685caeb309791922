use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::EngineError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvestmentGoal {
    WealthCreation,
    Retirement,
    HomePurchase,
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvestmentHorizon {
    Under5Years,
    FiveToTenYears,
    Over10Years,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "Conservative",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::Aggressive => "Aggressive",
        }
    }
}

impl InvestmentGoal {
    pub const ALL: [InvestmentGoal; 4] = [
        InvestmentGoal::WealthCreation,
        InvestmentGoal::Retirement,
        InvestmentGoal::HomePurchase,
        InvestmentGoal::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InvestmentGoal::WealthCreation => "Wealth Creation",
            InvestmentGoal::Retirement => "Retirement",
            InvestmentGoal::HomePurchase => "Home Purchase",
            InvestmentGoal::Other => "Other",
        }
    }
}

impl InvestmentHorizon {
    pub const ALL: [InvestmentHorizon; 3] = [
        InvestmentHorizon::Under5Years,
        InvestmentHorizon::FiveToTenYears,
        InvestmentHorizon::Over10Years,
    ];

    /// Wire label; the middle bucket uses an en dash.
    pub fn label(self) -> &'static str {
        match self {
            InvestmentHorizon::Under5Years => "<5 yrs",
            InvestmentHorizon::FiveToTenYears => "5–10 yrs",
            InvestmentHorizon::Over10Years => ">10 yrs",
        }
    }
}

/// Lowercases and drops separators so `Wealth Creation`, `wealth-creation`
/// and `wealthCreation` compare equal. En dashes become ASCII hyphens.
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| if c == '–' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

impl FromStr for RiskTolerance {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "conservative" => Ok(RiskTolerance::Conservative),
            "moderate" => Ok(RiskTolerance::Moderate),
            "aggressive" => Ok(RiskTolerance::Aggressive),
            _ => Err(unknown_label("riskTolerance", s, &RiskTolerance::ALL.map(Self::label))),
        }
    }
}

impl FromStr for InvestmentGoal {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).replace('-', "").as_str() {
            "wealthcreation" => Ok(InvestmentGoal::WealthCreation),
            "retirement" => Ok(InvestmentGoal::Retirement),
            "homepurchase" => Ok(InvestmentGoal::HomePurchase),
            "other" => Ok(InvestmentGoal::Other),
            _ => Err(unknown_label("investmentGoal", s, &InvestmentGoal::ALL.map(Self::label))),
        }
    }
}

impl FromStr for InvestmentHorizon {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "<5yrs" | "<5" | "under-5" | "under5" | "under5years" => {
                Ok(InvestmentHorizon::Under5Years)
            }
            "5-10yrs" | "5-10" | "five-to-ten" | "fivetoten" | "fivetotenyears" => {
                Ok(InvestmentHorizon::FiveToTenYears)
            }
            ">10yrs" | ">10" | "over-10" | "over10" | "over10years" => {
                Ok(InvestmentHorizon::Over10Years)
            }
            _ => Err(unknown_label(
                "investmentHorizon",
                s,
                &InvestmentHorizon::ALL.map(Self::label),
            )),
        }
    }
}

fn unknown_label(field: &'static str, raw: &str, expected: &[&str]) -> EngineError {
    EngineError::invalid(
        field,
        format!("unknown value `{raw}`, expected one of {}", expected.join(", ")),
    )
}

macro_rules! label_serde {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }
        )+
    };
}

label_serde!(RiskTolerance, InvestmentGoal, InvestmentHorizon);

/// A validated personal-finance profile. Amounts share one currency unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_investments: f64,
    pub risk_tolerance: RiskTolerance,
    pub investment_goal: InvestmentGoal,
    pub investment_horizon: InvestmentHorizon,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AssetClass {
    Equity,
    Debt,
    Gold,
    RealEstate,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equity,
        AssetClass::Debt,
        AssetClass::Gold,
        AssetClass::RealEstate,
    ];
}

/// Whole-percent split across the four asset classes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub equity: i32,
    pub debt: i32,
    pub gold: i32,
    pub real_estate: i32,
}

impl Allocation {
    pub fn percent(&self, class: AssetClass) -> i32 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Gold => self.gold,
            AssetClass::RealEstate => self.real_estate,
        }
    }

    pub fn total(&self) -> i32 {
        self.equity + self.debt + self.gold + self.real_estate
    }
}

/// Monthly contribution per asset class, in whole currency units.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBreakdown {
    pub equity: i64,
    pub debt: i64,
    pub gold: i64,
    pub real_estate: i64,
}

impl ContributionBreakdown {
    pub fn amount(&self, class: AssetClass) -> i64 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::Debt => self.debt,
            AssetClass::Gold => self.gold,
            AssetClass::RealEstate => self.real_estate,
        }
    }

    pub fn amount_mut(&mut self, class: AssetClass) -> &mut i64 {
        match class {
            AssetClass::Equity => &mut self.equity,
            AssetClass::Debt => &mut self.debt,
            AssetClass::Gold => &mut self.gold,
            AssetClass::RealEstate => &mut self.real_estate,
        }
    }

    pub fn total(&self) -> i64 {
        AssetClass::ALL.iter().map(|class| self.amount(*class)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub name: String,
    pub age: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_investments: f64,
    pub risk_tolerance: RiskTolerance,
    pub investment_goal: InvestmentGoal,
    pub investment_horizon: InvestmentHorizon,
    pub health_score: i32,
    pub allocation: Allocation,
    pub recommended_contribution: i64,
    pub contribution_breakdown: ContributionBreakdown,
    pub emergency_fund_months: u64,
    pub recommended_insurance: f64,
    pub projected_corpus: i64,
}

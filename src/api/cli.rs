use clap::{Args, Parser, Subcommand, ValueEnum};

use super::payload::validate_profile;
use crate::core::{EngineError, InvestmentGoal, InvestmentHorizon, Profile, RiskTolerance};

#[derive(Parser, Debug)]
#[command(
    name = "wealthplan",
    about = "Personal investment plan recommender: health score, allocation, monthly contribution"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text,
        help = "Log output format, written to stderr"
    )]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Derive one recommendation and print it as JSON.
    Recommend(RecommendArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
    #[arg(
        long,
        env = "CORS_ORIGIN",
        default_value = "http://localhost:5173",
        help = "Origin allowed to call the API from a browser; `*` allows any"
    )]
    pub cors_origin: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliRiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<CliRiskTolerance> for RiskTolerance {
    fn from(value: CliRiskTolerance) -> Self {
        match value {
            CliRiskTolerance::Conservative => RiskTolerance::Conservative,
            CliRiskTolerance::Moderate => RiskTolerance::Moderate,
            CliRiskTolerance::Aggressive => RiskTolerance::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliInvestmentGoal {
    WealthCreation,
    Retirement,
    HomePurchase,
    Other,
}

impl From<CliInvestmentGoal> for InvestmentGoal {
    fn from(value: CliInvestmentGoal) -> Self {
        match value {
            CliInvestmentGoal::WealthCreation => InvestmentGoal::WealthCreation,
            CliInvestmentGoal::Retirement => InvestmentGoal::Retirement,
            CliInvestmentGoal::HomePurchase => InvestmentGoal::HomePurchase,
            CliInvestmentGoal::Other => InvestmentGoal::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliInvestmentHorizon {
    #[value(name = "under-5")]
    Under5Years,
    #[value(name = "5-10")]
    FiveToTenYears,
    #[value(name = "over-10")]
    Over10Years,
}

impl From<CliInvestmentHorizon> for InvestmentHorizon {
    fn from(value: CliInvestmentHorizon) -> Self {
        match value {
            CliInvestmentHorizon::Under5Years => InvestmentHorizon::Under5Years,
            CliInvestmentHorizon::FiveToTenYears => InvestmentHorizon::FiveToTenYears,
            CliInvestmentHorizon::Over10Years => InvestmentHorizon::Over10Years,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, help = "Age in years, 18 to 50")]
    pub age: u32,
    #[arg(long)]
    pub monthly_income: f64,
    #[arg(long)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0)]
    pub current_investments: f64,
    #[arg(long, value_enum, default_value_t = CliRiskTolerance::Moderate)]
    pub risk_tolerance: CliRiskTolerance,
    #[arg(long, value_enum, default_value_t = CliInvestmentGoal::WealthCreation)]
    pub investment_goal: CliInvestmentGoal,
    #[arg(long, value_enum, default_value_t = CliInvestmentHorizon::FiveToTenYears)]
    pub investment_horizon: CliInvestmentHorizon,
}

impl RecommendArgs {
    pub fn into_profile(self) -> Result<Profile, EngineError> {
        validate_profile(Profile {
            name: self.name.trim().to_string(),
            age: self.age,
            monthly_income: self.monthly_income,
            monthly_expenses: self.monthly_expenses,
            current_investments: self.current_investments,
            risk_tolerance: self.risk_tolerance.into(),
            investment_goal: self.investment_goal.into(),
            investment_horizon: self.investment_horizon.into(),
        })
    }
}

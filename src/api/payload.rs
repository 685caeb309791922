use serde::Deserialize;

use crate::core::{
    EngineError, InvestmentGoal, InvestmentHorizon, MAX_AMOUNT, Profile, RiskTolerance,
};

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 50;
const MIN_NAME_CHARS: usize = 2;

/// Profile as submitted by the survey form. Every field is optional here so
/// a missing one can be reported by name instead of as a JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub current_investments: Option<f64>,
    pub risk_tolerance: Option<String>,
    pub investment_goal: Option<String>,
    pub investment_horizon: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, EngineError> {
    value.ok_or_else(|| EngineError::invalid(field, "field is required"))
}

impl ProfilePayload {
    pub fn into_profile(self) -> Result<Profile, EngineError> {
        let profile = Profile {
            name: required(self.name, "name")?.trim().to_string(),
            age: required(self.age, "age")?,
            monthly_income: required(self.monthly_income, "monthlyIncome")?,
            monthly_expenses: required(self.monthly_expenses, "monthlyExpenses")?,
            current_investments: required(self.current_investments, "currentInvestments")?,
            risk_tolerance: required(self.risk_tolerance, "riskTolerance")?
                .parse::<RiskTolerance>()?,
            investment_goal: required(self.investment_goal, "investmentGoal")?
                .parse::<InvestmentGoal>()?,
            investment_horizon: required(self.investment_horizon, "investmentHorizon")?
                .parse::<InvestmentHorizon>()?,
        };
        validate_profile(profile)
    }
}

fn non_negative_amount(value: f64, field: &'static str) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(
            field,
            format!("must be a non-negative amount, got {value}"),
        ));
    }
    within_amount_cap(value, field)
}

fn within_amount_cap(value: f64, field: &'static str) -> Result<(), EngineError> {
    if value > MAX_AMOUNT {
        return Err(EngineError::invalid(
            field,
            format!("must not exceed {MAX_AMOUNT:.0}, got {value}"),
        ));
    }
    Ok(())
}

/// Range checks the engine relies on its caller to perform.
pub fn validate_profile(profile: Profile) -> Result<Profile, EngineError> {
    if profile.name.chars().count() < MIN_NAME_CHARS {
        return Err(EngineError::invalid(
            "name",
            format!("must be at least {MIN_NAME_CHARS} characters"),
        ));
    }

    if !(MIN_AGE..=MAX_AGE).contains(&profile.age) {
        return Err(EngineError::invalid(
            "age",
            format!("must be between {MIN_AGE} and {MAX_AGE}, got {}", profile.age),
        ));
    }

    if !profile.monthly_income.is_finite() || profile.monthly_income <= 0.0 {
        return Err(EngineError::invalid(
            "monthlyIncome",
            format!("must be a positive amount, got {}", profile.monthly_income),
        ));
    }
    within_amount_cap(profile.monthly_income, "monthlyIncome")?;

    non_negative_amount(profile.monthly_expenses, "monthlyExpenses")?;
    non_negative_amount(profile.current_investments, "currentInvestments")?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from_json(json: &str) -> Result<Profile, EngineError> {
        serde_json::from_str::<ProfilePayload>(json)
            .expect("payload should deserialize")
            .into_profile()
    }

    const SURVEY_JSON: &str = r#"{
      "name": "  Asha Rao ",
      "age": 30,
      "monthlyIncome": 75000,
      "monthlyExpenses": 40000,
      "currentInvestments": 500000,
      "riskTolerance": "Moderate",
      "investmentGoal": "Wealth Creation",
      "investmentHorizon": "5–10 yrs"
    }"#;

    #[test]
    fn parses_survey_form_labels() {
        let profile = payload_from_json(SURVEY_JSON).expect("valid payload");

        assert_eq!(profile.name, "Asha Rao");
        assert_eq!(profile.age, 30);
        assert_eq!(profile.monthly_income, 75_000.0);
        assert_eq!(profile.monthly_expenses, 40_000.0);
        assert_eq!(profile.current_investments, 500_000.0);
        assert_eq!(profile.risk_tolerance, RiskTolerance::Moderate);
        assert_eq!(profile.investment_goal, InvestmentGoal::WealthCreation);
        assert_eq!(profile.investment_horizon, InvestmentHorizon::FiveToTenYears);
    }

    #[test]
    fn ignores_unrelated_keys() {
        let json = SURVEY_JSON.replacen('{', r#"{"createdAt": "2024-01-01", "_id": 7,"#, 1);
        assert!(payload_from_json(&json).is_ok());
    }

    #[test]
    fn reports_missing_field_by_name() {
        let json = r#"{
          "name": "Asha",
          "age": 30,
          "monthlyIncome": 75000,
          "monthlyExpenses": 40000,
          "currentInvestments": 500000,
          "investmentGoal": "Retirement",
          "investmentHorizon": ">10 yrs"
        }"#;
        let err = payload_from_json(json).expect_err("risk tolerance missing");
        assert_eq!(err.field(), "riskTolerance");
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn rejects_unknown_enum_label() {
        let json = SURVEY_JSON.replace("\"5–10 yrs\"", "\"forever\"");
        let err = payload_from_json(&json).expect_err("unknown horizon");
        assert_eq!(err.field(), "investmentHorizon");
    }

    #[test]
    fn rejects_out_of_range_age() {
        for age in ["17", "51"] {
            let json = SURVEY_JSON.replace("\"age\": 30", &format!("\"age\": {age}"));
            let err = payload_from_json(&json).expect_err("age out of range");
            assert_eq!(err.field(), "age");
        }
    }

    #[test]
    fn rejects_zero_income_and_negative_amounts() {
        let json = SURVEY_JSON.replace("75000", "0");
        assert_eq!(
            payload_from_json(&json).expect_err("zero income").field(),
            "monthlyIncome"
        );

        let json = SURVEY_JSON.replace("40000", "-1");
        assert_eq!(
            payload_from_json(&json).expect_err("negative expenses").field(),
            "monthlyExpenses"
        );

        let json = SURVEY_JSON.replace("500000", "-250");
        assert_eq!(
            payload_from_json(&json).expect_err("negative investments").field(),
            "currentInvestments"
        );
    }

    #[test]
    fn rejects_short_name() {
        let json = SURVEY_JSON.replace("  Asha Rao ", " A ");
        assert_eq!(payload_from_json(&json).expect_err("short name").field(), "name");
    }

    #[test]
    fn rejects_amounts_above_cap() {
        let json = SURVEY_JSON.replace("75000", "1e16");
        let err = payload_from_json(&json).expect_err("oversized income");
        assert_eq!(err.field(), "monthlyIncome");
        assert!(err.to_string().contains("must not exceed"), "{err}");

        let json = SURVEY_JSON.replace("40000", "1000000000001");
        assert_eq!(
            payload_from_json(&json).expect_err("oversized expenses").field(),
            "monthlyExpenses"
        );

        let json = SURVEY_JSON.replace("500000", "5e12");
        assert_eq!(
            payload_from_json(&json).expect_err("oversized investments").field(),
            "currentInvestments"
        );
    }

    #[test]
    fn accepts_amounts_at_cap() {
        let json = SURVEY_JSON.replace("75000", "1000000000000");
        let profile = payload_from_json(&json).expect("income at cap allowed");
        assert_eq!(profile.monthly_income, MAX_AMOUNT);
    }

    #[test]
    fn zero_expenses_are_valid() {
        let json = SURVEY_JSON.replace("40000", "0");
        let profile = payload_from_json(&json).expect("zero expenses allowed");
        assert_eq!(profile.monthly_expenses, 0.0);
    }
}

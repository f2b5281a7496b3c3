use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::installment::{active_total, configured_total};
use super::{
    BaselineAverages, Cents, Installment, Scenario, ScenarioKind, cents_to_decimal,
    decimal_to_cents, real_value,
};

/// Tuning knobs for one projection run.
///
/// The return rate is annual and applied as `rate / 12` per month; the credit
/// interest rate is already monthly and applied as-is. The asymmetry matches
/// how the rates are quoted to the user (market return vs credit-line APR
/// surcharge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Number of months to simulate, 1-indexed from today. Must be >= 1.
    pub horizon_months: u32,
    /// Annual investment return applied to positive wealth.
    pub annual_return_rate: f64,
    /// Annual inflation used for the real-value series.
    pub annual_inflation_rate: f64,
    /// Monthly interest applied to negative (net debt) wealth.
    pub monthly_credit_rate: f64,
    /// Record only year boundaries; point indices become year numbers.
    pub yearly_points: bool,
    /// Compute the inflation-discounted wealth series.
    pub include_real: bool,
}

/// One sample of the projected future. Ephemeral: produced per run, consumed
/// by charts and milestone extraction, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Month number, or year number when the run records yearly points
    pub index: u32,
    pub label: String,
    pub base_wealth_cents: Cents,
    pub base_liquidity_cents: Cents,
    pub sim_wealth_cents: Cents,
    pub sim_liquidity_cents: Cents,
    /// Inflation-discounted simulated wealth, when requested
    pub real_wealth_cents: Option<Cents>,
}

/// Forecast net worth and liquidity month by month over the horizon.
///
/// Pure fold over months 1..=horizon: no I/O, no shared state, identical
/// inputs produce identical output. Two tracks run in parallel - "base"
/// (baseline and installments only) and "simulated" (scenarios layered on
/// top). Each month both tracks accrue the month's net cash flow, then the
/// wealth accumulators compound: positive wealth by the monthly return
/// factor, negative wealth by the credit factor. Zero rates still multiply
/// (by one) so the code path stays uniform.
pub fn project(
    initial_wealth_cents: Cents,
    initial_liquidity_cents: Cents,
    baseline: &BaselineAverages,
    installments: &[Installment],
    scenarios: &[Scenario],
    params: &ProjectionParams,
) -> Result<Vec<ProjectionPoint>, ProjectionError> {
    validate(params, installments, scenarios)?;

    let growth_factor = monthly_factor("return rate", 1.0 + params.annual_return_rate / 12.0)?;
    let credit_factor = monthly_factor("credit interest rate", 1.0 + params.monthly_credit_rate)?;

    let income = cents_to_decimal(baseline.income_cents);
    let variable = cents_to_decimal(baseline.variable_expense_cents);
    // Core fixed spend: the historical fixed average minus every configured
    // installment. Active installments are added back month by month, so one
    // that ends mid-projection stops weighing on cash flow. May go negative
    // when configured installments exceed the historical average; kept
    // unclamped (see DESIGN.md).
    let core_fixed = cents_to_decimal(baseline.fixed_expense_cents)
        - cents_to_decimal(configured_total(installments));

    let mut base_wealth = cents_to_decimal(initial_wealth_cents);
    let mut base_liquidity = cents_to_decimal(initial_liquidity_cents);
    let mut sim_wealth = base_wealth;
    let mut sim_liquidity = base_liquidity;

    let point_count = if params.yearly_points {
        params.horizon_months / 12
    } else {
        params.horizon_months
    };
    let mut points = Vec::with_capacity(point_count as usize);

    for month in 1..=params.horizon_months {
        let monthly_fixed = core_fixed + cents_to_decimal(active_total(installments, month));
        let monthly_expenses = monthly_fixed + variable;
        let monthly_net = income - monthly_expenses;

        base_wealth += monthly_net;
        base_liquidity += monthly_net;

        let mut sim_income = income;
        let mut sim_expenses = monthly_expenses;
        let mut wealth_impact = Decimal::ZERO;
        let mut cash_impact = Decimal::ZERO;
        for scenario in scenarios {
            let impact = scenario.impact(month);
            sim_income += cents_to_decimal(impact.income_cents);
            sim_expenses += cents_to_decimal(impact.expense_cents);
            wealth_impact += cents_to_decimal(impact.wealth_cents);
            cash_impact += cents_to_decimal(impact.liquidity_cents);
        }
        let sim_net = sim_income - sim_expenses;
        sim_wealth += sim_net + wealth_impact;
        sim_liquidity += sim_net + cash_impact;

        // Growth models investing the whole portfolio, so it touches the
        // wealth tracks only, each compounding by its own sign.
        base_wealth = compound(base_wealth, growth_factor, credit_factor);
        sim_wealth = compound(sim_wealth, growth_factor, credit_factor);

        if !params.yearly_points || month % 12 == 0 {
            points.push(record_point(
                month,
                params,
                base_wealth,
                base_liquidity,
                sim_wealth,
                sim_liquidity,
            ));
        }
    }

    Ok(points)
}

fn compound(wealth: Decimal, growth_factor: Decimal, credit_factor: Decimal) -> Decimal {
    // Debt compounds at the credit rate, everything else at the return rate.
    let factor = if wealth < Decimal::ZERO {
        credit_factor
    } else {
        growth_factor
    };
    wealth * factor
}

fn record_point(
    month: u32,
    params: &ProjectionParams,
    base_wealth: Decimal,
    base_liquidity: Decimal,
    sim_wealth: Decimal,
    sim_liquidity: Decimal,
) -> ProjectionPoint {
    let (index, label) = if params.yearly_points {
        let year = month / 12;
        (year, format!("year {}", year))
    } else {
        (month, format!("month {}", month))
    };

    let real_wealth_cents = if params.include_real {
        Some(decimal_to_cents(real_value(
            sim_wealth,
            params.annual_inflation_rate,
            month,
        )))
    } else {
        None
    };

    ProjectionPoint {
        index,
        label,
        base_wealth_cents: decimal_to_cents(base_wealth),
        base_liquidity_cents: decimal_to_cents(base_liquidity),
        sim_wealth_cents: decimal_to_cents(sim_wealth),
        sim_liquidity_cents: decimal_to_cents(sim_liquidity),
        real_wealth_cents,
    }
}

fn monthly_factor(name: &'static str, factor: f64) -> Result<Decimal, ProjectionError> {
    Decimal::from_f64(factor).ok_or(ProjectionError::InvalidRate {
        name,
        value: factor,
    })
}

fn validate(
    params: &ProjectionParams,
    installments: &[Installment],
    scenarios: &[Scenario],
) -> Result<(), ProjectionError> {
    if params.horizon_months == 0 {
        return Err(ProjectionError::InvalidHorizon(params.horizon_months));
    }
    let rates = [
        ("return rate", params.annual_return_rate),
        ("credit interest rate", params.monthly_credit_rate),
    ];
    for (name, value) in rates {
        if !value.is_finite() {
            return Err(ProjectionError::InvalidRate { name, value });
        }
    }
    if !params.annual_inflation_rate.is_finite() || params.annual_inflation_rate <= -1.0 {
        return Err(ProjectionError::InvalidRate {
            name: "inflation rate",
            value: params.annual_inflation_rate,
        });
    }

    for installment in installments {
        if installment.monthly_amount_cents <= 0 {
            return Err(ProjectionError::NonPositiveAmount {
                entry: installment.label.clone(),
            });
        }
    }

    for scenario in scenarios {
        if scenario.start_month == 0 {
            return Err(ProjectionError::InvalidStartMonth {
                entry: scenario.label.clone(),
            });
        }
        let needs_positive = !matches!(scenario.kind, ScenarioKind::IncomeChange { .. });
        if needs_positive && scenario.kind.amount_cents() <= 0 {
            return Err(ProjectionError::NonPositiveAmount {
                entry: scenario.label.clone(),
            });
        }
    }

    Ok(())
}

/// Caller contract violations. A projection over valid input cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    InvalidHorizon(u32),
    InvalidStartMonth { entry: String },
    NonPositiveAmount { entry: String },
    InvalidRate { name: &'static str, value: f64 },
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::InvalidHorizon(months) => {
                write!(f, "projection horizon must be at least 1 month, got {}", months)
            }
            ProjectionError::InvalidStartMonth { entry } => {
                write!(f, "scenario '{}' must start at month 1 or later", entry)
            }
            ProjectionError::NonPositiveAmount { entry } => {
                write!(f, "ledger entry '{}' requires a positive amount", entry)
            }
            ProjectionError::InvalidRate { name, value } => {
                write!(f, "invalid {}: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

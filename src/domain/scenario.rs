use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type ScenarioId = Uuid;

/// What a hypothetical scenario does to the simulated track. One variant per
/// kind, each carrying only the fields that kind needs, so the engine never
/// inspects labels or re-narrows loosely typed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// A single outflow at the start month: wealth and liquidity both drop once.
    OneTimePurchase { amount_cents: Cents },
    /// A recurring change to monthly income while active. Signed: a raise is
    /// positive, an income cut negative.
    IncomeChange { amount_cents: Cents },
    /// A recurring reduction of monthly spend while active (amount is how much
    /// less is spent, so it increases net cash retained).
    ExtraSavings { amount_cents: Cents },
    /// Converting an existing receivable/payable into cash at the start month:
    /// liquidity moves, net worth does not - the asset only changes form.
    Liquidation { amount_cents: Cents },
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::OneTimePurchase { .. } => "one-time-purchase",
            ScenarioKind::IncomeChange { .. } => "income-change",
            ScenarioKind::ExtraSavings { .. } => "extra-savings",
            ScenarioKind::Liquidation { .. } => "liquidation",
        }
    }

    pub fn amount_cents(&self) -> Cents {
        match self {
            ScenarioKind::OneTimePurchase { amount_cents }
            | ScenarioKind::IncomeChange { amount_cents }
            | ScenarioKind::ExtraSavings { amount_cents }
            | ScenarioKind::Liquidation { amount_cents } => *amount_cents,
        }
    }

    /// Point-event kinds fire exactly once at the start month; the others
    /// apply on every active month.
    pub fn is_point_event(&self) -> bool {
        matches!(
            self,
            ScenarioKind::OneTimePurchase { .. } | ScenarioKind::Liquidation { .. }
        )
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-authored hypothetical financial event layered on top of the
/// baseline to test its projected impact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub label: String,
    pub kind: ScenarioKind,
    /// First simulated month the scenario applies, 1-indexed from today
    pub start_month: u32,
    /// 0 = permanent, otherwise active for this many months
    pub duration_months: u32,
}

impl Scenario {
    pub fn new(label: impl Into<String>, kind: ScenarioKind, start_month: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            kind,
            start_month,
            duration_months: 0,
        }
    }

    pub fn with_duration(mut self, duration_months: u32) -> Self {
        self.duration_months = duration_months;
        self
    }

    /// Window rule shared by every kind: active from the start month, forever
    /// when duration is 0, otherwise for `duration_months` months.
    pub fn is_active(&self, month: u32) -> bool {
        month >= self.start_month
            && (self.duration_months == 0
                || month < self.start_month.saturating_add(self.duration_months))
    }

    /// The additive deltas this scenario contributes in `month`. Point-event
    /// kinds contribute only at `month == start_month`, whatever the duration.
    pub fn impact(&self, month: u32) -> ScenarioImpact {
        match self.kind {
            ScenarioKind::OneTimePurchase { amount_cents } if month == self.start_month => {
                ScenarioImpact {
                    wealth_cents: -amount_cents,
                    liquidity_cents: -amount_cents,
                    ..ScenarioImpact::NONE
                }
            }
            ScenarioKind::Liquidation { amount_cents } if month == self.start_month => {
                ScenarioImpact {
                    liquidity_cents: amount_cents,
                    ..ScenarioImpact::NONE
                }
            }
            ScenarioKind::IncomeChange { amount_cents } if self.is_active(month) => {
                ScenarioImpact {
                    income_cents: amount_cents,
                    ..ScenarioImpact::NONE
                }
            }
            ScenarioKind::ExtraSavings { amount_cents } if self.is_active(month) => {
                ScenarioImpact {
                    expense_cents: -amount_cents,
                    ..ScenarioImpact::NONE
                }
            }
            _ => ScenarioImpact::NONE,
        }
    }
}

/// Per-month deltas a scenario applies to the simulated track. Income and
/// expense deltas feed the monthly net; wealth and liquidity deltas are point
/// impacts applied alongside it. Deltas from simultaneously active scenarios
/// accumulate additively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioImpact {
    pub income_cents: Cents,
    pub expense_cents: Cents,
    pub wealth_cents: Cents,
    pub liquidity_cents: Cents,
}

impl ScenarioImpact {
    pub const NONE: ScenarioImpact = ScenarioImpact {
        income_cents: 0,
        expense_cents: 0,
        wealth_cents: 0,
        liquidity_cents: 0,
    };
}

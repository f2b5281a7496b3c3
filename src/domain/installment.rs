use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type InstallmentId = Uuid;

/// A fixed recurring debt payment with a known, finite remaining duration.
/// Installments are immutable once created; partial payments are not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub label: String,
    pub monthly_amount_cents: Cents,
    pub remaining_months: u32,
}

impl Installment {
    pub fn new(label: impl Into<String>, monthly_amount_cents: Cents, remaining_months: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            monthly_amount_cents,
            remaining_months,
        }
    }

    /// An installment is still being paid in simulated month `month`
    /// (1-indexed from today) while months remain on it.
    pub fn is_active(&self, month: u32) -> bool {
        month <= self.remaining_months
    }
}

/// Total monthly burden of the installments still active at `month`.
pub fn active_total(installments: &[Installment], month: u32) -> Cents {
    installments
        .iter()
        .filter(|i| i.is_active(month))
        .map(|i| i.monthly_amount_cents)
        .sum()
}

/// Total monthly amount of every configured installment, regardless of month.
/// The engine subtracts this once from the baseline fixed-expense average to
/// isolate "core fixed" spend (rent, utilities), then adds back `active_total`
/// each month — so an installment that ends mid-projection stops suppressing
/// projected cash flow the month after it ends.
pub fn configured_total(installments: &[Installment]) -> Cents {
    installments.iter().map(|i| i.monthly_amount_cents).sum()
}

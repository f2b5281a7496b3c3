use serde::{Deserialize, Serialize};

use crate::domain::{AccountType, Cents, ProjectionPoint};

/// Per-account row in a net worth report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    pub name: String,
    pub account_type: AccountType,
    pub balance_cents: Cents,
}

/// Current-position summary: where the simulation starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorthReport {
    pub net_worth_cents: Cents,
    pub liquidity_cents: Cents,
    pub assets: Vec<AccountBalance>,
    pub liabilities: Vec<AccountBalance>,
}

/// Sample a projected series at fixed checkpoints for summary display.
///
/// Checkpoints are matched against `ProjectionPoint::index`, so they must be
/// expressed in the unit the series uses (months for a monthly series, years
/// for a yearly one). Checkpoints beyond the series are omitted, not an
/// error. Output follows checkpoint order.
pub fn sample_milestones(series: &[ProjectionPoint], checkpoints: &[u32]) -> Vec<ProjectionPoint> {
    checkpoints
        .iter()
        .filter_map(|checkpoint| series.iter().find(|p| p.index == *checkpoint))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(index: u32) -> ProjectionPoint {
        ProjectionPoint {
            index,
            label: format!("month {}", index),
            base_wealth_cents: index as Cents * 1000,
            base_liquidity_cents: 0,
            sim_wealth_cents: 0,
            sim_liquidity_cents: 0,
            real_wealth_cents: None,
        }
    }

    #[test]
    fn test_sample_matches_indices() {
        let series: Vec<ProjectionPoint> = (1..=60).map(point).collect();

        let milestones = sample_milestones(&series, &[12, 24, 48, 60]);

        assert_eq!(milestones.len(), 4);
        assert_eq!(milestones[0].index, 12);
        assert_eq!(milestones[3].index, 60);
        assert_eq!(milestones[0].base_wealth_cents, 12_000);
    }

    #[test]
    fn test_out_of_range_checkpoints_omitted() {
        let series: Vec<ProjectionPoint> = (1..=24).map(point).collect();

        let milestones = sample_milestones(&series, &[12, 24, 48, 60]);

        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[1].index, 24);
    }

    #[test]
    fn test_empty_series_yields_no_milestones() {
        assert!(sample_milestones(&[], &[12]).is_empty());
    }
}

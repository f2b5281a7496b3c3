use chrono::NaiveDate;

use crate::domain::{
    Account, BaselineAverages, Category, Cents, Installment, InstallmentId, ProjectionParams,
    ProjectionPoint, Scenario, ScenarioId, ScenarioKind, Transaction, aggregate, liquidity,
    net_worth, project,
};

use super::AppError;
use super::reporting::{AccountBalance, NetWorthReport, sample_milestones};

/// One in-memory simulation session: a read-only snapshot of accounts,
/// transactions and categories, plus the user-editable installment and
/// scenario ledgers. This is the primary interface for any client (CLI, API,
/// TUI, etc.). Nothing here performs I/O; the caller owns loading and
/// persisting session data.
pub struct PlannerService {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    installments: Vec<Installment>,
    scenarios: Vec<Scenario>,
    window_months: u32,
    // Baseline cache, keyed by the reference date it was computed for.
    // Invalidated when the window changes; the transaction set is fixed for
    // the lifetime of a session.
    baseline: Option<(NaiveDate, BaselineAverages)>,
}

impl PlannerService {
    pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

    /// Create a session over a fresh data snapshot.
    pub fn new(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            categories,
            installments: Vec::new(),
            scenarios: Vec::new(),
            window_months: Self::DEFAULT_WINDOW_MONTHS,
            baseline: None,
        }
    }

    pub fn with_installments(mut self, installments: Vec<Installment>) -> Self {
        self.installments = installments;
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn with_window(mut self, window_months: u32) -> Self {
        self.set_window(window_months);
        self
    }

    /// Change the aggregation window. Drops the cached baseline.
    pub fn set_window(&mut self, window_months: u32) {
        if self.window_months != window_months {
            self.window_months = window_months;
            self.baseline = None;
        }
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    // ========================
    // Snapshot queries
    // ========================

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Current net worth: every balance summed, liabilities negative.
    pub fn net_worth(&self) -> Cents {
        net_worth(&self.accounts)
    }

    /// Current liquidity: immediately spendable balances only.
    pub fn liquidity(&self) -> Cents {
        liquidity(&self.accounts)
    }

    /// Per-account breakdown for display.
    pub fn net_worth_report(&self) -> NetWorthReport {
        let (liabilities, assets): (Vec<&Account>, Vec<&Account>) =
            self.accounts.iter().partition(|a| a.is_liability());

        let entry = |a: &&Account| AccountBalance {
            name: a.name.clone(),
            account_type: a.account_type,
            balance_cents: a.balance_cents,
        };

        NetWorthReport {
            net_worth_cents: self.net_worth(),
            liquidity_cents: self.liquidity(),
            assets: assets.iter().map(entry).collect(),
            liabilities: liabilities.iter().map(entry).collect(),
        }
    }

    /// Baseline monthly averages over the configured window, cached per
    /// reference date.
    pub fn baseline(&mut self, today: NaiveDate) -> Result<BaselineAverages, AppError> {
        if let Some((cached_day, cached)) = self.baseline {
            if cached_day == today {
                return Ok(cached);
            }
        }

        let computed = aggregate(
            &self.transactions,
            &self.categories,
            self.window_months,
            today,
        )?;
        self.baseline = Some((today, computed));
        Ok(computed)
    }

    // ========================
    // Installment ledger
    // ========================

    /// Add a recurring installment. Ids are fresh Uuids, never reused within
    /// a session.
    pub fn add_installment(
        &mut self,
        label: String,
        monthly_amount_cents: Cents,
        remaining_months: u32,
    ) -> Result<Installment, AppError> {
        if monthly_amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Installment amount must be positive".to_string(),
            ));
        }

        let installment = Installment::new(label, monthly_amount_cents, remaining_months);
        self.installments.push(installment.clone());
        Ok(installment)
    }

    pub fn remove_installment(&mut self, id: InstallmentId) -> Result<Installment, AppError> {
        let position = self
            .installments
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::InstallmentNotFound(id.to_string()))?;
        Ok(self.installments.remove(position))
    }

    // ========================
    // Scenario ledger
    // ========================

    /// Add a hypothetical scenario. `duration_months` of 0 means permanent.
    pub fn add_scenario(
        &mut self,
        label: String,
        kind: ScenarioKind,
        start_month: u32,
        duration_months: u32,
    ) -> Result<Scenario, AppError> {
        if start_month == 0 {
            return Err(AppError::InvalidStartMonth(
                "Scenarios start at month 1 or later".to_string(),
            ));
        }
        match kind {
            ScenarioKind::IncomeChange { amount_cents } => {
                if amount_cents == 0 {
                    return Err(AppError::InvalidAmount(
                        "Income change cannot be zero".to_string(),
                    ));
                }
            }
            _ => {
                if kind.amount_cents() <= 0 {
                    return Err(AppError::InvalidAmount(format!(
                        "Amount for a {} scenario must be positive",
                        kind.as_str()
                    )));
                }
            }
        }

        let scenario = Scenario::new(label, kind, start_month).with_duration(duration_months);
        self.scenarios.push(scenario.clone());
        Ok(scenario)
    }

    pub fn remove_scenario(&mut self, id: ScenarioId) -> Result<Scenario, AppError> {
        let position = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::ScenarioNotFound(id.to_string()))?;
        Ok(self.scenarios.remove(position))
    }

    // ========================
    // Projection
    // ========================

    /// Run one projection from the current snapshot. Pure aside from the
    /// baseline cache: identical inputs give identical series.
    pub fn project(
        &mut self,
        today: NaiveDate,
        params: &ProjectionParams,
    ) -> Result<Vec<ProjectionPoint>, AppError> {
        let baseline = self.baseline(today)?;
        let series = project(
            self.net_worth(),
            self.liquidity(),
            &baseline,
            &self.installments,
            &self.scenarios,
            params,
        )?;
        Ok(series)
    }

    /// Run a projection and keep only the requested checkpoints. Checkpoints
    /// use the unit of the series: months, or years with yearly points.
    pub fn milestones(
        &mut self,
        today: NaiveDate,
        params: &ProjectionParams,
        checkpoints: &[u32],
    ) -> Result<Vec<ProjectionPoint>, AppError> {
        let series = self.project(today, params)?;
        Ok(sample_milestones(&series, checkpoints))
    }
}

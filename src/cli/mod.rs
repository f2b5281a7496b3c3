use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::PlannerService;
use crate::domain::{ProjectionParams, ProjectionPoint, ScenarioKind, format_cents, parse_cents};
use crate::io::{PlannerSnapshot, load_snapshot, save_snapshot};

/// Provisio - Net Worth Projection & What-If Simulator
#[derive(Parser)]
#[command(name = "provisio")]
#[command(about = "A deterministic net-worth projection and what-if simulator")]
#[command(version)]
pub struct Cli {
    /// Snapshot file with accounts, transactions, categories and ledgers
    #[arg(short, long, default_value = "provisio.json")]
    pub snapshot: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show current net worth and liquidity
    #[command(name = "networth")]
    NetWorth,

    /// Show baseline monthly averages from the trailing window
    Baseline {
        /// Trailing window in months
        #[arg(short, long, default_value = "6")]
        window: u32,
    },

    /// Project net worth and liquidity over the horizon
    Project {
        /// Horizon in months
        #[arg(short, long, default_value = "60")]
        months: u32,

        /// Annual investment return rate (e.g., "0.05" for 5%)
        #[arg(long, default_value = "0.0")]
        return_rate: f64,

        /// Annual inflation rate
        #[arg(long, default_value = "0.0")]
        inflation_rate: f64,

        /// Monthly interest rate on negative net worth
        #[arg(long, default_value = "0.0")]
        credit_rate: f64,

        /// Trailing window in months for the baseline
        #[arg(short, long, default_value = "6")]
        window: u32,

        /// Record one point per year instead of per month
        #[arg(long)]
        yearly: bool,

        /// Include the inflation-adjusted wealth column
        #[arg(long)]
        real: bool,
    },

    /// Sample the projection at fixed checkpoints
    Milestones {
        /// Checkpoints in the unit of the series (months, or years with --yearly)
        #[arg(long, default_value = "12,24,36,48,60")]
        at: String,

        /// Horizon in months
        #[arg(short, long, default_value = "60")]
        months: u32,

        /// Annual investment return rate
        #[arg(long, default_value = "0.0")]
        return_rate: f64,

        /// Annual inflation rate
        #[arg(long, default_value = "0.0")]
        inflation_rate: f64,

        /// Monthly interest rate on negative net worth
        #[arg(long, default_value = "0.0")]
        credit_rate: f64,

        /// Trailing window in months for the baseline
        #[arg(short, long, default_value = "6")]
        window: u32,

        /// Record one point per year instead of per month
        #[arg(long)]
        yearly: bool,

        /// Include the inflation-adjusted wealth column
        #[arg(long)]
        real: bool,
    },

    /// Installment ledger commands
    #[command(subcommand)]
    Installment(InstallmentCommands),

    /// Scenario ledger commands
    #[command(subcommand)]
    Scenario(ScenarioCommands),
}

#[derive(Subcommand)]
pub enum InstallmentCommands {
    /// Add a recurring installment
    Add {
        /// Installment label
        label: String,

        /// Monthly amount (e.g., "450.00" or "450")
        #[arg(short, long)]
        amount: String,

        /// Remaining months
        #[arg(short, long)]
        months: u32,
    },

    /// Remove an installment by id
    Remove {
        /// Installment id
        id: String,
    },

    /// List installments
    List,
}

#[derive(Subcommand)]
pub enum ScenarioCommands {
    /// Add a hypothetical scenario
    Add {
        /// Scenario label
        label: String,

        /// Kind: purchase, income, savings, liquidation
        #[arg(short, long)]
        kind: String,

        /// Amount (signed for income changes, e.g., "-300")
        #[arg(short, long)]
        amount: String,

        /// First month the scenario applies (1 = next month)
        #[arg(short, long, default_value = "1")]
        start: u32,

        /// Months the scenario stays active (0 = permanent)
        #[arg(short, long, default_value = "0")]
        duration: u32,
    },

    /// Remove a scenario by id
    Remove {
        /// Scenario id
        id: String,
    },

    /// List scenarios
    List,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        if self.verbose {
            eprintln!(
                "[snapshot] {} accounts, {} transactions, {} installments, {} scenarios",
                snapshot.accounts.len(),
                snapshot.transactions.len(),
                snapshot.installments.len(),
                snapshot.scenarios.len()
            );
        }
        let mut service = snapshot.clone().into_service();
        let today = Utc::now().date_naive();

        match self.command {
            Commands::NetWorth => run_networth_command(&service),

            Commands::Baseline { window } => {
                service.set_window(window);
                run_baseline_command(&mut service, today)
            }

            Commands::Project {
                months,
                return_rate,
                inflation_rate,
                credit_rate,
                window,
                yearly,
                real,
            } => {
                service.set_window(window);
                let params = build_params(
                    months,
                    return_rate,
                    inflation_rate,
                    credit_rate,
                    yearly,
                    real,
                );
                run_project_command(&mut service, today, &params)
            }

            Commands::Milestones {
                at,
                months,
                return_rate,
                inflation_rate,
                credit_rate,
                window,
                yearly,
                real,
            } => {
                service.set_window(window);
                let params = build_params(
                    months,
                    return_rate,
                    inflation_rate,
                    credit_rate,
                    yearly,
                    real,
                );
                let checkpoints = parse_checkpoints(&at)?;
                run_milestones_command(&mut service, today, &params, &checkpoints)
            }

            Commands::Installment(installment_cmd) => {
                run_installment_command(&mut service, installment_cmd, &snapshot, &self.snapshot)
            }

            Commands::Scenario(scenario_cmd) => {
                run_scenario_command(&mut service, scenario_cmd, &snapshot, &self.snapshot)
            }
        }
    }
}

fn build_params(
    months: u32,
    return_rate: f64,
    inflation_rate: f64,
    credit_rate: f64,
    yearly: bool,
    real: bool,
) -> ProjectionParams {
    ProjectionParams {
        horizon_months: months,
        annual_return_rate: return_rate,
        annual_inflation_rate: inflation_rate,
        monthly_credit_rate: credit_rate,
        yearly_points: yearly,
        include_real: real,
    }
}

fn parse_checkpoints(input: &str) -> Result<Vec<u32>> {
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid checkpoint '{}'. Use e.g. '12,24,60'", part))
        })
        .collect()
}

fn parse_scenario_kind(kind: &str, amount_cents: i64) -> Result<ScenarioKind> {
    match kind.to_lowercase().as_str() {
        "purchase" | "one-time-purchase" => Ok(ScenarioKind::OneTimePurchase { amount_cents }),
        "income" | "income-change" => Ok(ScenarioKind::IncomeChange { amount_cents }),
        "savings" | "extra-savings" => Ok(ScenarioKind::ExtraSavings { amount_cents }),
        "liquidation" => Ok(ScenarioKind::Liquidation { amount_cents }),
        other => Err(anyhow::anyhow!(
            "Invalid scenario kind '{}'. Valid kinds: purchase, income, savings, liquidation",
            other
        )),
    }
}

fn run_networth_command(service: &PlannerService) -> Result<()> {
    let report = service.net_worth_report();

    if report.assets.is_empty() && report.liabilities.is_empty() {
        println!("No accounts in snapshot.");
        return Ok(());
    }

    println!("{:<24} {:<14} {:>15}", "ACCOUNT", "TYPE", "BALANCE");
    println!("{}", "-".repeat(55));
    for entry in report.assets.iter().chain(report.liabilities.iter()) {
        println!(
            "{:<24} {:<14} {:>15}",
            truncate(&entry.name, 24),
            entry.account_type,
            format_cents(entry.balance_cents)
        );
    }
    println!("{}", "-".repeat(55));
    println!(
        "{:<39} {:>15}",
        "NET WORTH",
        format_cents(report.net_worth_cents)
    );
    println!(
        "{:<39} {:>15}",
        "LIQUIDITY",
        format_cents(report.liquidity_cents)
    );

    Ok(())
}

fn run_baseline_command(service: &mut PlannerService, today: NaiveDate) -> Result<()> {
    let baseline = service.baseline(today)?;

    println!(
        "Baseline averages over the trailing {} months:",
        service.window_months()
    );
    println!(
        "{:<22} {:>15}",
        "Income",
        format_cents(baseline.income_cents)
    );
    println!(
        "{:<22} {:>15}",
        "Fixed expenses",
        format_cents(baseline.fixed_expense_cents)
    );
    println!(
        "{:<22} {:>15}",
        "Variable expenses",
        format_cents(baseline.variable_expense_cents)
    );
    println!(
        "{:<22} {:>15}",
        "Savings capacity",
        format_cents(baseline.savings_capacity())
    );

    Ok(())
}

fn run_project_command(
    service: &mut PlannerService,
    today: NaiveDate,
    params: &ProjectionParams,
) -> Result<()> {
    let series = service.project(today, params)?;
    print_series(&series, params.include_real);
    Ok(())
}

fn run_milestones_command(
    service: &mut PlannerService,
    today: NaiveDate,
    params: &ProjectionParams,
    checkpoints: &[u32],
) -> Result<()> {
    let milestones = service.milestones(today, params, checkpoints)?;

    if milestones.is_empty() {
        println!("No checkpoints fall inside the projected horizon.");
        return Ok(());
    }

    print_series(&milestones, params.include_real);
    Ok(())
}

fn print_series(series: &[ProjectionPoint], include_real: bool) {
    print!(
        "{:<10} {:>15} {:>15} {:>15} {:>15}",
        "PERIOD", "BASE WEALTH", "BASE LIQUID", "SIM WEALTH", "SIM LIQUID"
    );
    if include_real {
        print!(" {:>15}", "REAL WEALTH");
    }
    println!();
    println!("{}", "-".repeat(if include_real { 90 } else { 74 }));

    for point in series {
        print!(
            "{:<10} {:>15} {:>15} {:>15} {:>15}",
            point.label,
            format_cents(point.base_wealth_cents),
            format_cents(point.base_liquidity_cents),
            format_cents(point.sim_wealth_cents),
            format_cents(point.sim_liquidity_cents)
        );
        if let Some(real) = point.real_wealth_cents {
            print!(" {:>15}", format_cents(real));
        }
        println!();
    }
}

fn run_installment_command(
    service: &mut PlannerService,
    cmd: InstallmentCommands,
    snapshot: &PlannerSnapshot,
    snapshot_path: &std::path::Path,
) -> Result<()> {
    match cmd {
        InstallmentCommands::Add {
            label,
            amount,
            months,
        } => {
            let amount_cents =
                parse_cents(&amount).context("Invalid amount format. Use '450.00' or '450'")?;
            let installment = service.add_installment(label, amount_cents, months)?;
            save_snapshot(snapshot_path, &snapshot.clone().with_ledgers_from(service))?;
            println!(
                "Added installment: {} ({}/month, {} months left, {})",
                installment.label,
                format_cents(installment.monthly_amount_cents),
                installment.remaining_months,
                installment.id
            );
        }

        InstallmentCommands::Remove { id } => {
            let installment_id =
                Uuid::parse_str(&id).context("Invalid installment ID format (expected UUID)")?;
            let removed = service.remove_installment(installment_id)?;
            save_snapshot(snapshot_path, &snapshot.clone().with_ledgers_from(service))?;
            println!("Removed installment: {}", removed.label);
        }

        InstallmentCommands::List => {
            let installments = service.installments();
            if installments.is_empty() {
                println!("No installments configured.");
            } else {
                println!(
                    "{:<38} {:<20} {:>12} {:>8}",
                    "ID", "LABEL", "MONTHLY", "LEFT"
                );
                println!("{}", "-".repeat(82));
                for installment in installments {
                    println!(
                        "{:<38} {:<20} {:>12} {:>8}",
                        installment.id,
                        truncate(&installment.label, 20),
                        format_cents(installment.monthly_amount_cents),
                        installment.remaining_months
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_scenario_command(
    service: &mut PlannerService,
    cmd: ScenarioCommands,
    snapshot: &PlannerSnapshot,
    snapshot_path: &std::path::Path,
) -> Result<()> {
    match cmd {
        ScenarioCommands::Add {
            label,
            kind,
            amount,
            start,
            duration,
        } => {
            let amount_cents =
                parse_cents(&amount).context("Invalid amount format. Use '2000.00' or '-300'")?;
            let scenario_kind = parse_scenario_kind(&kind, amount_cents)?;
            let scenario = service.add_scenario(label, scenario_kind, start, duration)?;
            save_snapshot(snapshot_path, &snapshot.clone().with_ledgers_from(service))?;
            println!(
                "Added scenario: {} ({}, month {}, {})",
                scenario.label,
                scenario.kind,
                scenario.start_month,
                scenario.id
            );
        }

        ScenarioCommands::Remove { id } => {
            let scenario_id =
                Uuid::parse_str(&id).context("Invalid scenario ID format (expected UUID)")?;
            let removed = service.remove_scenario(scenario_id)?;
            save_snapshot(snapshot_path, &snapshot.clone().with_ledgers_from(service))?;
            println!("Removed scenario: {}", removed.label);
        }

        ScenarioCommands::List => {
            let scenarios = service.scenarios();
            if scenarios.is_empty() {
                println!("No scenarios configured.");
            } else {
                println!(
                    "{:<38} {:<20} {:<18} {:>12} {:>6} {:>9}",
                    "ID", "LABEL", "KIND", "AMOUNT", "START", "DURATION"
                );
                println!("{}", "-".repeat(108));
                for scenario in scenarios {
                    let duration = if scenario.duration_months == 0 {
                        "always".to_string()
                    } else {
                        format!("{}m", scenario.duration_months)
                    };
                    println!(
                        "{:<38} {:<20} {:<18} {:>12} {:>6} {:>9}",
                        scenario.id,
                        truncate(&scenario.label, 20),
                        scenario.kind,
                        format_cents(scenario.kind.amount_cents()),
                        scenario.start_month,
                        duration
                    );
                }
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::PlannerService;
use crate::domain::{Account, Category, Installment, Scenario, Transaction};

/// Everything a simulation session needs, in one JSON file. Accounts,
/// transactions and categories are the read-only data snapshot the
/// surrounding application exports; installments and scenarios are the
/// user-editable ledgers this tool persists back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub installments: Vec<Installment>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl PlannerSnapshot {
    pub fn new(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            accounts,
            transactions,
            categories,
            installments: Vec::new(),
            scenarios: Vec::new(),
        }
    }

    /// Build a session over this snapshot's data.
    pub fn into_service(self) -> PlannerService {
        PlannerService::new(self.accounts, self.transactions, self.categories)
            .with_installments(self.installments)
            .with_scenarios(self.scenarios)
    }

    /// Refresh the editable ledgers from a session before saving.
    pub fn with_ledgers_from(mut self, service: &PlannerService) -> Self {
        self.installments = service.installments().to_vec();
        self.scenarios = service.scenarios().to_vec();
        self.exported_at = Utc::now();
        self
    }
}

pub fn read_snapshot<R: Read>(reader: R) -> Result<PlannerSnapshot> {
    let snapshot = serde_json::from_reader(reader).context("Failed to parse snapshot JSON")?;
    Ok(snapshot)
}

pub fn write_snapshot<W: Write>(mut writer: W, snapshot: &PlannerSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<PlannerSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file: {}", path.display()))?;
    read_snapshot(BufReader::new(file))
}

pub fn save_snapshot(path: &Path, snapshot: &PlannerSnapshot) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;
    write_snapshot(BufWriter::new(file), snapshot)
}

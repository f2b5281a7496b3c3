use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Cents};

pub type TransactionId = Uuid;
pub type CategoryId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    /// Salary, interest, any money entering the system
    Income,
    /// Rent, utilities, subscriptions, installment payments
    FixedExpense,
    /// Groceries, dining, everything discretionary
    VariableExpense,
    /// Money moved aside but still owned
    Savings,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::FixedExpense => "fixed-expense",
            CategoryType::VariableExpense => "variable-expense",
            CategoryType::Savings => "savings",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "fixed-expense" => Ok(CategoryType::FixedExpense),
            "variable-expense" => Ok(CategoryType::VariableExpense),
            "savings" => Ok(CategoryType::Savings),
            other => Err(format!("unknown category type: {}", other)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub category_type: CategoryType,
}

impl Category {
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_type,
        }
    }
}

/// A historical transaction, consumed read-only by the aggregator.
/// Amounts are signed: positive for inflows, negative for outflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Calendar day the money moved
    pub date: NaiveDate,
    pub amount_cents: Cents,
    pub category_id: Option<CategoryId>,
    /// Present ⇒ this is an inter-account transfer, not income/expense.
    /// Transfers redistribute net worth; they never change it.
    pub destination_account_id: Option<AccountId>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount_cents: Cents) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount_cents,
            category_id: None,
            destination_account_id: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_destination(mut self, account_id: AccountId) -> Self {
        self.destination_account_id = Some(account_id);
        self
    }

    /// Returns true if this transaction only moves money between own accounts.
    pub fn is_transfer(&self) -> bool {
        self.destination_account_id.is_some()
    }
}

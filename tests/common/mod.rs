// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::NaiveDate;
use provisio::application::PlannerService;
use provisio::domain::{
    Account, AccountType, Category, CategoryType, ProjectionParams, ProjectionPoint, Transaction,
};

/// Fixed reference date so every suite is deterministic.
pub fn today() -> NaiveDate {
    date("2024-06-15")
}

/// Helper to parse a date string into NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Projection parameters with every rate off and monthly points.
pub fn flat_params(horizon_months: u32) -> ProjectionParams {
    ProjectionParams {
        horizon_months,
        annual_return_rate: 0.0,
        annual_inflation_rate: 0.0,
        monthly_credit_rate: 0.0,
        yearly_points: false,
        include_real: false,
    }
}

/// Find the point recorded at `index`, panicking if the series misses it.
pub fn point_at(series: &[ProjectionPoint], index: u32) -> &ProjectionPoint {
    series
        .iter()
        .find(|p| p.index == index)
        .unwrap_or_else(|| panic!("no projection point at index {}", index))
}

/// Test fixture: standard data snapshot
pub struct StandardBook;

impl StandardBook {
    /// Income / fixed / variable / savings category set
    pub fn categories() -> Vec<Category> {
        vec![
            Category::new("Salary", CategoryType::Income),
            Category::new("Rent", CategoryType::FixedExpense),
            Category::new("Groceries", CategoryType::VariableExpense),
            Category::new("Deposit", CategoryType::Savings),
        ]
    }

    pub fn category_id(categories: &[Category], name: &str) -> uuid::Uuid {
        categories
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no category named {}", name))
            .id
    }

    /// Mixed account set: net worth 1_550_000, liquidity 500_000
    pub fn accounts() -> Vec<Account> {
        vec![
            Account::new("Checking", AccountType::Checking, 500_000),
            Account::new("Brokerage", AccountType::Investment, 1_200_000),
            Account::new("Visa", AccountType::CreditCard, -150_000),
        ]
    }

    /// Three identical months of history ending at `today()`: income
    /// 1_000_000, fixed 400_000, variable 200_000 per month.
    pub fn steady_transactions(categories: &[Category]) -> Vec<Transaction> {
        let salary = Self::category_id(categories, "Salary");
        let rent = Self::category_id(categories, "Rent");
        let groceries = Self::category_id(categories, "Groceries");

        let mut transactions = Vec::new();
        for month in ["2024-04", "2024-05", "2024-06"] {
            transactions.push(
                Transaction::new(date(&format!("{}-01", month)), 1_000_000).with_category(salary),
            );
            transactions
                .push(Transaction::new(date(&format!("{}-03", month)), -400_000).with_category(rent));
            transactions.push(
                Transaction::new(date(&format!("{}-10", month)), -200_000).with_category(groceries),
            );
        }
        transactions
    }

    /// Session with the standard accounts and steady history.
    pub fn service() -> PlannerService {
        let categories = Self::categories();
        let transactions = Self::steady_transactions(&categories);
        PlannerService::new(Self::accounts(), transactions, categories)
    }

    /// Session with the steady history but no accounts: projections start
    /// from zero wealth and liquidity.
    pub fn zero_start_service() -> PlannerService {
        let categories = Self::categories();
        let transactions = Self::steady_transactions(&categories);
        PlannerService::new(Vec::new(), transactions, categories)
    }
}

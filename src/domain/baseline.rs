use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, CategoryId, CategoryType, Cents, Transaction, decimal_to_cents};

/// Trailing monthly averages derived from real historical transactions.
/// Computed once per aggregation window and held immutable for a projection
/// run; the session layer caches it until the window or transaction set
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineAverages {
    pub income_cents: Cents,
    pub fixed_expense_cents: Cents,
    pub variable_expense_cents: Cents,
}

impl BaselineAverages {
    pub const ZERO: BaselineAverages = BaselineAverages {
        income_cents: 0,
        fixed_expense_cents: 0,
        variable_expense_cents: 0,
    };

    /// Steady-state amount retained per month at the baseline burn rate.
    pub fn savings_capacity(&self) -> Cents {
        self.income_cents - self.fixed_expense_cents - self.variable_expense_cents
    }
}

/// Reduce a window of past transactions into baseline monthly averages.
///
/// Transfers between own accounts are excluded: they redistribute net worth
/// without changing it. Inflows count as income regardless of category;
/// outflows split into fixed vs variable by category type. Outflows whose
/// category cannot be resolved count as variable expense; savings-typed
/// outflows are retained wealth and enter neither expense bucket.
///
/// Totals divide by the number of distinct calendar months carrying at least
/// one counted transaction, floored at one so an empty window yields all-zero
/// averages instead of a division error.
pub fn aggregate(
    transactions: &[Transaction],
    categories: &[Category],
    window_months: u32,
    today: NaiveDate,
) -> Result<BaselineAverages, AggregationError> {
    if window_months == 0 {
        return Err(AggregationError::InvalidWindow(window_months));
    }
    let cutoff = today
        .checked_sub_months(Months::new(window_months))
        .ok_or(AggregationError::InvalidWindow(window_months))?;

    let category_types: HashMap<CategoryId, CategoryType> = categories
        .iter()
        .map(|c| (c.id, c.category_type))
        .collect();

    let mut income_total = 0i64;
    let mut fixed_total = 0i64;
    let mut variable_total = 0i64;
    let mut months_with_activity: HashSet<(i32, u32)> = HashSet::new();

    for txn in transactions {
        if txn.is_transfer() || txn.date < cutoff || txn.date > today {
            continue;
        }

        if txn.amount_cents > 0 {
            income_total += txn.amount_cents;
        } else if txn.amount_cents < 0 {
            let magnitude = -txn.amount_cents;
            let resolved = txn.category_id.and_then(|id| category_types.get(&id));
            match resolved {
                Some(CategoryType::FixedExpense) => fixed_total += magnitude,
                Some(CategoryType::Savings) => {}
                // Income-categorized outflows (refund reversals etc.) and
                // unresolved categories both land in the variable bucket.
                _ => variable_total += magnitude,
            }
        } else {
            continue;
        }

        months_with_activity.insert((txn.date.year(), txn.date.month()));
    }

    let month_count = months_with_activity.len().max(1) as i64;

    Ok(BaselineAverages {
        income_cents: average(income_total, month_count),
        fixed_expense_cents: average(fixed_total, month_count),
        variable_expense_cents: average(variable_total, month_count),
    })
}

fn average(total: Cents, month_count: i64) -> Cents {
    decimal_to_cents(Decimal::from(total) / Decimal::from(month_count))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    InvalidWindow(u32),
}

impl std::fmt::Display for AggregationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationError::InvalidWindow(months) => {
                write!(f, "aggregation window must be at least 1 month, got {}", months)
            }
        }
    }
}

impl std::error::Error for AggregationError {}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn standard_categories() -> Vec<Category> {
        vec![
            Category::new("Salary", CategoryType::Income),
            Category::new("Rent", CategoryType::FixedExpense),
            Category::new("Groceries", CategoryType::VariableExpense),
            Category::new("Deposit", CategoryType::Savings),
        ]
    }

    fn category_id(categories: &[Category], name: &str) -> CategoryId {
        categories.iter().find(|c| c.name == name).unwrap().id
    }

    #[test]
    fn test_empty_transactions_yield_zero_averages() {
        let result = aggregate(&[], &[], 6, date("2024-06-15")).unwrap();
        assert_eq!(result, BaselineAverages::ZERO);
        assert_eq!(result.savings_capacity(), 0);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = aggregate(&[], &[], 0, date("2024-06-15")).unwrap_err();
        assert_eq!(err, AggregationError::InvalidWindow(0));
    }

    #[test]
    fn test_averages_divide_by_distinct_active_months() {
        let categories = standard_categories();
        let rent = category_id(&categories, "Rent");
        let today = date("2024-06-15");

        // Two active months inside a six month window
        let transactions = vec![
            Transaction::new(date("2024-05-01"), 300_000),
            Transaction::new(date("2024-05-03"), -100_000).with_category(rent),
            Transaction::new(date("2024-06-01"), 300_000),
        ];

        let result = aggregate(&transactions, &categories, 6, today).unwrap();
        assert_eq!(result.income_cents, 300_000);
        assert_eq!(result.fixed_expense_cents, 50_000);
        assert_eq!(result.variable_expense_cents, 0);
    }

    #[test]
    fn test_transfers_excluded_from_aggregation() {
        let categories = standard_categories();
        let today = date("2024-06-15");

        let transactions = vec![
            Transaction::new(date("2024-06-01"), 200_000),
            // Moving money to savings is not income or expense
            Transaction::new(date("2024-06-02"), -150_000).with_destination(Uuid::new_v4()),
        ];

        let result = aggregate(&transactions, &categories, 6, today).unwrap();
        assert_eq!(result.income_cents, 200_000);
        assert_eq!(result.variable_expense_cents, 0);
    }

    #[test]
    fn test_unresolved_category_is_variable_expense() {
        let categories = standard_categories();
        let today = date("2024-06-15");

        let transactions = vec![
            // Dangling category reference
            Transaction::new(date("2024-06-01"), -40_000).with_category(Uuid::new_v4()),
            // No category at all
            Transaction::new(date("2024-06-02"), -10_000),
        ];

        let result = aggregate(&transactions, &categories, 6, today).unwrap();
        assert_eq!(result.variable_expense_cents, 50_000);
        assert_eq!(result.fixed_expense_cents, 0);
    }

    #[test]
    fn test_savings_outflows_not_counted_as_expense() {
        let categories = standard_categories();
        let deposit = category_id(&categories, "Deposit");
        let today = date("2024-06-15");

        let transactions = vec![
            Transaction::new(date("2024-06-01"), 500_000),
            Transaction::new(date("2024-06-02"), -200_000).with_category(deposit),
        ];

        let result = aggregate(&transactions, &categories, 6, today).unwrap();
        assert_eq!(result.income_cents, 500_000);
        assert_eq!(result.fixed_expense_cents, 0);
        assert_eq!(result.variable_expense_cents, 0);
        assert_eq!(result.savings_capacity(), 500_000);
    }

    #[test]
    fn test_window_excludes_old_and_future_transactions() {
        let categories = standard_categories();
        let today = date("2024-06-15");

        let transactions = vec![
            // Outside the 3-month window
            Transaction::new(date("2024-01-10"), 999_000),
            // Future-dated
            Transaction::new(date("2024-07-01"), 999_000),
            // In window
            Transaction::new(date("2024-05-10"), 250_000),
        ];

        let result = aggregate(&transactions, &categories, 3, today).unwrap();
        assert_eq!(result.income_cents, 250_000);
    }

    #[test]
    fn test_average_rounds_to_nearest_cent() {
        let today = date("2024-06-15");
        // 100 cents over three active months -> 33.33.. -> 33
        let transactions = vec![
            Transaction::new(date("2024-04-01"), 100),
            Transaction::new(date("2024-05-01"), -1),
            Transaction::new(date("2024-06-01"), -1),
        ];

        let result = aggregate(&transactions, &[], 6, today).unwrap();
        assert_eq!(result.income_cents, 33);
        assert_eq!(result.variable_expense_cents, 1); // 2/3 rounds up
    }
}

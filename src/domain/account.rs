use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type AccountId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Day-to-day bank account, immediately spendable
    Checking,
    /// Interest-bearing bank account, immediately spendable
    Savings,
    /// Physical cash on hand
    Cash,
    /// Brokerage, funds, retirement - owned but not immediately spendable
    Investment,
    /// Money owed to you (loans given, pending reimbursements)
    Receivable,
    /// Revolving credit card debt
    CreditCard,
    /// Bank credit line / overdraft
    CreditLine,
    /// Money you owe outside of credit products
    Payable,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Cash => "cash",
            AccountType::Investment => "investment",
            AccountType::Receivable => "receivable",
            AccountType::CreditCard => "credit-card",
            AccountType::CreditLine => "credit-line",
            AccountType::Payable => "payable",
        }
    }

    /// Returns true if balances of this type are immediately spendable.
    /// Classification is by type, never by balance sign.
    pub fn is_liquid(&self) -> bool {
        matches!(
            self,
            AccountType::Checking | AccountType::Savings | AccountType::Cash
        )
    }

    /// Returns true if this type represents a debt. Liability accounts carry
    /// negative balances by convention.
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            AccountType::CreditCard | AccountType::CreditLine | AccountType::Payable
        )
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "cash" => Ok(AccountType::Cash),
            "investment" => Ok(AccountType::Investment),
            "receivable" => Ok(AccountType::Receivable),
            "credit-card" => Ok(AccountType::CreditCard),
            "credit-line" => Ok(AccountType::CreditLine),
            "payable" => Ok(AccountType::Payable),
            other => Err(format!("unknown account type: {}", other)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A read-only snapshot of one account at simulation start. The surrounding
/// application owns account CRUD; the engine only classifies and sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub balance_cents: Cents,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: AccountType, balance_cents: Cents) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_type,
            balance_cents,
        }
    }

    pub fn is_liquid(&self) -> bool {
        self.account_type.is_liquid()
    }

    pub fn is_liability(&self) -> bool {
        self.account_type.is_liability()
    }
}

/// Net worth = sum of all balances. Liability accounts already carry negative
/// balances, so a plain sum yields assets minus liabilities.
pub fn net_worth(accounts: &[Account]) -> Cents {
    accounts.iter().map(|a| a.balance_cents).sum()
}

/// Liquidity = sum of balances restricted to immediately spendable types.
pub fn liquidity(accounts: &[Account]) -> Cents {
    accounts
        .iter()
        .filter(|a| a.is_liquid())
        .map(|a| a.balance_cents)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_roundtrip() {
        for at in [
            AccountType::Checking,
            AccountType::Savings,
            AccountType::Cash,
            AccountType::Investment,
            AccountType::Receivable,
            AccountType::CreditCard,
            AccountType::CreditLine,
            AccountType::Payable,
        ] {
            let parsed: AccountType = at.as_str().parse().unwrap();
            assert_eq!(at, parsed);
        }
    }

    #[test]
    fn test_liquid_classification() {
        assert!(AccountType::Checking.is_liquid());
        assert!(AccountType::Savings.is_liquid());
        assert!(AccountType::Cash.is_liquid());
        assert!(!AccountType::Investment.is_liquid());
        assert!(!AccountType::Receivable.is_liquid());
        assert!(!AccountType::CreditCard.is_liquid());
    }

    #[test]
    fn test_liability_classification_ignores_sign() {
        // A receivable can go negative transiently; it is still not a liability
        let receivable = Account::new("Loan to friend", AccountType::Receivable, -100);
        assert!(!receivable.is_liability());

        // A credit card with a zero balance is still a liability account
        let card = Account::new("Visa", AccountType::CreditCard, 0);
        assert!(card.is_liability());
    }

    #[test]
    fn test_net_worth_sums_signed_balances() {
        let accounts = vec![
            Account::new("Checking", AccountType::Checking, 500_000),
            Account::new("Brokerage", AccountType::Investment, 1_200_000),
            Account::new("Visa", AccountType::CreditCard, -150_000),
        ];

        assert_eq!(net_worth(&accounts), 1_550_000);
    }

    #[test]
    fn test_liquidity_restricted_to_spendable_types() {
        let accounts = vec![
            Account::new("Checking", AccountType::Checking, 500_000),
            Account::new("Wallet", AccountType::Cash, 20_000),
            Account::new("Brokerage", AccountType::Investment, 1_200_000),
            Account::new("Visa", AccountType::CreditCard, -150_000),
        ];

        assert_eq!(liquidity(&accounts), 520_000);
    }

    #[test]
    fn test_empty_accounts() {
        assert_eq!(net_worth(&[]), 0);
        assert_eq!(liquidity(&[]), 0);
    }
}

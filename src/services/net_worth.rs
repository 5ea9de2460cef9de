//! Net worth of a budget
//!
//! Accounts are grouped into assets, savings, cash and debt by their
//! service account type. Debt balances are already negative, so the net
//! worth is the plain sum of all balances.

use std::fmt;

use crate::models::{Account, Milliunits};

/// Net worth group of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NetWorthCategory {
    Assets,
    Savings,
    Cash,
    Debt,
}

impl NetWorthCategory {
    /// Display order
    pub const ALL: [Self; 4] = [Self::Assets, Self::Savings, Self::Cash, Self::Debt];

    /// Group for a service account type such as `checking` or `mortgage`
    pub fn of(account_type: &str) -> Self {
        match account_type {
            "checking" | "cash" => Self::Cash,
            "savings" => Self::Savings,
            "creditCard" | "lineOfCredit" | "otherLiability" | "mortgage" | "autoLoan"
            | "studentLoan" | "personalLoan" | "medicalDebt" | "otherDebt" => Self::Debt,
            _ => Self::Assets,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Savings => "Savings",
            Self::Cash => "Cash",
            Self::Debt => "Debt",
        }
    }
}

impl fmt::Display for NetWorthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One account's contribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetWorthEntry {
    pub name: String,
    pub category: NetWorthCategory,
    pub balance: Milliunits,
}

/// Balance of one group and its share of everything held or owed
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: NetWorthCategory,
    pub balance: Milliunits,
    /// Fraction of the summed absolute group balances, 0.0 to 1.0
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetWorth {
    entries: Vec<NetWorthEntry>,
}

impl NetWorth {
    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut entries: Vec<NetWorthEntry> = accounts
            .into_iter()
            .filter(|a| a.is_active())
            .map(|a| NetWorthEntry {
                name: a.name.clone(),
                category: NetWorthCategory::of(&a.account_type),
                balance: a.balance,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.balance.value().unsigned_abs().cmp(&a.balance.value().unsigned_abs()))
        });
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Milliunits {
        self.entries.iter().map(|e| e.balance).sum()
    }

    /// Accounts grouped by category, largest balances first
    pub fn entries(&self) -> &[NetWorthEntry] {
        &self.entries
    }

    /// Totals of every category, empty ones included
    pub fn categories(&self) -> Vec<CategoryTotal> {
        let balances: Vec<(NetWorthCategory, Milliunits)> = NetWorthCategory::ALL
            .iter()
            .map(|&category| {
                let balance: Milliunits = self
                    .entries
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.balance)
                    .sum();
                (category, balance)
            })
            .collect();

        let gross: f64 = balances
            .iter()
            .map(|(_, b)| b.value().unsigned_abs() as f64)
            .sum();

        balances
            .into_iter()
            .map(|(category, balance)| CategoryTotal {
                category,
                balance,
                weight: if gross == 0.0 {
                    0.0
                } else {
                    balance.value().unsigned_abs() as f64 / gross
                },
            })
            .collect()
    }
}

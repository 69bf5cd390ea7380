//! Budget tracking: an immutable expense ledger with derived aggregates
//!
//! Every operation returns a fresh state; aggregates are recomputed on
//! every read so nothing can go stale.

use crate::insight::Insight;
use artha_core::Number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Savings rate (percent of income) below which the save-more nudge fires
const SAVINGS_RATE_TARGET: i64 = 20;

/// The fixed expense category set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Food,
    Transport,
    Entertainment,
    Shopping,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "housing" => Ok(Category::Housing),
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "shopping" => Ok(Category::Shopping),
            "health" => Ok(Category::Health),
            "other" => Ok(Category::Other),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub title: String,
    pub amount: Number,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    pub monthly_income: Number,
    pub expenses: Vec<Expense>,
}

/// Group total for one category; zero-value categories are dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Number,
}

/// Aggregates derived from a [`BudgetState`], fresh on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_expense: Number,
    pub balance: Number,
    pub savings_rate_pct: Number,
    pub category_breakdown: Vec<CategoryTotal>,
}

impl BudgetState {
    pub fn new(monthly_income: Number) -> Self {
        Self {
            monthly_income,
            expenses: Vec::new(),
        }
    }

    /// Append an expense.
    ///
    /// An empty title or a non-positive amount is silently rejected: the
    /// state comes back unchanged and no error is surfaced. That is the
    /// documented policy, not an oversight.
    #[must_use]
    pub fn add_expense(&self, title: &str, amount: Number, category: Category) -> Self {
        let title = title.trim();
        if title.is_empty() || amount.is_zero() || amount.is_negative() {
            return self.clone();
        }

        let mut next = self.clone();
        next.expenses.push(Expense {
            title: title.to_string(),
            amount,
            category,
        });
        next
    }

    /// Remove the expense at `index`.
    ///
    /// The index addresses the full underlying list, never a truncated
    /// "recent" view a presentation layer might show. Out of range is a
    /// no-op.
    #[must_use]
    pub fn remove_expense(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.expenses.len() {
            next.expenses.remove(index);
        }
        next
    }

    #[must_use]
    pub fn clear_expenses(&self) -> Self {
        Self {
            monthly_income: self.monthly_income.clone(),
            expenses: Vec::new(),
        }
    }

    /// Derived aggregates, recomputed on every call - never cached
    pub fn summary(&self) -> BudgetSummary {
        let mut total_expense = Number::from_i64(0);
        for expense in &self.expenses {
            total_expense = total_expense.add(&expense.amount);
        }

        let balance = self.monthly_income.sub(&total_expense);

        let savings_rate_pct =
            if self.monthly_income.is_zero() || self.monthly_income.is_negative() {
                Number::from_i64(0)
            } else {
                balance
                    .mul(&Number::from_i64(100))
                    .checked_div(&self.monthly_income)
                    .unwrap_or_else(|_| Number::from_i64(0))
            };

        let category_breakdown = Category::ALL
            .iter()
            .filter_map(|&category| {
                let mut total = Number::from_i64(0);
                for expense in self.expenses.iter().filter(|e| e.category == category) {
                    total = total.add(&expense.amount);
                }
                if total.is_zero() {
                    None
                } else {
                    Some(CategoryTotal { category, total })
                }
            })
            .collect();

        BudgetSummary {
            total_expense,
            balance,
            savings_rate_pct,
            category_breakdown,
        }
    }
}

/// Advisory nudges for the current budget. First matching conditions
/// accumulate; the positive note only appears when nothing else fired.
pub fn budget_insights(state: &BudgetState) -> Vec<Insight> {
    let summary = state.summary();
    let mut insights = Vec::new();

    if summary.balance.is_negative() {
        insights.push(Insight::warning(
            "You're overspending! Consider reducing non-essential expenses.",
        ));
    } else if summary.savings_rate_pct < Number::from_i64(SAVINGS_RATE_TARGET) {
        insights.push(Insight::suggestion(
            "Aim to save at least 20% of your income for financial health.",
        ));
    }

    let food_spend = summary
        .category_breakdown
        .iter()
        .find(|c| c.category == Category::Food)
        .map(|c| c.total.clone())
        .unwrap_or_else(|| Number::from_i64(0));
    let food_limit = state.monthly_income.mul(&Number::from_ratio(3, 10));
    if food_spend > food_limit {
        insights.push(Insight::suggestion(
            "You're spending over 30% on food - try meal prepping to cut costs.",
        ));
    }

    if state.expenses.is_empty() {
        insights.push(Insight::suggestion(
            "Add your first expense to get personalized insights!",
        ));
    }

    if insights.is_empty() {
        insights.push(Insight::positive("Great job! Your budget is well-balanced."));
    }

    insights
}

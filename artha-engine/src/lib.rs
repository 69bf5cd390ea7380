//! Artha Financial Computation Engine
//!
//! Pure functions over numeric inputs: SIP projection, EMI amortization,
//! goal reverse-solve, and budget aggregation, plus the advisory insights
//! each calculator surfaces. No I/O, no internal state, deterministic -
//! identical inputs always produce identical outputs.
//!
//! The boundary error is a single kind, [`UndefinedResult`]: inputs that
//! violate a positivity precondition (or would divide by zero) produce an
//! explicit "no result" value instead of a NaN, an infinity, or a panic.
//! Formatting - currency grouping, percent display - belongs to callers.

mod helpers;

pub mod budget;
pub mod goal;
pub mod insight;
pub mod loan;
pub mod sip;

pub use artha_core::{Number, UndefinedResult};

pub use budget::{
    budget_insights, BudgetState, BudgetSummary, Category, CategoryTotal, Expense, UnknownCategory,
};
pub use goal::{goal_insights, solve_required_monthly, GoalInput, GoalPoint, GoalResult};
pub use insight::{Insight, InsightKind};
pub use loan::{amortize, loan_insights, LoanInput, LoanResult, ScheduleEntry};
pub use sip::{investment_insights, project_investment, InvestmentInput, InvestmentResult, YearPoint};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::budget::{budget_insights, BudgetState, Category};
    pub use crate::goal::{goal_insights, solve_required_monthly, GoalInput};
    pub use crate::insight::{Insight, InsightKind};
    pub use crate::loan::{amortize, loan_insights, LoanInput};
    pub use crate::sip::{investment_insights, project_investment, InvestmentInput};
    pub use crate::{Number, UndefinedResult};
}

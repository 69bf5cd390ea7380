//! Artha CLI
//!
//! Thin front end over the Artha financial engine:
//! - sip: project a monthly SIP
//! - emi: amortize a loan
//! - goal: reverse-solve the SIP for a target
//! - budget: aggregate an income/expense ledger
//!
//! This binary owns all parsing and formatting: argv strings become engine
//! arguments here, and engine numbers become ₹-grouped text (or JSON with
//! --json) here. The engine itself never formats or prints.

use artha_core::{Number, UndefinedResult};
use artha_engine::prelude::*;
use artha_engine::{GoalResult, InvestmentResult, LoanResult};
use serde_json::json;
use std::env;
use std::process::ExitCode;
use tracing::debug;

const USAGE: &str = "\
Usage: artha <command> [args] [--json]

Commands:
  sip    <monthly> <annual-return-%> <years>     Project a monthly SIP
  emi    <principal> <annual-rate-%> <years>     Amortize a loan
  goal   <target> <years> <annual-return-%>      Monthly SIP for a target
  budget <income> [title:category:amount ...]    Aggregate a budget

Categories: housing, food, transport, entertainment, shopping, health, other

Amounts accept decimals (e.g. 9.5). Years must be whole numbers.
Set RUST_LOG=debug for diagnostics on stderr.";

#[derive(Debug)]
enum CliError {
    /// Bad argv; print usage, exit 2
    Usage(String),
    /// Well-formed input outside the engine's numeric domain; exit 1
    Undefined(UndefinedResult),
}

impl From<UndefinedResult> for CliError {
    fn from(err: UndefinedResult) -> Self {
        CliError::Undefined(err)
    }
}

fn main() -> ExitCode {
    init_logging();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    let Some(command) = args.first().cloned() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let outcome = match command.as_str() {
        "sip" => run_sip(&args[1..], as_json),
        "emi" => run_emi(&args[1..], as_json),
        "goal" => run_goal(&args[1..], as_json),
        "budget" => run_budget(&args[1..], as_json),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            ExitCode::from(2)
        }
        Err(CliError::Undefined(err)) => {
            // Prompt state: the inputs were readable but the computation
            // is undefined for them
            eprintln!("No result: {}", err);
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    let level = match env::var("RUST_LOG").ok().as_deref() {
        Some("trace") => tracing::Level::TRACE,
        Some("debug") => tracing::Level::DEBUG,
        Some("warn") => tracing::Level::WARN,
        Some("error") => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ========== Commands ==========

fn run_sip(args: &[String], as_json: bool) -> Result<(), CliError> {
    let input = InvestmentInput {
        monthly_amount: parse_amount(arg(args, 0, "monthly amount")?, "monthly amount")?,
        annual_return_pct: parse_amount(arg(args, 1, "annual return")?, "annual return")?,
        years: parse_years(arg(args, 2, "years")?)?,
    };
    debug!(years = input.years, "projecting investment");

    let result = project_investment(&input)?;
    let insights = investment_insights(&input, &result);

    if as_json {
        print_json(&json!({ "result": result, "insights": insights }));
    } else {
        render_sip(&input, &result, &insights);
    }
    Ok(())
}

fn run_emi(args: &[String], as_json: bool) -> Result<(), CliError> {
    let input = LoanInput {
        principal: parse_amount(arg(args, 0, "principal")?, "principal")?,
        annual_rate_pct: parse_amount(arg(args, 1, "annual rate")?, "annual rate")?,
        years: parse_years(arg(args, 2, "years")?)?,
    };
    debug!(years = input.years, "amortizing loan");

    let result = amortize(&input)?;
    let insights = loan_insights(&input, &result);

    if as_json {
        print_json(&json!({ "result": result, "insights": insights }));
    } else {
        render_emi(&input, &result, &insights);
    }
    Ok(())
}

fn run_goal(args: &[String], as_json: bool) -> Result<(), CliError> {
    let input = GoalInput {
        target_amount: parse_amount(arg(args, 0, "target amount")?, "target amount")?,
        years: parse_years(arg(args, 1, "years")?)?,
        annual_return_pct: parse_amount(arg(args, 2, "annual return")?, "annual return")?,
    };
    debug!(years = input.years, "solving goal");

    let result = solve_required_monthly(&input)?;
    let insights = goal_insights(&input, &result);

    if as_json {
        print_json(&json!({ "result": result, "insights": insights }));
    } else {
        render_goal(&input, &result, &insights);
    }
    Ok(())
}

fn run_budget(args: &[String], as_json: bool) -> Result<(), CliError> {
    let income = parse_amount(arg(args, 0, "income")?, "income")?;

    let mut state = BudgetState::new(income);
    for entry in &args[1..] {
        let (title, category, amount) = parse_expense(entry)?;
        state = state.add_expense(&title, amount, category);
    }
    debug!(expenses = state.expenses.len(), "aggregating budget");

    let summary = state.summary();
    let insights = budget_insights(&state);

    if as_json {
        print_json(&json!({
            "state": state,
            "summary": summary,
            "insights": insights,
        }));
    } else {
        render_budget(&state, &insights);
    }
    Ok(())
}

// ========== Input collection ==========

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("Missing argument: {}", name)))
}

/// Malformed numerics are rejected here; they never reach the engine
fn parse_amount(raw: &str, name: &str) -> Result<Number, CliError> {
    Number::from_str(raw)
        .map_err(|_| CliError::Usage(format!("{} is not a number: '{}'", name, raw)))
}

fn parse_years(raw: &str) -> Result<u32, CliError> {
    raw.parse::<u32>()
        .map_err(|_| CliError::Usage(format!("years must be a whole number: '{}'", raw)))
}

/// One budget entry: "title:category:amount", e.g. "Rent:housing:15000"
fn parse_expense(raw: &str) -> Result<(String, Category, Number), CliError> {
    let parts: Vec<&str> = raw.splitn(3, ':').collect();
    if parts.len() != 3 {
        return Err(CliError::Usage(format!(
            "Expense must be title:category:amount, got '{}'",
            raw
        )));
    }

    let category: Category = parts[1]
        .parse()
        .map_err(|e| CliError::Usage(format!("{}", e)))?;
    let amount = parse_amount(parts[2], "expense amount")?;

    Ok((parts[0].to_string(), category, amount))
}

// ========== Rendering ==========

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn render_sip(input: &InvestmentInput, result: &InvestmentResult, insights: &[Insight]) {
    println!(
        "SIP projection: {}/month for {} years @ {}%",
        inr(&input.monthly_amount),
        input.years,
        input.annual_return_pct.as_decimal(1)
    );
    println!("  Total invested : {}", inr(&result.total_invested));
    println!("  Future value   : {}", inr(&result.future_value));
    println!("  Wealth gained  : {}", inr(&result.wealth_gained));

    println!();
    println!("  Year  Invested        Value");
    for point in &result.series {
        println!(
            "  {:>4}  {:<14}  {}",
            point.year,
            inr(&point.cumulative_invested),
            inr(&point.cumulative_value)
        );
    }

    render_insights(insights);
}

fn render_emi(input: &LoanInput, result: &LoanResult, insights: &[Insight]) {
    println!(
        "Loan: {} for {} years @ {}%",
        inr(&input.principal),
        input.years,
        input.annual_rate_pct.as_decimal(1)
    );
    println!(
        "  Monthly EMI    : {}",
        inr(&Number::from_i64(result.monthly_payment))
    );
    println!("  Total interest : {}", inr(&result.total_interest));
    println!("  Total payment  : {}", inr(&result.total_payment));

    println!();
    println!("  Year  Interest paid   Principal repaid");
    for entry in &result.schedule {
        println!(
            "  {:>4}  {:<14}  {}",
            entry.year,
            inr(&entry.cumulative_interest),
            inr(&entry.cumulative_principal)
        );
    }

    render_insights(insights);
}

fn render_goal(input: &GoalInput, result: &GoalResult, insights: &[Insight]) {
    println!(
        "Goal: {} in {} years @ {}%",
        inr(&input.target_amount),
        input.years,
        input.annual_return_pct.as_decimal(1)
    );
    println!(
        "  Monthly SIP    : {}",
        inr(&result.required_monthly_investment)
    );
    println!("  Total invested : {}", inr(&result.total_invested));

    println!();
    println!("  Year  Invested        Projected value");
    for point in &result.series {
        println!(
            "  {:>4}  {:<14}  {}",
            point.year,
            inr(&point.invested),
            inr(&point.projected_value)
        );
    }

    render_insights(insights);
}

fn render_budget(state: &BudgetState, insights: &[Insight]) {
    let summary = state.summary();

    println!("Budget: income {}", inr(&state.monthly_income));
    println!("  Total expenses : {}", inr(&summary.total_expense));
    println!("  Balance        : {}", inr(&summary.balance));
    println!(
        "  Savings rate   : {}%",
        summary.savings_rate_pct.as_decimal(1)
    );

    if !summary.category_breakdown.is_empty() {
        println!();
        println!("  Spending by category:");
        for group in &summary.category_breakdown {
            println!("    {:<14} {}", group.category.label(), inr(&group.total));
        }
    }

    if !state.expenses.is_empty() {
        println!();
        println!("  Recent expenses:");
        // Display slice only; removal indices always address the full list
        let start = state.expenses.len().saturating_sub(5);
        for (index, expense) in state.expenses.iter().enumerate().skip(start) {
            println!(
                "    [{}] {:<14} {:<14} {}",
                index,
                expense.title,
                expense.category.label(),
                inr(&expense.amount)
            );
        }
    }

    render_insights(insights);
}

fn render_insights(insights: &[Insight]) {
    if insights.is_empty() {
        return;
    }
    println!();
    println!("Insights:");
    for insight in insights {
        println!("  - {}", insight.message);
    }
}

// ========== Currency formatting ==========

/// Whole-rupee display with Indian digit grouping: 1161695 -> ₹11,61,695
fn inr(n: &Number) -> String {
    let rounded = n.round();
    match rounded.to_i64() {
        Some(value) => {
            let sign = if value < 0 { "-" } else { "" };
            format!("{}₹{}", sign, group_indian(&value.unsigned_abs().to_string()))
        }
        // Magnitudes past i64 still render their digits, ungrouped
        None => {
            let sign = if rounded.is_negative() { "-" } else { "" };
            format!("{}₹{}", sign, rounded.abs().as_decimal(0))
        }
    }
}

/// Last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("500"), "500");
        assert_eq!(group_indian("5000"), "5,000");
        assert_eq!(group_indian("600000"), "6,00,000");
        assert_eq!(group_indian("1161695"), "11,61,695");
        assert_eq!(group_indian("10000000"), "1,00,00,000");
    }

    #[test]
    fn test_inr_rounds_to_whole_units() {
        let n = Number::from_ratio(123_456_78, 100); // 123456.78
        assert_eq!(inr(&n), "₹1,23,457");
    }

    #[test]
    fn test_inr_negative() {
        let n = Number::from_i64(-27_000);
        assert_eq!(inr(&n), "-₹27,000");
    }

    #[test]
    fn test_inr_beyond_i64_keeps_digits() {
        // 10^20 overflows i64; the digits must still come through, never ₹0
        let n = Number::from_str("100000000000000000000").unwrap();
        assert_eq!(inr(&n), "₹100000000000000000000");

        let negative = Number::from_str("-100000000000000000000").unwrap();
        assert_eq!(inr(&negative), "-₹100000000000000000000");
    }

    #[test]
    fn test_parse_errors_are_debuggable() {
        // Tests lean on unwrap/unwrap_err, which needs Debug on the error
        let err = parse_amount("abc", "income").unwrap_err();
        assert!(format!("{:?}", err).contains("Usage"));
    }

    #[test]
    fn test_parse_expense() {
        let (title, category, amount) = parse_expense("Rent:housing:15000").unwrap();
        assert_eq!(title, "Rent");
        assert_eq!(category, Category::Housing);
        assert_eq!(amount.to_i64(), Some(15_000));
    }

    #[test]
    fn test_parse_expense_rejects_malformed() {
        assert!(parse_expense("Rent:15000").is_err());
        assert!(parse_expense("Rent:groceries:15000").is_err());
        assert!(parse_expense("Rent:food:abc").is_err());
    }

    #[test]
    fn test_parse_years_rejects_fractions() {
        assert!(parse_years("10").is_ok());
        assert!(parse_years("10.5").is_err());
        assert!(parse_years("-3").is_err());
    }
}

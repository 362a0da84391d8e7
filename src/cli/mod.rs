use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::allocator::BudgetAllocator;
use crate::error::ValidationError;
use crate::store::ExpenseStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn as_cli<S: ExpenseStore>(
    args: &[String],
    allocator: &mut BudgetAllocator<S>,
) -> Result<()> {
    let Some(command) = args.get(1) else {
        // Bare invocation shows the dashboard figures.
        return cli_summary(allocator);
    };
    match command.as_str() {
        "set-budget" => cli_set_budget(&args[2..], allocator),
        "add" => cli_add(&args[2..], allocator),
        "summary" | "s" => cli_summary(allocator),
        "list" | "ls" => cli_list(allocator),
        "remaining" => cli_remaining(&args[2..], allocator),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("perdiem {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("perdiem — spread a budget across the days of a period");
    println!();
    println!("Usage: perdiem [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Show the budget summary");
    println!("  set-budget <amount> <end-date>  Start a budget from today through <end-date>");
    println!("  add <desc> <amount> <category>  Log an expense dated today");
    println!("  summary                         Show total, daily share, and remaining figures");
    println!("  list                            List all logged expenses");
    println!("  remaining [YYYY-MM-DD]          Show the day's leftover allocation");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_set_budget<S: ExpenseStore>(
    args: &[String],
    allocator: &mut BudgetAllocator<S>,
) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: perdiem set-budget <amount> <end-date>");
    }
    let amount = parse_amount(&args[0])?;
    let end_date = parse_end_date(args.get(1))?;
    allocator.set_budget(amount, end_date)?;
    println!("Budget set: ${amount:.2} through {end_date}");
    Ok(())
}

fn cli_add<S: ExpenseStore>(args: &[String], allocator: &mut BudgetAllocator<S>) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: perdiem add <description> <amount> <category>");
    }
    let description = non_empty(&args[0], ValidationError::EmptyDescription)?;
    let amount = parse_amount(&args[1])?;
    let category = non_empty(&args[2], ValidationError::EmptyCategory)?;
    allocator.add_expense(description, amount, category)?;
    println!("Added: {description} - ${amount:.2} ({category})");
    Ok(())
}

fn cli_summary<S: ExpenseStore>(allocator: &BudgetAllocator<S>) -> Result<()> {
    println!("{}", allocator.budget_summary());
    Ok(())
}

fn cli_list<S: ExpenseStore>(allocator: &BudgetAllocator<S>) -> Result<()> {
    let expenses = allocator.expenses();
    if expenses.is_empty() {
        println!("No expenses logged.");
        return Ok(());
    }
    for e in expenses {
        println!("{} - ${:.2} ({}) on {}", e.description, e.amount, e.category, e.date);
    }
    Ok(())
}

fn cli_remaining<S: ExpenseStore>(
    args: &[String],
    allocator: &BudgetAllocator<S>,
) -> Result<()> {
    match args.first() {
        Some(raw) => {
            let day = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| anyhow::anyhow!("Invalid date: {raw} (expected YYYY-MM-DD)"))?;
            println!("Remaining for {day}: ${:.2}", allocator.remaining_daily_allocation(day));
        }
        None => {
            let remaining = allocator.remaining_daily_allocation_today();
            println!("Remaining for today: ${remaining:.2}");
        }
    }
    Ok(())
}

// ── Boundary validation ──────────────────────────────────────

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}

fn parse_end_date(arg: Option<&String>) -> Result<NaiveDate, ValidationError> {
    // An absent or unparsable end date both mean no usable date was chosen.
    let raw = arg.ok_or(ValidationError::MissingEndDate)?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ValidationError::MissingEndDate)
}

fn non_empty(raw: &str, err: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed)
    }
}

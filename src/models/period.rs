use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The single active budget period: a total amount spread across the days
/// from `start_date` through `end_date`, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPeriod {
    pub total_budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Derived share of the budget per day. Only ever shrinks after an
    /// overspend day; it is never raised back within a period.
    pub allocation_per_day: Decimal,
    /// Total budget minus all logged expenses. Signed: overspending drives
    /// it negative and it stays authoritative, never clamped.
    pub total_remaining_budget: Decimal,
}

impl BudgetPeriod {
    /// Start a fresh period beginning on `start_date` (today, by contract).
    pub fn start(amount: Decimal, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let total_days = (end_date - start_date).num_days() + 1;
        let allocation_per_day = if total_days > 0 {
            amount / Decimal::from(total_days)
        } else {
            Decimal::ZERO
        };
        Self {
            total_budget: amount,
            start_date,
            end_date,
            allocation_per_day,
            total_remaining_budget: amount,
        }
    }

    /// A zeroed single-day period, used before any budget has been set.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            total_budget: Decimal::ZERO,
            start_date: today,
            end_date: today,
            allocation_per_day: Decimal::ZERO,
            total_remaining_budget: Decimal::ZERO,
        }
    }

    /// Days strictly after `date` up to and including `end_date`.
    pub fn days_remaining_after(&self, date: NaiveDate) -> i64 {
        (self.end_date - date).num_days()
    }
}

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{BudgetPeriod, BudgetSummary, Expense};
use crate::store::{ExpenseStore, StoreError};

/// Owns the single active budget period and its expense list, and derives
/// the daily allocation figures from them. The injected store is a durable
/// mirror the allocator writes through on every mutation and resumes from
/// at construction.
///
/// State is private and mutations are ordered; a caller sharing one
/// allocator across threads must serialize access itself.
pub struct BudgetAllocator<S: ExpenseStore> {
    store: S,
    period: BudgetPeriod,
    expenses: Vec<Expense>,
    fixed_today: Option<NaiveDate>,
}

impl<S: ExpenseStore> BudgetAllocator<S> {
    /// Resumes the period and expenses persisted in `store`, or starts from
    /// a zeroed single-day period when nothing is stored yet.
    pub fn new(store: S) -> Result<Self, StoreError> {
        Self::build(store, None)
    }

    /// Like `new` but with a pinned calendar date instead of the wall clock.
    #[cfg(test)]
    pub fn with_today(store: S, today: NaiveDate) -> Result<Self, StoreError> {
        Self::build(store, Some(today))
    }

    fn build(store: S, fixed_today: Option<NaiveDate>) -> Result<Self, StoreError> {
        let today = fixed_today.unwrap_or_else(|| Local::now().date_naive());
        let period = store
            .load_budget_period()?
            .unwrap_or_else(|| BudgetPeriod::empty(today));
        let expenses = store.load_expenses()?;
        Ok(Self {
            store,
            period,
            expenses,
            fixed_today,
        })
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Establishes a new period starting today and ending on `end_date`,
    /// replacing any stored one. Inputs are pre-validated by the caller.
    ///
    /// Remaining resets to the full new amount even when expenses from an
    /// earlier period are still resident, so tracked overspend does not
    /// carry into the new period.
    pub fn set_budget(&mut self, amount: Decimal, end_date: NaiveDate) -> Result<(), StoreError> {
        self.period = BudgetPeriod::start(amount, self.today(), end_date);
        self.store.save_budget_period(&self.period)?;
        // Expenses already logged today may exceed the fresh share.
        self.recalculate_daily_allocation()
    }

    /// Logs an expense dated today, debits the remaining budget, and
    /// redistributes the daily share if today is now overspent. A negative
    /// amount behaves as a refund.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: Decimal,
        category: &str,
    ) -> Result<(), StoreError> {
        let id = self.expenses.iter().map(|e| e.id).max().map_or(1, |m| m + 1);
        let expense = Expense::new(
            id,
            description.to_string(),
            amount,
            category.to_string(),
            self.today(),
        );
        self.store.save_expense(&expense)?;
        self.expenses.push(expense);
        self.period.total_remaining_budget -= amount;
        self.store
            .update_remaining_budget(self.period.total_remaining_budget)?;
        self.recalculate_daily_allocation()
    }

    /// When today's spend exceeds today's share, the shortfall is absorbed
    /// by shrinking every future day's share; today's own allocation stays
    /// nominally what it was. The share only ever shrinks within a period,
    /// and a period already in deficit is left untouched.
    fn recalculate_daily_allocation(&mut self) -> Result<(), StoreError> {
        let today = self.today();
        let daily_spent = self.spent_on(today);
        if daily_spent <= self.period.allocation_per_day {
            return Ok(());
        }
        if self.period.total_remaining_budget < Decimal::ZERO {
            // Already in deficit; leave the allocation alone.
            return Ok(());
        }
        let remaining_days = self.period.days_remaining_after(today);
        self.period.allocation_per_day =
            if remaining_days > 0 && self.period.total_remaining_budget > Decimal::ZERO {
                self.period.total_remaining_budget / Decimal::from(remaining_days)
            } else {
                Decimal::ZERO
            };
        self.store.save_budget_period(&self.period)
    }

    fn spent_on(&self, date: NaiveDate) -> Decimal {
        self.expenses
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.amount)
            .sum()
    }

    /// The day's allocation minus the day's spend. Negative on overspend.
    pub fn remaining_daily_allocation(&self, date: NaiveDate) -> Decimal {
        self.period.allocation_per_day - self.spent_on(date)
    }

    pub fn remaining_daily_allocation_today(&self) -> Decimal {
        self.remaining_daily_allocation(self.today())
    }

    pub fn total_remaining(&self) -> Decimal {
        self.period.total_remaining_budget
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        BudgetSummary {
            total_budget: self.period.total_budget,
            allocation_per_day: self.period.allocation_per_day,
            remaining_today: self.remaining_daily_allocation_today(),
            remaining_overall: self.total_remaining(),
        }
    }

    /// Expenses for the current session, insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests;

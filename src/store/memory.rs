use rust_decimal::Decimal;

use super::{ExpenseStore, StoreError};
use crate::models::{BudgetPeriod, Expense};

/// In-memory store. Backs tests and any caller that does not want a
/// database on disk; same contract as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    period: Option<BudgetPeriod>,
    expenses: Vec<Expense>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for MemoryStore {
    fn load_budget_period(&self) -> Result<Option<BudgetPeriod>, StoreError> {
        Ok(self.period.clone())
    }

    fn save_budget_period(&mut self, period: &BudgetPeriod) -> Result<(), StoreError> {
        self.period = Some(period.clone());
        Ok(())
    }

    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self.expenses.clone())
    }

    fn save_expense(&mut self, expense: &Expense) -> Result<(), StoreError> {
        self.expenses.push(expense.clone());
        Ok(())
    }

    fn update_remaining_budget(&mut self, amount: Decimal) -> Result<(), StoreError> {
        if let Some(period) = self.period.as_mut() {
            period.total_remaining_budget = amount;
        }
        Ok(())
    }
}

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BudgetPeriod, Expense};

/// Infrastructure failure in the persistence layer. Surfaced to the caller
/// instead of being swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),
}

/// Durable mirror of the single active budget period and its expenses.
///
/// The allocator is the authority during a session; the store is what it
/// resumes from. Any backend works behind this contract: the expense log is
/// append-only and at most one period record ever persists.
pub trait ExpenseStore {
    fn load_budget_period(&self) -> Result<Option<BudgetPeriod>, StoreError>;

    /// Replaces the stored period record (delete-then-insert).
    fn save_budget_period(&mut self, period: &BudgetPeriod) -> Result<(), StoreError>;

    /// All expenses in insertion order.
    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError>;

    /// Appends one expense. There is no update or delete.
    fn save_expense(&mut self, expense: &Expense) -> Result<(), StoreError>;

    /// Persists just the remaining-budget figure of the stored period.
    fn update_remaining_budget(&mut self, amount: Decimal) -> Result<(), StoreError>;
}

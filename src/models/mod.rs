mod expense;
mod period;
mod summary;

pub use expense::Expense;
pub use period::BudgetPeriod;
pub use summary::BudgetSummary;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single logged expense. Immutable once created; expenses are never
/// edited or deleted, only appended for the lifetime of the period.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        id: i64,
        description: String,
        amount: Decimal,
        category: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description,
            amount,
            category,
            date,
        }
    }
}

use rust_decimal::Decimal;

/// The four derived figures of the active period. Callers read these fields
/// directly; the `Display` impl below is presentation only and is never
/// parsed back into data.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub allocation_per_day: Decimal,
    /// Today's allocation minus today's spend. Negative on an overspend day.
    pub remaining_today: Decimal,
    /// Remaining across the whole period. Signed.
    pub remaining_overall: Decimal,
}

impl std::fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Budget: ${:.2}", self.total_budget)?;
        writeln!(f, "Daily Allocation: ${:.2}", self.allocation_per_day)?;
        writeln!(f, "Remaining for today: ${:.2}", self.remaining_today)?;
        write!(f, "Remaining Amount: ${:.2}", self.remaining_overall)
    }
}

#![allow(clippy::unwrap_used)]

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::BudgetAllocator;
use crate::store::{ExpenseStore, MemoryStore};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const TODAY: &str = "2024-03-01";

fn allocator() -> BudgetAllocator<MemoryStore> {
    BudgetAllocator::with_today(MemoryStore::new(), date(TODAY)).unwrap()
}

/// Budget of 700 over a 7-day window starting today.
fn week_of_700() -> BudgetAllocator<MemoryStore> {
    let mut a = allocator();
    a.set_budget(dec!(700), date(TODAY) + Duration::days(6)).unwrap();
    a
}

// ── set_budget ────────────────────────────────────────────────

#[test]
fn test_set_budget_allocation() {
    let a = week_of_700();
    assert_eq!(a.budget_summary().allocation_per_day, dec!(100));
    assert_eq!(a.total_remaining(), dec!(700));
}

#[test]
fn test_set_budget_single_day() {
    let mut a = allocator();
    a.set_budget(dec!(1000), date(TODAY)).unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, dec!(1000));
    assert_eq!(a.total_remaining(), dec!(1000));
}

#[test]
fn test_set_budget_end_before_today() {
    let mut a = allocator();
    a.set_budget(dec!(500), date("2024-02-20")).unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, Decimal::ZERO);
    assert_eq!(a.total_remaining(), dec!(500));
}

#[test]
fn test_set_budget_persists_period() {
    let a = week_of_700();
    let store = a.into_store();
    let period = store.load_budget_period().unwrap().unwrap();
    assert_eq!(period.total_budget, dec!(700));
    assert_eq!(period.start_date, date(TODAY));
    assert_eq!(period.end_date, date("2024-03-07"));
    assert_eq!(period.allocation_per_day, dec!(100));
}

// ── add_expense ───────────────────────────────────────────────

#[test]
fn test_expense_decreases_remaining_exactly() {
    let mut a = week_of_700();
    a.add_expense("Lunch", dec!(12.34), "Food").unwrap();
    assert_eq!(a.total_remaining(), dec!(687.66));
    a.add_expense("Bus", dec!(2.66), "Transportation").unwrap();
    assert_eq!(a.total_remaining(), dec!(685));
}

#[test]
fn test_expense_ids_start_at_one_and_increase() {
    let mut a = week_of_700();
    a.add_expense("One", dec!(1), "Other").unwrap();
    a.add_expense("Two", dec!(2), "Other").unwrap();
    a.add_expense("Three", dec!(3), "Other").unwrap();
    let ids: Vec<i64> = a.expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let descriptions: Vec<&str> = a.expenses().iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["One", "Two", "Three"]);
}

#[test]
fn test_expense_dated_today() {
    let mut a = week_of_700();
    a.add_expense("Coffee", dec!(4.50), "Food").unwrap();
    assert_eq!(a.expenses()[0].date, date(TODAY));
}

#[test]
fn test_negative_amount_is_a_refund() {
    let mut a = week_of_700();
    a.add_expense("Groceries", dec!(80), "Food").unwrap();
    a.add_expense("Returned item", dec!(-30), "Shopping").unwrap();
    assert_eq!(a.total_remaining(), dec!(650));
}

#[test]
fn test_expense_persists_through_store() {
    let mut a = week_of_700();
    a.add_expense("Lunch", dec!(25), "Food").unwrap();
    let store = a.into_store();
    let stored = store.load_expenses().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, 1);
    assert_eq!(stored[0].amount, dec!(25));
    let period = store.load_budget_period().unwrap().unwrap();
    assert_eq!(period.total_remaining_budget, dec!(675));
}

// ── Recalculation rule ────────────────────────────────────────

#[test]
fn test_overspend_shrinks_future_share() {
    let mut a = week_of_700();
    a.add_expense("Concert tickets", dec!(150), "Entertainment").unwrap();
    // 150 spent against a 100 share: the remaining 550 is re-spread over
    // the 6 days after today.
    assert_eq!(a.total_remaining(), dec!(550));
    let summary = a.budget_summary();
    assert_eq!(summary.allocation_per_day.round_dp(2), dec!(91.67));
    // Today is still measured against its original 100 share.
    assert_eq!(summary.remaining_today, dec!(-50));
}

#[test]
fn test_spending_within_share_leaves_allocation_alone() {
    let mut a = week_of_700();
    a.add_expense("Groceries", dec!(40), "Food").unwrap();
    a.add_expense("Dinner", dec!(30), "Food").unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, dec!(100));
    assert_eq!(a.remaining_daily_allocation_today(), dec!(30));
}

#[test]
fn test_recalculation_is_idempotent() {
    let mut a = week_of_700();
    a.add_expense("Concert tickets", dec!(150), "Entertainment").unwrap();
    let after_first = a.budget_summary().allocation_per_day;
    // A zero-amount expense changes nothing the rule reads, so the
    // allocation must come out unchanged.
    a.add_expense("Price match", dec!(0), "Other").unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, after_first);
}

#[test]
fn test_allocation_never_increases() {
    let mut a = week_of_700();
    let mut previous = a.budget_summary().allocation_per_day;
    for amount in [dec!(30), dec!(90), dec!(10), dec!(200), dec!(5)] {
        a.add_expense("Spend", amount, "Other").unwrap();
        let current = a.budget_summary().allocation_per_day;
        assert!(current <= previous, "{current} > {previous}");
        previous = current;
    }
}

#[test]
fn test_deficit_freezes_allocation() {
    let mut a = allocator();
    a.set_budget(dec!(100), date(TODAY) + Duration::days(6)).unwrap();
    let original = a.budget_summary().allocation_per_day;
    // Blow through the whole budget in one go: remaining lands negative
    // before the rule runs, so the share is left at its original value.
    a.add_expense("Repair bill", dec!(150), "Other").unwrap();
    assert_eq!(a.total_remaining(), dec!(-50));
    assert_eq!(a.budget_summary().allocation_per_day, original);
    // Still in deficit: further overspend leaves the share untouched too.
    a.add_expense("More", dec!(40), "Other").unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, original);
}

#[test]
fn test_overspend_exhausting_budget_zeroes_allocation() {
    let mut a = allocator();
    a.set_budget(dec!(100), date(TODAY) + Duration::days(6)).unwrap();
    // Spend exactly everything: remaining is 0, not negative, so the rule
    // still runs and lands on a zero share.
    a.add_expense("Everything", dec!(100), "Other").unwrap();
    assert_eq!(a.total_remaining(), Decimal::ZERO);
    assert_eq!(a.budget_summary().allocation_per_day, Decimal::ZERO);
}

#[test]
fn test_overspend_past_end_date_zeroes_allocation() {
    let mut a = allocator();
    // Window already over: the share starts at zero.
    a.set_budget(dec!(500), date("2024-02-20")).unwrap();
    // Any spend beats a zero share, and with no future days to absorb it
    // the share stays pinned at zero.
    a.add_expense("Late charge", dec!(10), "Other").unwrap();
    assert_eq!(a.budget_summary().allocation_per_day, Decimal::ZERO);
    assert_eq!(a.total_remaining(), dec!(490));
}

// ── Queries ───────────────────────────────────────────────────

#[test]
fn test_remaining_daily_allocation_other_date() {
    let mut a = week_of_700();
    a.add_expense("Groceries", dec!(40), "Food").unwrap();
    // A day with no spend reports the full share.
    assert_eq!(a.remaining_daily_allocation(date("2024-03-03")), dec!(100));
}

#[test]
fn test_budget_summary_fields() {
    let mut a = week_of_700();
    a.add_expense("Groceries", dec!(40), "Food").unwrap();
    let s = a.budget_summary();
    assert_eq!(s.total_budget, dec!(700));
    assert_eq!(s.allocation_per_day, dec!(100));
    assert_eq!(s.remaining_today, dec!(60));
    assert_eq!(s.remaining_overall, dec!(660));
}

#[test]
fn test_fresh_allocator_is_zeroed() {
    let a = allocator();
    let s = a.budget_summary();
    assert_eq!(s.total_budget, Decimal::ZERO);
    assert_eq!(s.allocation_per_day, Decimal::ZERO);
    assert_eq!(s.remaining_overall, Decimal::ZERO);
    assert!(a.expenses().is_empty());
}

// ── Rebudget ──────────────────────────────────────────────────

#[test]
fn test_rebudget_resets_remaining_to_new_amount() {
    // Documented behavior: establishing a new budget discards tracked
    // overspend, resetting remaining to the full new amount even though
    // today's expenses are still resident.
    let mut a = allocator();
    a.set_budget(dec!(100), date(TODAY)).unwrap();
    a.add_expense("Blowout", dec!(150), "Other").unwrap();
    assert_eq!(a.total_remaining(), dec!(-50));

    a.set_budget(dec!(700), date(TODAY) + Duration::days(6)).unwrap();
    assert_eq!(a.total_remaining(), dec!(700));
    // The resident 150 still counts as today's spend, so the fresh 100
    // share is immediately re-spread: 700 over the 6 later days.
    let alloc = a.budget_summary().allocation_per_day;
    assert_eq!(alloc.round_dp(2), dec!(116.67));
}

// ── Resume from store ─────────────────────────────────────────

#[test]
fn test_resumes_persisted_state() {
    let mut a = week_of_700();
    a.add_expense("Lunch", dec!(25), "Food").unwrap();
    a.add_expense("Bus", dec!(5), "Transportation").unwrap();
    let store = a.into_store();

    let mut resumed = BudgetAllocator::with_today(store, date(TODAY)).unwrap();
    assert_eq!(resumed.total_remaining(), dec!(670));
    assert_eq!(resumed.expenses().len(), 2);
    assert_eq!(resumed.budget_summary().allocation_per_day, dec!(100));
    // Ids keep climbing from the persisted maximum.
    resumed.add_expense("Coffee", dec!(4), "Food").unwrap();
    assert_eq!(resumed.expenses().last().unwrap().id, 3);
}

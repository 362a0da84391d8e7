use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::{schema, ExpenseStore, StoreError};
use crate::models::{BudgetPeriod, Expense};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteStore {
    pub(super) conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub(super) fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl ExpenseStore for SqliteStore {
    fn load_budget_period(&self) -> Result<Option<BudgetPeriod>, StoreError> {
        let result = self.conn.query_row(
            "SELECT total_budget, start_date, end_date, allocation_per_day, remaining_budget
             FROM budget LIMIT 1",
            [],
            |row| {
                let total: String = row.get(0)?;
                let start: String = row.get(1)?;
                let end: String = row.get(2)?;
                let allocation: String = row.get(3)?;
                let remaining: String = row.get(4)?;
                Ok(BudgetPeriod {
                    total_budget: Decimal::from_str(&total).unwrap_or_default(),
                    start_date: parse_date(1, &start)?,
                    end_date: parse_date(2, &end)?,
                    allocation_per_day: Decimal::from_str(&allocation).unwrap_or_default(),
                    total_remaining_budget: Decimal::from_str(&remaining).unwrap_or_default(),
                })
            },
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_budget_period(&mut self, period: &BudgetPeriod) -> Result<(), StoreError> {
        // Replace semantics: at most one period row ever persists.
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM budget", [])?;
        tx.execute(
            "INSERT INTO budget (total_budget, start_date, end_date, allocation_per_day, remaining_budget)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                period.total_budget.to_string(),
                period.start_date.format(DATE_FORMAT).to_string(),
                period.end_date.format(DATE_FORMAT).to_string(),
                period.allocation_per_day.to_string(),
                period.total_remaining_budget.to_string(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, description, amount, category, date FROM expenses ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            let date_str: String = row.get(4)?;
            Ok(Expense {
                id: row.get(0)?,
                description: row.get(1)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(3)?,
                date: parse_date(4, &date_str)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn save_expense(&mut self, expense: &Expense) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO expenses (id, description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.id,
                expense.description,
                expense.amount.to_string(),
                expense.category,
                expense.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    fn update_remaining_budget(&mut self, amount: Decimal) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE budget SET remaining_budget = ?1",
            params![amount.to_string()],
        )?;
        Ok(())
    }
}

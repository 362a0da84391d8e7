pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY,
    description TEXT NOT NULL,
    amount      TEXT NOT NULL,
    category    TEXT NOT NULL,
    date        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

CREATE TABLE IF NOT EXISTS budget (
    total_budget       TEXT NOT NULL,
    start_date         TEXT NOT NULL,
    end_date           TEXT NOT NULL,
    allocation_per_day TEXT NOT NULL,
    remaining_budget   TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

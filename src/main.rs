mod allocator;
mod cli;
mod error;
mod models;
mod store;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let store = store::SqliteStore::open(&db_path)?;
    let mut allocator = allocator::BudgetAllocator::new(store)
        .context("Failed to load budget state")?;
    cli::as_cli(&args, &mut allocator)
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "perdiem", "Perdiem")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("perdiem.db"))
}

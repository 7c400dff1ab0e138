use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the schema dump
    #[arg(short, long)]
    pub schema: PathBuf,
}

impl CheckCommand {
    /// Parse-only validation with a per-table summary
    pub fn run(&self) -> Result<()> {
        let schema = dalgen_schema::parse_file(&self.schema).unwrap_or_exit();

        if let Some(database) = &schema.database {
            println!("Database: {}", database);
        }
        println!("Tables ({}):", schema.tables.len());
        for table in &schema.tables {
            let indexes = table.indexes.len()
                + table.unique_indexes.len()
                + table.union_indexes.len()
                + table.unique_union_indexes.len();
            println!(
                "  {} ({} columns, {} indexes)",
                table.db_name,
                table.columns.len(),
                indexes
            );
        }

        Ok(())
    }
}

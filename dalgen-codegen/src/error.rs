use miette::Diagnostic;
use thiserror::Error;

/// Result type for emission planning.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("table '{table}' has no primary key")]
    #[diagnostic(
        code(dalgen::missing_primary_key),
        help("update, delete, and by-key select operations require a PRIMARY KEY declaration")
    )]
    MissingPrimaryKey { table: String },
}

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema parsing (boxed to keep the Err arm small).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table '{table}' is never closed")]
    #[diagnostic(
        code(dalgen::unterminated_table),
        help("every CREATE TABLE block must end with a line starting with ')'")
    )]
    UnterminatedTable {
        #[source_code]
        src: NamedSource<String>,
        #[label("block opened here")]
        span: SourceSpan,
        table: String,
    },

    #[error("primary key of table '{table}' references unknown column '{column}'")]
    #[diagnostic(code(dalgen::unknown_primary_column))]
    UnknownPrimaryColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("no such column in this table")]
        span: SourceSpan,
        table: String,
        column: String,
    },

    #[error("index '{index}' of table '{table}' references unknown column '{column}'")]
    #[diagnostic(code(dalgen::unknown_index_column))]
    UnknownIndexColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("no such column in this table")]
        span: SourceSpan,
        table: String,
        index: String,
        column: String,
    },

    #[error("malformed CREATE TABLE line")]
    #[diagnostic(
        code(dalgen::malformed_table),
        help("the table name must be backtick-quoted")
    )]
    MalformedTable {
        #[source_code]
        src: NamedSource<String>,
        #[label("no quoted table name here")]
        span: SourceSpan,
    },

    #[error("malformed column definition in table '{table}'")]
    #[diagnostic(
        code(dalgen::malformed_column),
        help("a column line needs at least a quoted name and a type")
    )]
    MalformedColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot split this into name and type")]
        span: SourceSpan,
        table: String,
    },

    #[error("malformed key declaration in table '{table}'")]
    #[diagnostic(
        code(dalgen::malformed_key),
        help("a key declaration needs a parenthesized column list")
    )]
    MalformedKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("no column list here")]
        span: SourceSpan,
        table: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Io {
            path: path.into(),
            source,
        })
    }
}

//! Schema-dump parsing for the dalgen generator.
//!
//! This crate turns the textual `CREATE TABLE` blocks of a MySQL-dialect
//! schema dump into an ordered, validated [`Schema`] model. Parsing is a
//! single forward scan over lines: every line inside a table block is
//! classified into a closed set of shapes ([`line::LineKind`]) and either
//! contributes to the model or is explicitly ignorable. Any structural
//! violation aborts the run with a spanned diagnostic; there is no partial
//! output.

pub mod error;
pub mod line;
pub mod model;
pub mod parse;

pub use error::{Error, Result};
pub use model::{Column, Index, Schema, Table, UnionIndex};
pub use parse::{parse, parse_file};

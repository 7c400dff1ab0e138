//! The parsed schema model.
//!
//! All models are built during the single parse pass and read-only afterward.
//! Index declarations reference columns by position into the owning table's
//! column list, so a column can never be shared across tables.

use dalgen_core::to_pascal_case;

/// Column names recognized purely by exact match and special-cased by
/// emission policy regardless of their declared type.
pub const CREATE_TIME: &str = "create_time";
pub const UPDATE_TIME: &str = "update_time";
pub const UPDATE_VERSION: &str = "update_version";

/// A parsed column definition.
#[derive(Debug, Clone)]
pub struct Column {
    /// Name as written in the schema.
    pub db_name: String,
    /// PascalCase identifier used for generated symbols.
    pub ident: String,
    /// Declared type with any size suffix stripped (e.g. "bigint").
    pub db_type: String,
    /// Parenthesized size annotation, if present (e.g. "20" or "10,2").
    pub size: Option<String>,
    pub not_null: bool,
    pub unsigned: bool,
    pub auto_increment: bool,
}

impl Column {
    pub fn new(db_name: impl Into<String>, db_type: impl Into<String>) -> Self {
        let db_name = db_name.into();
        let ident = to_pascal_case(&db_name);
        Self {
            db_name,
            ident,
            db_type: db_type.into(),
            size: None,
            not_null: false,
            unsigned: false,
            auto_increment: false,
        }
    }
}

/// A single-column index. `column` is a position into the owning table's
/// column list.
#[derive(Debug, Clone)]
pub struct Index {
    pub name: String,
    pub column: usize,
}

/// A compound index over an ordered list of columns. The declared order is
/// semantically significant: it determines which column prefixes are usable
/// lookups.
#[derive(Debug, Clone)]
pub struct UnionIndex {
    pub name: String,
    pub column_names: Vec<String>,
    pub columns: Vec<usize>,
}

/// A parsed table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub db_name: String,
    pub ident: String,
    pub columns: Vec<Column>,
    pub primary: Option<usize>,
    pub create_time: Option<usize>,
    pub update_time: Option<usize>,
    pub update_version: Option<usize>,
    /// Non-unique single-column indexes.
    pub indexes: Vec<Index>,
    /// Unique single-column indexes.
    pub unique_indexes: Vec<Index>,
    /// Non-unique compound indexes.
    pub union_indexes: Vec<UnionIndex>,
    /// Unique compound indexes.
    pub unique_union_indexes: Vec<UnionIndex>,
}

impl Table {
    pub fn new(db_name: impl Into<String>) -> Self {
        let db_name = db_name.into();
        let ident = to_pascal_case(&db_name);
        Self {
            db_name,
            ident,
            ..Self::default()
        }
    }

    /// Append a column, capturing the reserved audit/version columns.
    pub fn add_column(&mut self, column: Column) {
        let pos = self.columns.len();
        match column.db_name.as_str() {
            CREATE_TIME => self.create_time = Some(pos),
            UPDATE_TIME => self.update_time = Some(pos),
            UPDATE_VERSION => self.update_version = Some(pos),
            _ => {}
        }
        self.columns.push(column);
    }

    /// Position of the column with the given schema name, if parsed already.
    pub fn find_column(&self, db_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.db_name == db_name)
    }

    pub fn column(&self, pos: usize) -> &Column {
        &self.columns[pos]
    }

    /// The primary column, for tables that declared one.
    pub fn primary_column(&self) -> Option<&Column> {
        self.primary.map(|pos| &self.columns[pos])
    }

    /// Whether the column at `pos` participates in any unique index, single
    /// or compound.
    pub fn is_unique_indexed(&self, pos: usize) -> bool {
        self.unique_indexes.iter().any(|i| i.column == pos)
            || self
                .unique_union_indexes
                .iter()
                .any(|u| u.columns.contains(&pos))
    }

    /// Whether the table declares any unique index at all.
    pub fn has_unique_index(&self) -> bool {
        !self.unique_indexes.is_empty() || !self.unique_union_indexes.is_empty()
    }
}

/// The full parse result: tables in declaration order plus the optional
/// database name extracted from the dump's metadata line.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub database: Option<String>,
    pub tables: Vec<Table>,
}

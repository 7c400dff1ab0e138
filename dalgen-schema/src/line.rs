//! Line classification and tokenization for the dump format.
//!
//! Every line is classified into one of a closed set of shapes before any
//! state changes, so parser coverage is testable and unexpected input is
//! detectable instead of silently dropped.

/// The recognized shapes of a (trimmed) dump line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The dump's metadata line naming the source database.
    DatabaseMarker,
    /// `CREATE TABLE `name` (` — opens a table block.
    TableStart,
    /// A column definition (starts with a backtick-quoted identifier).
    ColumnDef,
    /// `PRIMARY KEY (...)`.
    PrimaryKey,
    /// `UNIQUE KEY name (...)`.
    UniqueKey,
    /// `KEY name (...)` — a plain, non-unique index.
    Key,
    /// A line starting with `)` — closes the table block.
    TableEnd,
    /// Comment or engine-option noise.
    Ignorable,
}

/// Classify a trimmed line. `inside_table` selects between the top-level
/// shapes and the in-block shapes; the in-block checks run in priority
/// order so `PRIMARY KEY`/`UNIQUE KEY` win over the bare `KEY` prefix.
pub fn classify(trimmed: &str, inside_table: bool) -> LineKind {
    if inside_table {
        if trimmed.starts_with(')') {
            LineKind::TableEnd
        } else if trimmed.starts_with('`') {
            LineKind::ColumnDef
        } else if trimmed.starts_with("PRIMARY KEY") {
            LineKind::PrimaryKey
        } else if trimmed.starts_with("UNIQUE KEY") {
            LineKind::UniqueKey
        } else if trimmed.starts_with("KEY") {
            LineKind::Key
        } else {
            LineKind::Ignorable
        }
    } else if trimmed.contains("Database: ") {
        LineKind::DatabaseMarker
    } else if trimmed.starts_with("CREATE TABLE ") {
        LineKind::TableStart
    } else {
        LineKind::Ignorable
    }
}

/// Extract the database name from a metadata line: its last
/// whitespace-separated token.
pub fn database_name(trimmed: &str) -> Option<&str> {
    trimmed.split_whitespace().last()
}

/// Extract the backtick-quoted table name from a `CREATE TABLE` line.
pub fn table_name(trimmed: &str) -> Option<&str> {
    quoted(trimmed)
}

/// The pieces of a tokenized column-definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnParts<'a> {
    pub name: &'a str,
    pub db_type: &'a str,
    pub size: Option<&'a str>,
    pub not_null: bool,
    pub unsigned: bool,
    pub auto_increment: bool,
}

/// Tokenize a column-definition line.
///
/// Token 0 is the quoted name, token 1 the declared type with an optional
/// parenthesized size suffix. Flags are matched on token identity (after
/// stripping a trailing comma), never by substring search: `NOT NULL` as an
/// adjacent token pair, `unsigned` and `AUTO_INCREMENT` as exact tokens.
///
/// Returns `None` when the line has fewer than two tokens.
pub fn column_parts(trimmed: &str) -> Option<ColumnParts<'_>> {
    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .collect();
    if tokens.len() < 2 {
        return None;
    }

    let name = tokens[0].trim_matches('`');
    let (db_type, size) = split_size(tokens[1]);

    let not_null = tokens
        .windows(2)
        .any(|pair| pair[0] == "NOT" && pair[1] == "NULL");
    let unsigned = tokens.contains(&"unsigned");
    let auto_increment = tokens.contains(&"AUTO_INCREMENT");

    Some(ColumnParts {
        name,
        db_type,
        size,
        not_null,
        unsigned,
        auto_increment,
    })
}

/// The pieces of a key declaration: the declared index name (empty for
/// `PRIMARY KEY`) and the referenced column names in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParts {
    pub name: String,
    pub columns: Vec<String>,
}

/// Tokenize a key declaration. The column list sits between the first `(`
/// and the last `)`; the index name, if any, is the backtick-quoted token
/// before the list. Returns `None` when there is no parenthesized list or
/// the list is empty.
pub fn key_parts(trimmed: &str) -> Option<KeyParts> {
    let open = trimmed.find('(')?;
    let close = trimmed.rfind(')')?;
    if close <= open {
        return None;
    }

    let name = quoted(&trimmed[..open]).unwrap_or_default().to_string();
    let columns: Vec<String> = trimmed[open + 1..close]
        .split(',')
        .map(|c| c.trim().trim_matches('`').to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        return None;
    }

    Some(KeyParts { name, columns })
}

/// Split a declared type into the bare type and its parenthesized size
/// suffix, if present (`bigint(20)` -> `("bigint", Some("20"))`).
fn split_size(db_type: &str) -> (&str, Option<&str>) {
    match (db_type.find('('), db_type.ends_with(')')) {
        (Some(open), true) => (&db_type[..open], Some(&db_type[open + 1..db_type.len() - 1])),
        _ => (db_type, None),
    }
}

/// The content of the first backtick-quoted span, if any.
fn quoted(s: &str) -> Option<&str> {
    let start = s.find('`')?;
    let rest = &s[start + 1..];
    let end = rest.find('`')?;
    Some(&rest[..end])
}

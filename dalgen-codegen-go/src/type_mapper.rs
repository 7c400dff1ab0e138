//! Declared-type mapping to Go storage and logical types.

use dalgen_schema::Column;

/// The two Go representations of a column.
///
/// `storage` is what the record struct holds and may be a nullable wrapper;
/// `logical` is the always-non-null scalar that filter methods and by-key
/// select parameters accept, independent of storage nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePair {
    pub storage: String,
    pub logical: String,
}

impl TypePair {
    fn new(storage: &str, logical: &str) -> Self {
        Self {
            storage: storage.to_string(),
            logical: logical.to_string(),
        }
    }

    /// Whether the logical type is Go's `string`.
    pub fn is_string(&self) -> bool {
        self.logical == "string"
    }

    /// Whether the logical type supports a membership (`IN`) predicate:
    /// neither floating-point nor a time value.
    pub fn supports_in(&self) -> bool {
        !matches!(self.logical.as_str(), "float32" | "float64" | "time.Time")
    }
}

/// Map a declared type plus its nullability/signedness flags to the Go pair.
/// Unrecognized types pass through unchanged as both representations.
pub fn map_type(db_type: &str, not_null: bool, unsigned: bool) -> TypePair {
    match db_type {
        "bigint" => match (not_null, unsigned) {
            (true, true) => TypePair::new("uint64", "uint64"),
            (true, false) => TypePair::new("int64", "int64"),
            (false, true) => TypePair::new("sql.NullUint64", "uint64"),
            (false, false) => TypePair::new("sql.NullInt64", "int64"),
        },
        "int" | "tinyint" => match (not_null, unsigned) {
            (true, true) => TypePair::new("uint32", "uint32"),
            (true, false) => TypePair::new("int32", "int32"),
            (false, true) => TypePair::new("sql.NullUint64", "uint32"),
            (false, false) => TypePair::new("sql.NullInt64", "int32"),
        },
        "varchar" | "char" | "longtext" => {
            if not_null {
                TypePair::new("string", "string")
            } else {
                TypePair::new("sql.NullString", "string")
            }
        }
        "datetime" | "timestamp" => {
            if not_null {
                TypePair::new("time.Time", "time.Time")
            } else {
                TypePair::new("mysql.NullTime", "time.Time")
            }
        }
        "double" => {
            if not_null {
                TypePair::new("float64", "float64")
            } else {
                TypePair::new("sql.NullFloat64", "float64")
            }
        }
        "float" => {
            if not_null {
                TypePair::new("float32", "float32")
            } else {
                TypePair::new("sql.NullFloat64", "float32")
            }
        }
        other => TypePair::new(other, other),
    }
}

/// The Go pair for a parsed column.
pub fn type_pair(column: &Column) -> TypePair {
    map_type(&column.db_type, column.not_null, column.unsigned)
}

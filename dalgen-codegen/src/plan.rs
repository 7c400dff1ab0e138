//! Per-table emission planning.
//!
//! A [`TablePlan`] is computed once per table, before any text is emitted.
//! It resolves every policy decision the backends need — which columns
//! participate in insert and update, whether the duplicate-key insert
//! variant exists, which columns get grouping/ordering accessors, and which
//! index-prefix lookups are generated — so the language backends are pure
//! syntax.

use dalgen_schema::{
    Column, Table, UnionIndex,
    model::{CREATE_TIME, UPDATE_TIME, UPDATE_VERSION},
};

use crate::error::{Error, Result};

/// How many rows a planned lookup can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// At most one row (full-length prefix of a unique index).
    UniqueRow,
    /// Any number of rows.
    RowList,
}

/// One planned by-index lookup: an ordered column subset that the storage
/// engine can serve directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSpec {
    pub kind: LookupKind,
    /// Column positions into the table, in index-declaration order.
    pub columns: Vec<usize>,
}

/// The resolved emission plan for one table.
#[derive(Debug)]
pub struct TablePlan<'a> {
    pub table: &'a Table,
    /// Position of the primary column. Planning fails without one.
    pub primary: usize,
    /// Columns written by insert, in declaration order.
    pub insert_columns: Vec<usize>,
    /// Columns assigned by update (the version column is handled separately
    /// via a server-side increment).
    pub update_columns: Vec<usize>,
    /// Columns refreshed by the duplicate-key update clause.
    pub duplicate_update_columns: Vec<usize>,
    /// Whether insert/batch-insert carry the duplicate-key variant.
    pub emit_duplicate_key_update: bool,
    /// Columns that get grouping and ordering accessors.
    pub group_order_columns: Vec<usize>,
    /// By-index lookups, deduplicated, in planning order.
    pub lookups: Vec<LookupSpec>,
}

impl<'a> TablePlan<'a> {
    pub fn new(table: &'a Table) -> Result<Self> {
        let primary = table.primary.ok_or_else(|| Error::MissingPrimaryKey {
            table: table.db_name.clone(),
        })?;

        let insert_columns = positions(table, |_, c| !c.auto_increment && !is_audit_column(c));
        let update_columns = positions(table, |pos, c| {
            pos != primary
                && !c.auto_increment
                && !is_audit_column(c)
                && c.db_name != UPDATE_VERSION
        });
        let duplicate_update_columns = positions(table, |pos, c| {
            !c.auto_increment && !is_audit_column(c) && !table.is_unique_indexed(pos)
        });
        let group_order_columns = positions(table, |pos, c| {
            !c.auto_increment && !is_reserved_column(c) && !table.is_unique_indexed(pos)
        });

        Ok(Self {
            table,
            primary,
            insert_columns,
            update_columns,
            duplicate_update_columns,
            emit_duplicate_key_update: table.has_unique_index(),
            group_order_columns,
            lookups: plan_lookups(table, primary),
        })
    }

    pub fn column(&self, pos: usize) -> &Column {
        self.table.column(pos)
    }

    pub fn primary_column(&self) -> &Column {
        self.table.column(self.primary)
    }

    pub fn has_update_version(&self) -> bool {
        self.table.update_version.is_some()
    }
}

/// The audit timestamps, populated by column defaults and never written
/// explicitly.
fn is_audit_column(c: &Column) -> bool {
    c.db_name == CREATE_TIME || c.db_name == UPDATE_TIME
}

fn is_reserved_column(c: &Column) -> bool {
    is_audit_column(c) || c.db_name == UPDATE_VERSION
}

fn positions(table: &Table, keep: impl Fn(usize, &Column) -> bool) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(pos, c)| keep(*pos, c))
        .map(|(pos, _)| pos)
        .collect()
}

/// Enumerate the usable lookups of every declared index.
///
/// A compound index over columns `c1..cN` serves lookups on every leading
/// prefix `c1..ci` and on nothing else; only the full prefix of a unique
/// index returns at most one row. Lookups whose column sequence repeats an
/// earlier one are dropped (first wins), and the primary column's own
/// sequence is pre-seeded since the by-key select is always emitted
/// separately.
fn plan_lookups(table: &Table, primary: usize) -> Vec<LookupSpec> {
    let mut seen: Vec<Vec<usize>> = vec![vec![primary]];
    let mut lookups = Vec::new();

    let mut push = |kind: LookupKind, columns: Vec<usize>| {
        if !seen.contains(&columns) {
            seen.push(columns.clone());
            lookups.push(LookupSpec { kind, columns });
        }
    };

    for index in &table.unique_indexes {
        push(LookupKind::UniqueRow, vec![index.column]);
    }
    for union in &table.unique_union_indexes {
        for (kind, prefix) in prefixes(union, true) {
            push(kind, prefix);
        }
    }
    for index in &table.indexes {
        push(LookupKind::RowList, vec![index.column]);
    }
    for union in &table.union_indexes {
        for (kind, prefix) in prefixes(union, false) {
            push(kind, prefix);
        }
    }

    lookups
}

fn prefixes(union: &UnionIndex, unique: bool) -> Vec<(LookupKind, Vec<usize>)> {
    (1..=union.columns.len())
        .map(|len| {
            let kind = if unique && len == union.columns.len() {
                LookupKind::UniqueRow
            } else {
                LookupKind::RowList
            };
            (kind, union.columns[..len].to_vec())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use dalgen_schema::parse;

    use super::*;

    fn table(sql: &str) -> Table {
        parse(sql, "test.sql").unwrap().tables.remove(0)
    }

    #[test]
    fn test_missing_primary_key_fails() {
        let t = table("CREATE TABLE `t` (\n`id` bigint(20) NOT NULL\n);\n");
        let err = TablePlan::new(&t).unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryKey { ref table } if table == "t"));
    }

    #[test]
    fn test_insert_columns_exclude_auto_increment_and_audit() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             `create_time` timestamp NOT NULL,\n\
             `update_time` timestamp NOT NULL,\n\
             `update_version` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        let names: Vec<&str> = plan
            .insert_columns
            .iter()
            .map(|&pos| plan.column(pos).db_name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "update_version"]);
    }

    #[test]
    fn test_update_columns_exclude_primary_and_version() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             `score` int(11) NOT NULL,\n\
             `update_version` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        let names: Vec<&str> = plan
            .update_columns
            .iter()
            .map(|&pos| plan.column(pos).db_name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "score"]);
        assert!(plan.has_update_version());
    }

    #[test]
    fn test_duplicate_key_variant_requires_unique_index() {
        let plain = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             PRIMARY KEY (`id`)\n\
             );\n",
        );
        assert!(!TablePlan::new(&plain).unwrap().emit_duplicate_key_update);

        let unique = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `name_unique` (`name`)\n\
             );\n",
        );
        assert!(TablePlan::new(&unique).unwrap().emit_duplicate_key_update);
    }

    #[test]
    fn test_duplicate_update_columns_exclude_unique_indexed() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `email` varchar(64) NOT NULL,\n\
             `score` int(11) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `email_unique` (`email`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        let names: Vec<&str> = plan
            .duplicate_update_columns
            .iter()
            .map(|&pos| plan.column(pos).db_name.as_str())
            .collect();
        assert_eq!(names, vec!["score"]);
    }

    #[test]
    fn test_group_order_columns_exclusions() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `email` varchar(64) NOT NULL,\n\
             `status` int(11) NOT NULL,\n\
             `create_time` timestamp NOT NULL,\n\
             `update_time` timestamp NOT NULL,\n\
             `update_version` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `email_unique` (`email`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        let names: Vec<&str> = plan
            .group_order_columns
            .iter()
            .map(|&pos| plan.column(pos).db_name.as_str())
            .collect();
        assert_eq!(names, vec!["status"]);
    }

    #[test]
    fn test_compound_unique_prefix_planning() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `a` bigint(20) NOT NULL,\n\
             `b` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `a_b` (`a`,`b`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        assert_eq!(plan.lookups.len(), 2);
        assert_eq!(plan.lookups[0].kind, LookupKind::RowList);
        assert_eq!(plan.lookups[0].columns, vec![1]);
        assert_eq!(plan.lookups[1].kind, LookupKind::UniqueRow);
        assert_eq!(plan.lookups[1].columns, vec![1, 2]);

        // Never a lookup keyed on `b` alone.
        assert!(!plan.lookups.iter().any(|l| l.columns == vec![2]));
    }

    #[test]
    fn test_non_unique_compound_prefixes_are_all_lists() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `a` bigint(20) NOT NULL,\n\
             `b` bigint(20) NOT NULL,\n\
             `c` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             KEY `a_b_c` (`a`,`b`,`c`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        assert_eq!(plan.lookups.len(), 3);
        assert!(plan.lookups.iter().all(|l| l.kind == LookupKind::RowList));
        assert_eq!(plan.lookups[2].columns, vec![1, 2, 3]);
    }

    #[test]
    fn test_lookup_dedup_first_wins() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `a` bigint(20) NOT NULL,\n\
             `b` bigint(20) NOT NULL,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `a_unique` (`a`),\n\
             KEY `a_b` (`a`,`b`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        // The single unique lookup on `a` wins; the compound contributes only
        // its full prefix.
        assert_eq!(plan.lookups.len(), 2);
        assert_eq!(plan.lookups[0].kind, LookupKind::UniqueRow);
        assert_eq!(plan.lookups[0].columns, vec![1]);
        assert_eq!(plan.lookups[1].kind, LookupKind::RowList);
        assert_eq!(plan.lookups[1].columns, vec![1, 2]);
    }

    #[test]
    fn test_primary_sequence_is_preseeded() {
        let t = table(
            "CREATE TABLE `t` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             PRIMARY KEY (`id`),\n\
             UNIQUE KEY `id_unique` (`id`)\n\
             );\n",
        );
        let plan = TablePlan::new(&t).unwrap();

        // The by-key select is emitted separately; no duplicate lookup.
        assert!(plan.lookups.is_empty());
    }
}

//! Orchestration of the full Go output file.

use dalgen_codegen::{Result, TablePlan};
use dalgen_schema::Schema;

use crate::{
    go_file::GoFile,
    sections::{ConstantsSection, DaoSection, DatabaseSection, EntitySection, QueryPrelude, QuerySection},
};

/// Standard-library imports of every generated file.
const STD_IMPORTS: &[&str] = &[
    "bytes",
    "context",
    "database/sql",
    "fmt",
    "os",
    "strings",
    "time",
];

/// Runtime-wrapper and driver imports of every generated file.
const EXT_IMPORTS: &[&str] = &[
    "github.com/NeuronFramework/log",
    "github.com/NeuronFramework/sql/wrap",
    "github.com/go-sql-driver/mysql",
    "go.uber.org/zap",
];

/// Go code generator: plans every table up front, then emits the sections in
/// a fixed order. Identical input produces byte-identical output.
pub struct Generator<'a> {
    schema: &'a Schema,
    package: &'a str,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, package: &'a str) -> Self {
        Self { schema, package }
    }

    /// Render the complete Go source file.
    ///
    /// Planning happens for all tables before a single line is emitted, so a
    /// failing table never produces partial output.
    pub fn generate(&self) -> Result<String> {
        let plans = self
            .schema
            .tables
            .iter()
            .map(TablePlan::new)
            .collect::<Result<Vec<_>>>()?;

        let mut file = GoFile::new(self.package);
        for path in STD_IMPORTS {
            file.std_import(path);
        }
        for path in EXT_IMPORTS {
            file.ext_import(path);
        }
        // Only some schemas use the nullable wrappers and time columns these
        // imports back; the silencers keep the import block fixed.
        file.silence("sql.ErrNoRows");
        file.silence("mysql.ErrOldProtocol");
        file.silence("time.Now");

        file.add(&QueryPrelude);
        for plan in &plans {
            file.add(&ConstantsSection::new(plan.table));
            file.add(&EntitySection::new(plan.table));
            file.add(&QuerySection::new(plan));
            file.add(&DaoSection::new(plan));
        }
        file.add(&DatabaseSection::new(self.schema));

        Ok(file.render())
    }
}

#[cfg(test)]
mod tests {
    use dalgen_codegen::Error;
    use dalgen_schema::parse;

    use super::*;

    const SCHEMA: &str = "-- Host: localhost    Database: shop\n\
        CREATE TABLE `user` (\n\
        `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
        `name` varchar(32) NOT NULL,\n\
        PRIMARY KEY (`id`),\n\
        UNIQUE KEY `name_unique` (`name`)\n\
        );\n";

    #[test]
    fn test_generates_all_sections_in_order() {
        let schema = parse(SCHEMA, "test.sql").unwrap();
        let out = Generator::new(&schema, "shop").generate().unwrap();

        assert!(out.starts_with("package shop\n"));
        let positions: Vec<usize> = [
            "type QueryBase struct {",
            "const USER_TABLE_NAME",
            "type User struct {",
            "type UserQuery struct {",
            "type UserDao struct {",
            "type DB struct {",
        ]
        .iter()
        .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_import_block_and_silencers() {
        let schema = parse(SCHEMA, "test.sql").unwrap();
        let out = Generator::new(&schema, "shop").generate().unwrap();

        assert!(out.contains("\"github.com/NeuronFramework/sql/wrap\""));
        assert!(out.contains("\"go.uber.org/zap\""));
        assert!(out.contains("var _ = sql.ErrNoRows"));
        assert!(out.contains("var _ = mysql.ErrOldProtocol"));
        assert!(out.contains("var _ = time.Now"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let schema = parse(SCHEMA, "test.sql").unwrap();
        let first = Generator::new(&schema, "shop").generate().unwrap();

        let again = parse(SCHEMA, "test.sql").unwrap();
        let second = Generator::new(&again, "shop").generate().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_primary_key_aborts_whole_run() {
        let text = format!(
            "{}CREATE TABLE `keyless` (\n`id` bigint(20) NOT NULL\n);\n",
            SCHEMA
        );
        let schema = parse(&text, "test.sql").unwrap();
        let err = Generator::new(&schema, "shop").generate().unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryKey { ref table } if table == "keyless"));
    }
}

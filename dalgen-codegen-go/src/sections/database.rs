//! The database aggregate tying every DAO together.

use dalgen_codegen::{CodeBuilder, Emit};
use dalgen_schema::Schema;

use crate::ast::{GoField, GoFunc, GoStruct};

/// Emits the `DB` struct embedding the runtime wrapper with one DAO handle
/// per table, and `NewDB` which opens the connection, pings it, and
/// constructs every DAO in table-declaration order, failing on the first
/// error.
pub struct DatabaseSection<'a> {
    schema: &'a Schema,
}

impl<'a> DatabaseSection<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }
}

impl Emit for DatabaseSection<'_> {
    fn emit(&self, b: &mut CodeBuilder) {
        let mut db = GoStruct::new("DB").embed("wrap.DB");
        for table in &self.schema.tables {
            db = db.field(GoField::new(&table.ident, format!("*{}Dao", table.ident)));
        }
        db.emit(b);
        b.blank();

        let mut func = GoFunc::new("NewDB")
            .results("(*DB, error)")
            .line("d := &DB{}")
            .blank()
            .line("connectionString := os.Getenv(\"DB\")")
            .line("if connectionString == \"\" {")
            .line("\treturn nil, fmt.Errorf(\"DB env nil\")")
            .line("}");
        if let Some(database) = &self.schema.database {
            func = func.line(format!(
                "connectionString += \"/{}?parseTime=true\"",
                database
            ));
        }
        func = func
            .line("db, err := wrap.Open(\"mysql\", connectionString)")
            .line("if err != nil {")
            .line("\treturn nil, err")
            .line("}")
            .line("d.DB = *db")
            .blank()
            .line("err = d.Ping(context.Background())")
            .line("if err != nil {")
            .line("\treturn nil, err")
            .line("}");
        for table in &self.schema.tables {
            func = func
                .blank()
                .line(format!("d.{}, err = New{}Dao(d)", table.ident, table.ident))
                .line("if err != nil {")
                .line("\treturn nil, err")
                .line("}");
        }
        func = func.blank().line("return d, nil");
        func.emit(b);
    }
}

#[cfg(test)]
mod tests {
    use dalgen_schema::parse;

    use super::*;

    fn render(sql: &str) -> String {
        let schema = parse(sql, "test.sql").unwrap();
        let mut b = CodeBuilder::go();
        DatabaseSection::new(&schema).emit(&mut b);
        b.build()
    }

    const TWO_TABLES: &str = "-- Host: localhost    Database: shop\n\
        CREATE TABLE `user` (\n\
        `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
        PRIMARY KEY (`id`)\n\
        );\n\
        CREATE TABLE `order_item` (\n\
        `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
        PRIMARY KEY (`id`)\n\
        );\n";

    #[test]
    fn test_db_struct_has_one_dao_per_table() {
        let out = render(TWO_TABLES);
        assert!(out.contains("type DB struct {\n\twrap.DB\n\tUser *UserDao\n\tOrderItem *OrderItemDao\n}"));
    }

    #[test]
    fn test_new_db_constructs_daos_in_declaration_order() {
        let out = render(TWO_TABLES);
        let user = out.find("d.User, err = NewUserDao(d)").unwrap();
        let order = out.find("d.OrderItem, err = NewOrderItemDao(d)").unwrap();
        assert!(user < order);
        assert!(out.contains("connectionString += \"/shop?parseTime=true\""));
        assert!(out.contains("err = d.Ping(context.Background())"));
    }

    #[test]
    fn test_missing_database_name_skips_path_suffix() {
        let out = render(
            "CREATE TABLE `user` (\n`id` bigint(20) NOT NULL,\nPRIMARY KEY (`id`)\n);\n",
        );
        assert!(!out.contains("parseTime=true"));
    }
}

//! The per-table record struct.

use dalgen_codegen::{CodeBuilder, Emit};
use dalgen_schema::Table;

use crate::{
    ast::{GoField, GoStruct},
    type_mapper::type_pair,
};

/// Emits the record struct: one exported field per column in declaration
/// order, using the storage type, with the declared size carried as a
/// trailing comment.
pub struct EntitySection<'a> {
    table: &'a Table,
}

impl<'a> EntitySection<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl Emit for EntitySection<'_> {
    fn emit(&self, b: &mut CodeBuilder) {
        let mut record = GoStruct::new(&self.table.ident);
        for column in &self.table.columns {
            let mut field = GoField::new(&column.ident, type_pair(column).storage);
            if let Some(size) = &column.size {
                field = field.comment(format!("size={}", size));
            }
            record = record.field(field);
        }
        record.emit(b);
    }
}

#[cfg(test)]
mod tests {
    use dalgen_schema::parse;

    use super::*;

    #[test]
    fn test_entity_section() {
        let schema = parse(
            "CREATE TABLE `user_info` (\n\
             `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             `note` varchar(45) DEFAULT NULL,\n\
             `create_time` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP,\n\
             PRIMARY KEY (`id`)\n\
             );\n",
            "test.sql",
        )
        .unwrap();

        let mut b = CodeBuilder::go();
        EntitySection::new(&schema.tables[0]).emit(&mut b);

        insta::assert_snapshot!(b.build(), @r#"
        type UserInfo struct {
        	Id uint64 //size=20
        	Name string //size=32
        	Note sql.NullString //size=45
        	CreateTime time.Time
        }
        "#);
    }
}

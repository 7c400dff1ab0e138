//! Symbolic constants emitted per table.

use dalgen_codegen::{CodeBuilder, Emit};
use dalgen_core::to_constant_case;
use dalgen_schema::Table;

/// Emits the table-name constant, the field-name type with one constant per
/// column, and the all-fields list in both joined and slice form.
pub struct ConstantsSection<'a> {
    table: &'a Table,
}

impl<'a> ConstantsSection<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl Emit for ConstantsSection<'_> {
    fn emit(&self, b: &mut CodeBuilder) {
        let prefix = to_constant_case(&self.table.db_name);

        b.line(&format!(
            "const {}_TABLE_NAME = \"{}\"",
            prefix, self.table.db_name
        ));
        b.blank();

        b.line(&format!("type {}_FIELD string", prefix));
        b.blank();

        for column in &self.table.columns {
            b.line(&format!(
                "const {}_FIELD_{} = {}_FIELD(\"{}\")",
                prefix,
                to_constant_case(&column.db_name),
                prefix,
                column.db_name
            ));
        }
        b.blank();

        let all_fields: Vec<&str> = self
            .table
            .columns
            .iter()
            .map(|c| c.db_name.as_str())
            .collect();
        b.line(&format!(
            "const {}_ALL_FIELDS_STRING = \"{}\"",
            prefix,
            all_fields.join(",")
        ));
        b.blank();

        b.block(&format!("var {}_ALL_FIELDS = []string{{", prefix), "}", |b| {
            for name in &all_fields {
                b.line(&format!("\"{}\",", name));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use dalgen_schema::parse;

    use super::*;

    #[test]
    fn test_constants_section() {
        let schema = parse(
            "CREATE TABLE `user_info` (\n\
             `id` bigint(20) NOT NULL AUTO_INCREMENT,\n\
             `name` varchar(32) NOT NULL,\n\
             PRIMARY KEY (`id`)\n\
             );\n",
            "test.sql",
        )
        .unwrap();

        let mut b = CodeBuilder::go();
        ConstantsSection::new(&schema.tables[0]).emit(&mut b);

        insta::assert_snapshot!(b.build(), @r#"
        const USER_INFO_TABLE_NAME = "user_info"

        type USER_INFO_FIELD string

        const USER_INFO_FIELD_ID = USER_INFO_FIELD("id")
        const USER_INFO_FIELD_NAME = USER_INFO_FIELD("name")

        const USER_INFO_ALL_FIELDS_STRING = "id,name"

        var USER_INFO_ALL_FIELDS = []string{
        	"id",
        	"name",
        }
        "#);
    }
}

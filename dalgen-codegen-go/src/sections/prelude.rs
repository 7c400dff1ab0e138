//! The query-builder base shared by every generated table.

use dalgen_codegen::{CodeBuilder, Emit};

use crate::ast::{GoField, GoFunc, GoStruct};

/// Emits `QueryBase` and its `buildSelectQuery` method: the where-clause
/// buffer with bound parameters, grouping/ordering state, the limit window,
/// and the row-lock flags, rendered in the fixed clause order.
pub struct QueryPrelude;

impl Emit for QueryPrelude {
    fn emit(&self, b: &mut CodeBuilder) {
        GoStruct::new("QueryBase")
            .field(GoField::new("where", "*bytes.Buffer"))
            .field(GoField::new("whereParams", "[]interface{}"))
            .field(GoField::new("groupByFields", "[]string"))
            .field(GoField::new("groupByOrders", "[]bool"))
            .field(GoField::new("orderByFields", "[]string"))
            .field(GoField::new("orderByOrders", "[]bool"))
            .field(GoField::new("hasLimit", "bool"))
            .field(GoField::new("limitStartIncluded", "int64"))
            .field(GoField::new("limitCount", "int64"))
            .field(GoField::new("forUpdate", "bool"))
            .field(GoField::new("forShare", "bool"))
            .emit(b);
        b.blank();

        GoFunc::new("buildSelectQuery")
            .receiver("q", "*QueryBase")
            .results("(string, []interface{})")
            .line("query := bytes.NewBufferString(\"\")")
            .blank()
            .line("where := q.where.String()")
            .line("if where != \"\" {")
            .line("\tquery.WriteString(\" WHERE\")")
            .line("\tquery.WriteString(where)")
            .line("}")
            .blank()
            .lines(direction_clause("groupBy", "GROUP BY"))
            .blank()
            .lines(direction_clause("orderBy", "ORDER BY"))
            .blank()
            .line("if q.hasLimit {")
            .line("\tquery.WriteString(fmt.Sprintf(\" LIMIT %d,%d\", q.limitStartIncluded, q.limitCount))")
            .line("}")
            .blank()
            .line("if q.forUpdate {")
            .line("\tquery.WriteString(\" FOR UPDATE\")")
            .line("}")
            .blank()
            .line("if q.forShare {")
            .line("\tquery.WriteString(\" LOCK IN SHARE MODE\")")
            .line("}")
            .blank()
            .line("return query.String(), q.whereParams")
            .emit(b);
    }
}

/// Body lines rendering one field+direction list into a SQL clause.
fn direction_clause(prefix: &str, keyword: &str) -> Vec<String> {
    vec![
        format!("if len(q.{}Fields) > 0 {{", prefix),
        format!("\titems := make([]string, len(q.{}Fields))", prefix),
        format!("\tfor i, field := range q.{}Fields {{", prefix),
        format!("\t\tif q.{}Orders[i] {{", prefix),
        "\t\t\titems[i] = field + \" ASC\"".to_string(),
        "\t\t} else {".to_string(),
        "\t\t\titems[i] = field + \" DESC\"".to_string(),
        "\t\t}".to_string(),
        "\t}".to_string(),
        format!("\tquery.WriteString(\" {} \")", keyword),
        "\tquery.WriteString(strings.Join(items, \",\"))".to_string(),
        "}".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> String {
        let mut b = CodeBuilder::go();
        QueryPrelude.emit(&mut b);
        b.build()
    }

    #[test]
    fn test_query_base_fields() {
        let out = render();
        assert!(out.contains("type QueryBase struct {"));
        assert!(out.contains("\twhere *bytes.Buffer"));
        assert!(out.contains("\twhereParams []interface{}"));
        assert!(out.contains("\tforShare bool"));
    }

    #[test]
    fn test_clause_order() {
        let out = render();
        let where_pos = out.find("\" WHERE\"").unwrap();
        let group_pos = out.find("\" GROUP BY \"").unwrap();
        let order_pos = out.find("\" ORDER BY \"").unwrap();
        let limit_pos = out.find("\" LIMIT %d,%d\"").unwrap();
        let update_pos = out.find("\" FOR UPDATE\"").unwrap();
        let share_pos = out.find("\" LOCK IN SHARE MODE\"").unwrap();

        assert!(where_pos < group_pos);
        assert!(group_pos < order_pos);
        assert!(order_pos < limit_pos);
        assert!(limit_pos < update_pos);
        assert!(update_pos < share_pos);
    }
}

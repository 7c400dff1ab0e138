//! The per-table fluent query builder.

use dalgen_codegen::{CodeBuilder, Emit, TablePlan};
use dalgen_core::to_constant_case;
use dalgen_schema::Column;

use crate::{
    ast::{GoField, GoFunc, GoStruct},
    type_mapper::{TypePair, type_pair},
};

/// Emits `<T>Query`: where-clause connectors, one filter family per column
/// driven by its logical type, grouping/ordering/pagination/lock accessors,
/// and the terminal select operations executing through the DAO.
pub struct QuerySection<'a> {
    plan: &'a TablePlan<'a>,
}

impl<'a> QuerySection<'a> {
    pub fn new(plan: &'a TablePlan<'a>) -> Self {
        Self { plan }
    }

    fn query_type(&self) -> String {
        format!("{}Query", self.plan.table.ident)
    }

    fn ret(&self) -> String {
        format!("*{}", self.query_type())
    }

    fn method(&self, name: impl Into<String>) -> GoFunc {
        GoFunc::new(name).receiver("q", self.ret())
    }

    fn connector(&self, name: &str, text: &str) -> GoFunc {
        self.method(name)
            .results(self.ret())
            .line(format!("q.where.WriteString(\"{}\")", text))
            .line("return q")
    }

    fn comparison(&self, column: &Column, suffix: &str, op: &str, pair: &TypePair) -> GoFunc {
        self.method(format!("{}{}", column.ident, suffix))
            .param("v", &pair.logical)
            .results(self.ret())
            .line(format!(
                "q.where.WriteString(\" {}{}?\")",
                column.db_name, op
            ))
            .line("q.whereParams = append(q.whereParams, v)")
            .line("return q")
    }

    fn null_check(&self, column: &Column, suffix: &str, predicate: &str) -> GoFunc {
        self.method(format!("{}{}", column.ident, suffix))
            .results(self.ret())
            .line(format!(
                "q.where.WriteString(\" {} {}\")",
                column.db_name, predicate
            ))
            .line("return q")
    }

    fn membership(&self, column: &Column, pair: &TypePair) -> GoFunc {
        self.method(format!("{}In", column.ident))
            .param("items", format!("[]{}", pair.logical))
            .results(self.ret())
            .line(format!(
                "q.where.WriteString(\" {} IN(\")",
                column.db_name
            ))
            .line("q.where.WriteString(wrap.RepeatWithSeparator(\"?\", len(items), \",\"))")
            .line("q.where.WriteString(\")\")")
            .line("q.whereParams = append(q.whereParams, items)")
            .line("return q")
    }

    fn accessor(&self, name: String, list: &str, field: &str) -> GoFunc {
        self.method(name)
            .param("asc", "bool")
            .results(self.ret())
            .line(format!(
                "q.{0}Fields = append(q.{0}Fields, \"{1}\")",
                list, field
            ))
            .line(format!("q.{0}Orders = append(q.{0}Orders, asc)", list))
            .line("return q")
    }

    fn column_filters(&self) -> Vec<GoFunc> {
        let mut funcs = Vec::new();
        for column in &self.plan.table.columns {
            let pair = type_pair(column);
            funcs.push(self.comparison(column, "Equal", "=", &pair));
            funcs.push(self.comparison(column, "NotEqual", "<>", &pair));
            if !pair.is_string() {
                funcs.push(self.comparison(column, "Less", "<", &pair));
                funcs.push(self.comparison(column, "LessEqual", "<=", &pair));
                funcs.push(self.comparison(column, "Greater", ">", &pair));
                funcs.push(self.comparison(column, "GreaterEqual", ">=", &pair));
            }
            if !column.not_null {
                funcs.push(self.null_check(column, "IsNull", "IS NULL"));
                funcs.push(self.null_check(column, "IsNotNull", "IS NOT NULL"));
            }
            if pair.supports_in() {
                funcs.push(self.membership(column, &pair));
            }
        }
        funcs
    }

    fn select_terminals(&self) -> Vec<GoFunc> {
        let table = self.plan.table;
        let entity = &table.ident;
        let fields = format!("{}_ALL_FIELDS_STRING", to_constant_case(&table.db_name));

        let select = self
            .method("Select")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .results(format!("(*{}, error)", entity))
            .line("if !q.hasLimit {")
            .line("\tq.limitCount = 1")
            .line("\tq.hasLimit = true")
            .line("}")
            .blank()
            .line("queryString, params := q.buildSelectQuery()")
            .line("query := bytes.NewBufferString(\"\")")
            .line("query.WriteString(\"SELECT \")")
            .line(format!("query.WriteString({})", fields))
            .line(format!("query.WriteString(\" FROM {}\")", table.db_name))
            .line("query.WriteString(queryString)")
            .line("row := q.dao.db.QueryRow(ctx, tx, query.String(), params...)")
            .line("return q.dao.scanRow(row)");

        let select_list = self
            .method("SelectList")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .results(format!("([]*{}, error)", entity))
            .line("queryString, params := q.buildSelectQuery()")
            .line("query := bytes.NewBufferString(\"\")")
            .line("query.WriteString(\"SELECT \")")
            .line(format!("query.WriteString({})", fields))
            .line(format!("query.WriteString(\" FROM {}\")", table.db_name))
            .line("query.WriteString(queryString)")
            .line("rows, err := q.dao.db.Query(ctx, tx, query.String(), params...)")
            .line("if err != nil {")
            .line("\treturn nil, err")
            .line("}")
            .line("return q.dao.scanRows(rows)");

        let select_count = self
            .method("SelectCount")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .results("(int64, error)")
            .line("queryString, params := q.buildSelectQuery()")
            .line("query := bytes.NewBufferString(\"\")")
            .line(format!(
                "query.WriteString(\"SELECT COUNT(*) FROM {}\")",
                table.db_name
            ))
            .line("query.WriteString(queryString)")
            .line("row := q.dao.db.QueryRow(ctx, tx, query.String(), params...)")
            .line("var count int64")
            .line("err := row.Scan(&count)")
            .line("return count, err");

        let select_group_by = self
            .method("SelectGroupBy")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .param("withCount", "bool")
            .results("(*wrap.Rows, error)")
            .line("queryString, params := q.buildSelectQuery()")
            .line("query := bytes.NewBufferString(\"\")")
            .line("query.WriteString(\"SELECT \")")
            .line("query.WriteString(strings.Join(q.groupByFields, \",\"))")
            .line("if withCount {")
            .line("\tquery.WriteString(\",COUNT(*)\")")
            .line("}")
            .line(format!("query.WriteString(\" FROM {}\")", table.db_name))
            .line("query.WriteString(queryString)")
            .line("return q.dao.db.Query(ctx, tx, query.String(), params...)");

        vec![select, select_list, select_count, select_group_by]
    }
}

impl Emit for QuerySection<'_> {
    fn emit(&self, b: &mut CodeBuilder) {
        let table = self.plan.table;
        let query_ty = self.query_type();

        GoStruct::new(&query_ty)
            .embed("QueryBase")
            .field(GoField::new("dao", format!("*{}Dao", table.ident)))
            .emit(b);

        let mut funcs = vec![
            GoFunc::new(format!("New{}", query_ty))
                .param("dao", format!("*{}Dao", table.ident))
                .results(self.ret())
                .line(format!("q := &{}{{}}", query_ty))
                .line("q.dao = dao")
                .line("q.where = bytes.NewBufferString(\"\")")
                .line("return q"),
            self.connector("Left", " ("),
            self.connector("Right", " )"),
            self.connector("And", " AND"),
            self.connector("Or", " OR"),
            self.connector("Not", " NOT"),
        ];

        funcs.extend(self.column_filters());

        for &pos in &self.plan.group_order_columns {
            let column = self.plan.column(pos);
            funcs.push(self.accessor(
                format!("GroupBy{}", column.ident),
                "groupBy",
                &column.db_name,
            ));
        }
        for &pos in &self.plan.group_order_columns {
            let column = self.plan.column(pos);
            funcs.push(self.accessor(
                format!("OrderBy{}", column.ident),
                "orderBy",
                &column.db_name,
            ));
        }
        funcs.push(self.accessor("OrderByGroupCount".to_string(), "orderBy", "count(*)"));

        funcs.push(
            self.method("Limit")
                .param("startIncluded", "int64")
                .param("count", "int64")
                .results(self.ret())
                .line("q.hasLimit = true")
                .line("q.limitStartIncluded = startIncluded")
                .line("q.limitCount = count")
                .line("return q"),
        );
        funcs.push(
            self.method("ForUpdate")
                .results(self.ret())
                .line("q.forUpdate = true")
                .line("return q"),
        );
        funcs.push(
            self.method("ForShare")
                .results(self.ret())
                .line("q.forShare = true")
                .line("return q"),
        );

        funcs.extend(self.select_terminals());

        for func in &funcs {
            b.blank();
            func.emit(b);
        }
    }
}

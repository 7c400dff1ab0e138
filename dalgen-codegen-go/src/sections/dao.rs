//! The per-table data-access object.

use dalgen_codegen::{CodeBuilder, Emit, LookupKind, LookupSpec, TablePlan};
use dalgen_core::to_constant_case;

use crate::{
    ast::{GoField, GoFunc, GoStruct},
    naming::param_name,
    type_mapper::type_pair,
};

/// Emits `<T>Dao`: constructor and query factory, insert/batch-insert (with
/// the duplicate-key variant when the table has a unique index), update by
/// primary key with the optimistic-concurrency predicate, delete by primary
/// key, the row-scan helpers, and one select per planned by-index lookup.
pub struct DaoSection<'a> {
    plan: &'a TablePlan<'a>,
}

impl<'a> DaoSection<'a> {
    pub fn new(plan: &'a TablePlan<'a>) -> Self {
        Self { plan }
    }

    fn dao_type(&self) -> String {
        format!("{}Dao", self.plan.table.ident)
    }

    fn method(&self, name: impl Into<String>) -> GoFunc {
        GoFunc::new(name).receiver("dao", format!("*{}", self.dao_type()))
    }

    fn all_fields(&self) -> String {
        format!(
            "{}_ALL_FIELDS_STRING",
            to_constant_case(&self.plan.table.db_name)
        )
    }

    fn insert_field_list(&self) -> String {
        self.plan
            .insert_columns
            .iter()
            .map(|&pos| self.plan.column(pos).db_name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn insert_placeholders(&self) -> String {
        vec!["?"; self.plan.insert_columns.len()].join(",")
    }

    fn insert_params(&self) -> String {
        self.plan
            .insert_columns
            .iter()
            .map(|&pos| format!("e.{}", self.plan.column(pos).ident))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The duplicate-key update list. When every writable column is
    /// unique-indexed the clause degrades to a primary-key no-op assignment,
    /// which keeps the statement valid.
    fn duplicate_clause(&self) -> String {
        if self.plan.duplicate_update_columns.is_empty() {
            let pk = &self.plan.primary_column().db_name;
            return format!("{}={}", pk, pk);
        }
        self.plan
            .duplicate_update_columns
            .iter()
            .map(|&pos| {
                let name = &self.plan.column(pos).db_name;
                format!("{}=VALUES({})", name, name)
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn insert(&self) -> GoFunc {
        let table = self.plan.table;
        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.db_name,
            self.insert_field_list(),
            self.insert_placeholders()
        );

        let mut func = self
            .method("Insert")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .param("e", format!("*{}", table.ident));
        if self.plan.emit_duplicate_key_update {
            func = func
                .param("onDuplicateKeyUpdate", "bool")
                .results("(*wrap.Result, error)")
                .line("query := bytes.NewBufferString(\"\")")
                .line(format!("query.WriteString(\"{}\")", statement))
                .line("if onDuplicateKeyUpdate {")
                .line(format!(
                    "\tquery.WriteString(\" ON DUPLICATE KEY UPDATE {}\")",
                    self.duplicate_clause()
                ))
                .line("}")
                .line(format!("params := []interface{{}}{{{}}}", self.insert_params()))
                .line("return dao.db.Exec(ctx, tx, query.String(), params...)");
        } else {
            func = func
                .results("(*wrap.Result, error)")
                .line(format!("query := \"{}\"", statement))
                .line(format!("params := []interface{{}}{{{}}}", self.insert_params()))
                .line("return dao.db.Exec(ctx, tx, query, params...)");
        }
        func
    }

    fn batch_insert(&self) -> GoFunc {
        let table = self.plan.table;
        let row_placeholder = format!("({})", self.insert_placeholders());

        let mut func = self
            .method("BatchInsert")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .param("list", format!("[]*{}", table.ident));
        if self.plan.emit_duplicate_key_update {
            func = func.param("onDuplicateKeyUpdate", "bool");
        }
        func = func
            .results("(*wrap.Result, error)")
            .line("query := bytes.NewBufferString(\"\")")
            .line(format!(
                "query.WriteString(\"INSERT INTO {} ({}) VALUES \")",
                table.db_name,
                self.insert_field_list()
            ))
            .line(format!(
                "query.WriteString(wrap.RepeatWithSeparator(\"{}\", len(list), \",\"))",
                row_placeholder
            ));
        if self.plan.emit_duplicate_key_update {
            func = func
                .line("if onDuplicateKeyUpdate {")
                .line(format!(
                    "\tquery.WriteString(\" ON DUPLICATE KEY UPDATE {}\")",
                    self.duplicate_clause()
                ))
                .line("}");
        }
        func = func.line(format!(
            "params := make([]interface{{}}, 0, len(list)*{})",
            self.plan.insert_columns.len()
        ));
        func = func.line("for _, e := range list {");
        for &pos in &self.plan.insert_columns {
            func = func.line(format!(
                "\tparams = append(params, e.{})",
                self.plan.column(pos).ident
            ));
        }
        func
            .line("}")
            .blank()
            .line("return dao.db.Exec(ctx, tx, query.String(), params...)")
    }

    /// The update statement: every writable column, a server-side version
    /// increment when the table is version-guarded, and a matching predicate
    /// against the previously-read version value.
    fn update(&self) -> Option<GoFunc> {
        let table = self.plan.table;
        let pk = self.plan.primary_column();

        let mut assignments: Vec<String> = self
            .plan
            .update_columns
            .iter()
            .map(|&pos| format!("{}=?", self.plan.column(pos).db_name))
            .collect();
        let mut predicate = format!("WHERE {}=?", pk.db_name);
        let mut params: Vec<String> = self
            .plan
            .update_columns
            .iter()
            .map(|&pos| format!("e.{}", self.plan.column(pos).ident))
            .collect();
        params.push(format!("e.{}", pk.ident));

        if self.plan.has_update_version() {
            assignments.push("update_version=update_version+1".to_string());
            predicate.push_str(" AND update_version=?");
            params.push("e.UpdateVersion".to_string());
        } else if assignments.is_empty() {
            return None;
        }

        Some(
            self.method("Update")
                .param("ctx", "context.Context")
                .param("tx", "*wrap.Tx")
                .param("e", format!("*{}", table.ident))
                .results("(*wrap.Result, error)")
                .line(format!(
                    "query := \"UPDATE {} SET {} {}\"",
                    table.db_name,
                    assignments.join(","),
                    predicate
                ))
                .line(format!("params := []interface{{}}{{{}}}", params.join(", ")))
                .line("return dao.db.Exec(ctx, tx, query, params...)"),
        )
    }

    fn delete(&self) -> GoFunc {
        let table = self.plan.table;
        let pk = self.plan.primary_column();
        let param = param_name(&pk.ident);

        self.method("Delete")
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx")
            .param(&param, type_pair(pk).logical)
            .results("(*wrap.Result, error)")
            .line(format!(
                "query := \"DELETE FROM {} WHERE {}=?\"",
                table.db_name, pk.db_name
            ))
            .line(format!("return dao.db.Exec(ctx, tx, query, {})", param))
    }

    fn scan_params(&self) -> String {
        self.plan
            .table
            .columns
            .iter()
            .map(|c| format!("&e.{}", c.ident))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn scan_row(&self) -> GoFunc {
        let entity = &self.plan.table.ident;
        self.method("scanRow")
            .param("row", "*wrap.Row")
            .results(format!("(*{}, error)", entity))
            .line(format!("e := &{}{{}}", entity))
            .line(format!("err := row.Scan({})", self.scan_params()))
            .line("if err != nil {")
            .line("\tif err == wrap.ErrNoRows {")
            .line("\t\treturn nil, nil")
            .line("\t}")
            .line("\treturn nil, err")
            .line("}")
            .blank()
            .line("return e, nil")
    }

    fn scan_rows(&self) -> GoFunc {
        let entity = &self.plan.table.ident;
        self.method("scanRows")
            .param("rows", "*wrap.Rows")
            .results(format!("([]*{}, error)", entity))
            .line(format!("list := make([]*{}, 0)", entity))
            .line("for rows.Next() {")
            .line(format!("\te := {}{{}}", entity))
            .line(format!("\terr := rows.Scan({})", self.scan_params()))
            .line("\tif err != nil {")
            .line("\t\treturn nil, err")
            .line("\t}")
            .line("\tlist = append(list, &e)")
            .line("}")
            .line("if rows.Err() != nil {")
            .line("\treturn nil, rows.Err()")
            .line("}")
            .blank()
            .line("return list, nil")
    }

    /// A by-index select over the given column positions. `unique` lookups
    /// scan a single row; the rest return a list.
    fn select_by(&self, columns: &[usize], unique: bool) -> GoFunc {
        let table = self.plan.table;
        let suffix: String = columns
            .iter()
            .map(|&pos| self.plan.column(pos).ident.clone())
            .collect();
        let predicate = columns
            .iter()
            .map(|&pos| format!("{}=?", self.plan.column(pos).db_name))
            .collect::<Vec<_>>()
            .join(" AND ");
        let args = columns
            .iter()
            .map(|&pos| param_name(&self.plan.column(pos).ident))
            .collect::<Vec<_>>()
            .join(", ");

        let name = if unique {
            format!("SelectBy{}", suffix)
        } else {
            format!("SelectListBy{}", suffix)
        };
        let mut func = self
            .method(name)
            .param("ctx", "context.Context")
            .param("tx", "*wrap.Tx");
        for &pos in columns {
            let column = self.plan.column(pos);
            func = func.param(param_name(&column.ident), type_pair(column).logical);
        }

        let query = format!(
            "query := \"SELECT \" + {} + \" FROM {} WHERE {}\"",
            self.all_fields(),
            table.db_name,
            predicate
        );
        if unique {
            func.results(format!("(*{}, error)", table.ident))
                .line(query)
                .line(format!("row := dao.db.QueryRow(ctx, tx, query, {})", args))
                .line("return dao.scanRow(row)")
        } else {
            func.results(format!("([]*{}, error)", table.ident))
                .line(query)
                .line(format!("rows, err := dao.db.Query(ctx, tx, query, {})", args))
                .line("if err != nil {")
                .line("\treturn nil, err")
                .line("}")
                .line("return dao.scanRows(rows)")
        }
    }

    fn lookup_select(&self, lookup: &LookupSpec) -> GoFunc {
        self.select_by(&lookup.columns, lookup.kind == LookupKind::UniqueRow)
    }
}

impl Emit for DaoSection<'_> {
    fn emit(&self, b: &mut CodeBuilder) {
        let table = self.plan.table;
        let dao_ty = self.dao_type();

        GoStruct::new(&dao_ty)
            .field(GoField::new("logger", "*zap.Logger"))
            .field(GoField::new("db", "*DB"))
            .emit(b);

        let mut funcs = vec![
            GoFunc::new(format!("New{}", dao_ty))
                .param("db", "*DB")
                .results(format!("(*{}, error)", dao_ty))
                .line(format!("dao := &{}{{}}", dao_ty))
                .line("dao.logger = log.TypedLogger(dao)")
                .line("dao.db = db")
                .blank()
                .line("return dao, nil"),
            self.method("Query")
                .results(format!("*{}Query", table.ident))
                .line(format!("return New{}Query(dao)", table.ident)),
            self.insert(),
            self.batch_insert(),
        ];
        if let Some(update) = self.update() {
            funcs.push(update);
        }
        funcs.push(self.delete());
        funcs.push(self.scan_row());
        funcs.push(self.scan_rows());
        funcs.push(self.select_by(&[self.plan.primary], true));
        for lookup in &self.plan.lookups {
            funcs.push(self.lookup_select(lookup));
        }

        for func in &funcs {
            b.blank();
            func.emit(b);
        }
    }
}

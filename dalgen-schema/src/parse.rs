//! The schema-dump parser: a single forward scan over lines.

use std::path::Path;

use miette::{NamedSource, SourceSpan};

use crate::{
    error::{Error, Result},
    line::{self, LineKind},
    model::{Column, Index, Schema, Table, UnionIndex},
};

/// Parse a schema dump. `filename` is only used for error reporting.
pub fn parse(text: &str, filename: &str) -> Result<Schema> {
    Parser { text, filename }.run()
}

/// Parse a schema dump from a file on disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&text, &path.display().to_string())
}

/// A raw input line with its byte offset into the full text.
struct Line<'a> {
    offset: usize,
    raw: &'a str,
    trimmed: &'a str,
}

impl Line<'_> {
    /// Span covering the trimmed content, for diagnostics.
    fn span(&self) -> SourceSpan {
        let lead = self.raw.len() - self.raw.trim_start().len();
        (self.offset + lead, self.trimmed.len()).into()
    }
}

struct Parser<'a> {
    text: &'a str,
    filename: &'a str,
}

impl Parser<'_> {
    fn run(&self) -> Result<Schema> {
        let lines = self.lines();
        let mut schema = Schema::default();

        let mut i = 0;
        while i < lines.len() {
            let l = &lines[i];
            match line::classify(l.trimmed, false) {
                LineKind::DatabaseMarker => {
                    if let Some(name) = line::database_name(l.trimmed) {
                        schema.database = Some(name.to_string());
                    }
                }
                LineKind::TableStart => {
                    schema.tables.push(self.parse_table(&lines, &mut i)?);
                }
                _ => {}
            }
            i += 1;
        }

        Ok(schema)
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut offset = 0;
        self.text
            .split('\n')
            .map(|raw| {
                let l = Line {
                    offset,
                    raw,
                    trimmed: raw.trim(),
                };
                offset += raw.len() + 1;
                l
            })
            .collect()
    }

    /// Parse one table block. On entry `*i` points at the `CREATE TABLE`
    /// line; on success it points at the block-closing line.
    fn parse_table(&self, lines: &[Line<'_>], i: &mut usize) -> Result<Table> {
        let start = &lines[*i];
        let name = line::table_name(start.trimmed).ok_or_else(|| {
            Box::new(Error::MalformedTable {
                src: self.source(),
                span: start.span(),
            })
        })?;
        let mut table = Table::new(name);

        *i += 1;
        while *i < lines.len() {
            let l = &lines[*i];
            match line::classify(l.trimmed, true) {
                LineKind::TableEnd => return Ok(table),
                LineKind::ColumnDef => self.parse_column(&mut table, l)?,
                LineKind::PrimaryKey => self.parse_primary_key(&mut table, l)?,
                LineKind::UniqueKey => self.parse_key(&mut table, l, true)?,
                LineKind::Key => self.parse_key(&mut table, l, false)?,
                _ => {}
            }
            *i += 1;
        }

        Err(Box::new(Error::UnterminatedTable {
            src: self.source(),
            span: start.span(),
            table: table.db_name,
        }))
    }

    fn parse_column(&self, table: &mut Table, l: &Line<'_>) -> Result<()> {
        let parts = line::column_parts(l.trimmed).ok_or_else(|| {
            Box::new(Error::MalformedColumn {
                src: self.source(),
                span: l.span(),
                table: table.db_name.clone(),
            })
        })?;

        let mut column = Column::new(parts.name, parts.db_type);
        column.size = parts.size.map(str::to_string);
        column.not_null = parts.not_null;
        column.unsigned = parts.unsigned;
        column.auto_increment = parts.auto_increment;
        table.add_column(column);
        Ok(())
    }

    fn parse_primary_key(&self, table: &mut Table, l: &Line<'_>) -> Result<()> {
        let parts = line::key_parts(l.trimmed);
        // A primary key must name exactly one column.
        let name = match parts {
            Some(mut p) if p.columns.len() == 1 => p.columns.remove(0),
            _ => {
                return Err(Box::new(Error::MalformedKey {
                    src: self.source(),
                    span: l.span(),
                    table: table.db_name.clone(),
                }));
            }
        };

        match table.find_column(&name) {
            Some(pos) => {
                table.primary = Some(pos);
                Ok(())
            }
            None => Err(Box::new(Error::UnknownPrimaryColumn {
                src: self.source(),
                span: l.span(),
                table: table.db_name.clone(),
                column: name,
            })),
        }
    }

    fn parse_key(&self, table: &mut Table, l: &Line<'_>, unique: bool) -> Result<()> {
        let parts = line::key_parts(l.trimmed).ok_or_else(|| {
            Box::new(Error::MalformedKey {
                src: self.source(),
                span: l.span(),
                table: table.db_name.clone(),
            })
        })?;

        let index_name = if parts.name.is_empty() {
            parts.columns.join("_")
        } else {
            parts.name.clone()
        };

        let mut columns = Vec::with_capacity(parts.columns.len());
        for name in &parts.columns {
            let pos = table.find_column(name).ok_or_else(|| {
                Box::new(Error::UnknownIndexColumn {
                    src: self.source(),
                    span: l.span(),
                    table: table.db_name.clone(),
                    index: index_name.clone(),
                    column: name.clone(),
                })
            })?;
            columns.push(pos);
        }

        if columns.len() == 1 {
            let index = Index {
                name: index_name,
                column: columns[0],
            };
            if unique {
                table.unique_indexes.push(index);
            } else {
                table.indexes.push(index);
            }
        } else {
            let union = UnionIndex {
                name: index_name,
                column_names: parts.columns,
                columns,
            };
            if unique {
                table.unique_union_indexes.push(union);
            } else {
                table.union_indexes.push(union);
            }
        }
        Ok(())
    }

    fn source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.text.to_string())
    }
}

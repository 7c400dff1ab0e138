//! Assembly of the generated Go source file.

use dalgen_codegen::{CodeBuilder, Emit};

/// Accumulates the generated file: package clause, the fixed import block,
/// and body chunks in emission order.
///
/// Imports are grouped stdlib-first the way `goimports` lays them out.
/// Silencer lines (`var _ = ...`) keep imports that only some schemas use
/// from tripping the unused-import check.
pub struct GoFile {
    package: String,
    std_imports: Vec<String>,
    ext_imports: Vec<String>,
    silencers: Vec<String>,
    chunks: Vec<String>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            std_imports: Vec::new(),
            ext_imports: Vec::new(),
            silencers: Vec::new(),
            chunks: Vec::new(),
        }
    }

    pub fn std_import(&mut self, path: &str) -> &mut Self {
        self.std_imports.push(path.to_string());
        self
    }

    pub fn ext_import(&mut self, path: &str) -> &mut Self {
        self.ext_imports.push(path.to_string());
        self
    }

    /// Add a `var _ = expr` line emitted right after the imports.
    pub fn silence(&mut self, expr: &str) -> &mut Self {
        self.silencers.push(expr.to_string());
        self
    }

    /// Render a node into its own body chunk.
    pub fn add(&mut self, node: &impl Emit) -> &mut Self {
        let mut b = CodeBuilder::go();
        node.emit(&mut b);
        self.chunks.push(b.build());
        self
    }

    /// Render the whole file. Chunks are separated by one blank line.
    pub fn render(&self) -> String {
        let mut b = CodeBuilder::go();
        b.line(&format!("package {}", self.package)).blank();

        if !self.std_imports.is_empty() || !self.ext_imports.is_empty() {
            b.line("import (").indent();
            for path in &self.std_imports {
                b.line(&format!("\"{}\"", path));
            }
            if !self.std_imports.is_empty() && !self.ext_imports.is_empty() {
                b.blank();
            }
            for path in &self.ext_imports {
                b.line(&format!("\"{}\"", path));
            }
            b.dedent().line(")").blank();
        }

        for expr in &self.silencers {
            b.line(&format!("var _ = {}", expr));
        }
        if !self.silencers.is_empty() {
            b.blank();
        }

        let mut out = b.build();
        for (i, chunk) in self.chunks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(chunk);
        }
        out
    }
}

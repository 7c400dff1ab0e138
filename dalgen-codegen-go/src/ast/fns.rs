//! Go function builder.

use dalgen_codegen::{CodeBuilder, Emit};

/// A parameter in a Go function signature.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Builder for Go functions and methods.
///
/// Body lines are emitted verbatim one indent level inside the braces;
/// nested blocks carry their own leading tabs in the line text.
#[derive(Debug, Clone, Default)]
pub struct GoFunc {
    name: String,
    receiver: Option<(String, String)>,
    params: Vec<Param>,
    results: Option<String>,
    body: Vec<String>,
}

impl GoFunc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the method receiver, e.g. `("dao", "*UserDao")`.
    pub fn receiver(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.receiver = Some((name.into(), ty.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    /// Set the raw results clause, e.g. `"*UserQuery"` or `"(*User, error)"`.
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.results = Some(results.into());
        self
    }

    /// Add one body line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    /// Add a blank body line.
    pub fn blank(mut self) -> Self {
        self.body.push(String::new());
        self
    }

    /// Add multiple body lines.
    pub fn lines(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.body.extend(lines.into_iter().map(Into::into));
        self
    }

    fn signature(&self) -> String {
        let receiver = match &self.receiver {
            Some((name, ty)) => format!("({} {}) ", name, ty),
            None => String::new(),
        };
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        match &self.results {
            Some(results) => format!("func {}{}({}) {} {{", receiver, self.name, params, results),
            None => format!("func {}{}({}) {{", receiver, self.name, params),
        }
    }
}

impl Emit for GoFunc {
    fn emit(&self, b: &mut CodeBuilder) {
        b.block(&self.signature(), "}", |b| {
            for line in &self.body {
                if line.is_empty() {
                    b.blank();
                } else {
                    b.line(line);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: &GoFunc) -> String {
        let mut b = CodeBuilder::go();
        f.emit(&mut b);
        b.build()
    }

    #[test]
    fn test_plain_function() {
        let f = GoFunc::new("main").line("run()");
        assert_eq!(render(&f), "func main() {\n\trun()\n}\n");
    }

    #[test]
    fn test_method_with_results() {
        let f = GoFunc::new("Query")
            .receiver("dao", "*UserDao")
            .results("*UserQuery")
            .line("return NewUserQuery(dao)");
        assert_eq!(
            render(&f),
            "func (dao *UserDao) Query() *UserQuery {\n\treturn NewUserQuery(dao)\n}\n"
        );
    }

    #[test]
    fn test_params() {
        let f = GoFunc::new("Delete")
            .receiver("dao", "*UserDao")
            .param("ctx", "context.Context")
            .param("id", "int64")
            .results("error")
            .line("return nil");
        assert!(render(&f).contains("func (dao *UserDao) Delete(ctx context.Context, id int64) error {"));
    }

    #[test]
    fn test_nested_body_lines_keep_inner_tabs() {
        let f = GoFunc::new("f")
            .line("if ok {")
            .line("\treturn")
            .line("}");
        assert_eq!(render(&f), "func f() {\n\tif ok {\n\t\treturn\n\t}\n}\n");
    }

    #[test]
    fn test_blank_body_line() {
        let f = GoFunc::new("f").line("a()").blank().line("b()");
        assert_eq!(render(&f), "func f() {\n\ta()\n\n\tb()\n}\n");
    }
}

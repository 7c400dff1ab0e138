//! Go struct builder.

use dalgen_codegen::{CodeBuilder, Emit};

/// A field in a Go struct.
#[derive(Debug, Clone)]
pub struct GoField {
    pub name: String,
    pub ty: String,
    pub comment: Option<String>,
}

impl GoField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            comment: None,
        }
    }

    /// Attach a trailing line comment (emitted as `//text`).
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Builder for Go structs.
#[derive(Debug, Clone, Default)]
pub struct GoStruct {
    name: String,
    embeds: Vec<String>,
    fields: Vec<GoField>,
}

impl GoStruct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Embed another type (anonymous field).
    pub fn embed(mut self, ty: impl Into<String>) -> Self {
        self.embeds.push(ty.into());
        self
    }

    pub fn field(mut self, field: GoField) -> Self {
        self.fields.push(field);
        self
    }
}

impl Emit for GoStruct {
    fn emit(&self, b: &mut CodeBuilder) {
        b.block(&format!("type {} struct {{", self.name), "}", |b| {
            for embed in &self.embeds {
                b.line(embed);
            }
            for field in &self.fields {
                match &field.comment {
                    Some(c) => b.line(&format!("{} {} //{}", field.name, field.ty, c)),
                    None => b.line(&format!("{} {}", field.name, field.ty)),
                };
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(s: &GoStruct) -> String {
        let mut b = CodeBuilder::go();
        s.emit(&mut b);
        b.build()
    }

    #[test]
    fn test_empty_struct() {
        let s = GoStruct::new("Empty");
        assert_eq!(render(&s), "type Empty struct {\n}\n");
    }

    #[test]
    fn test_struct_with_fields() {
        let s = GoStruct::new("User")
            .field(GoField::new("Id", "int64"))
            .field(GoField::new("Name", "string"));
        assert_eq!(
            render(&s),
            "type User struct {\n\tId int64\n\tName string\n}\n"
        );
    }

    #[test]
    fn test_struct_with_embed() {
        let s = GoStruct::new("UserQuery")
            .embed("QueryBase")
            .field(GoField::new("dao", "*UserDao"));
        assert_eq!(
            render(&s),
            "type UserQuery struct {\n\tQueryBase\n\tdao *UserDao\n}\n"
        );
    }

    #[test]
    fn test_field_comment() {
        let s = GoStruct::new("User").field(GoField::new("Name", "string").comment("size=32"));
        assert!(render(&s).contains("Name string //size=32"));
    }
}

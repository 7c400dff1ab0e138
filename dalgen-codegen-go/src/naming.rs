//! Go-specific naming conventions.

/// Go reserved words that cannot be used as parameter names.
const GO_RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Derive a Go parameter name from a PascalCase identifier: lower the first
/// character, and suffix an underscore when the result is a reserved word.
pub fn param_name(ident: &str) -> String {
    let mut chars = ident.chars();
    let name: String = match chars.next() {
        None => return String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    };
    if GO_RESERVED.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_name() {
        assert_eq!(param_name("Id"), "id");
        assert_eq!(param_name("OrgId"), "orgId");
        assert_eq!(param_name(""), "");
    }

    #[test]
    fn test_param_name_escapes_reserved() {
        assert_eq!(param_name("Type"), "type_");
        assert_eq!(param_name("Range"), "range_");
    }
}

//! Identifier case mapping between schema names and generated symbols.

/// Convert a snake_case schema name to PascalCase (e.g., "user_id" -> "UserId").
///
/// Empty segments produced by leading, trailing, or doubled underscores are
/// absorbed without emitting anything.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a schema name to the CONSTANT_CASE prefix used for generated
/// constants (e.g., "user_info" -> "USER_INFO").
pub fn to_constant_case(s: &str) -> String {
    s.to_uppercase()
}

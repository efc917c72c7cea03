//! Name helpers shared by the parser and the class index.

/// The last segment of a namespace-qualified name.
///
/// `"App\Models\User"` → `"User"`, `"User"` → `"User"`.
pub(crate) fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

/// Strip the leading `\` of a fully-qualified name.
pub(crate) fn strip_fqn_prefix(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// The key a class is stored under in the index.
///
/// PHP class names are case-insensitive, so lookups compare lower-cased
/// names with any leading `\` removed.
pub(crate) fn class_key(name: &str) -> String {
    strip_fqn_prefix(name).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_takes_last_segment() {
        assert_eq!(short_name("App\\Models\\User"), "User");
        assert_eq!(short_name("User"), "User");
    }

    #[test]
    fn class_key_ignores_case_and_leading_backslash() {
        assert_eq!(class_key("\\App\\User"), "app\\user");
        assert_eq!(class_key("app\\USER"), "app\\user");
    }
}

//! Text helpers shared by the parser and generator
//!
//! These operate on the textual conventions of MySQL dumps (backtick
//! quoting, comma-separated field lists, uppercase keyword prefixes)
//! rather than on any grammar.

/// Remove all backtick quoting from a string
pub fn strip_backticks(s: &str) -> String {
    s.replace('`', "")
}

/// Strip the first matching keyword prefix from a statement
///
/// Keywords are tried in order, so longer variants must come before their
/// prefixes (e.g. `CREATE TABLE IF NOT EXISTS` before `CREATE TABLE`).
/// Returns the input unchanged when no keyword matches.
pub fn strip_leading_keyword<'a>(s: &'a str, keywords: &[&str]) -> &'a str {
    for keyword in keywords {
        if let Some(rest) = s.strip_prefix(keyword) {
            return rest;
        }
    }
    s
}

/// Split a parenthesized field list into trimmed, unquoted names
///
/// `` `a`, `b` `` and `a,b` both yield `["a", "b"]`, so key equality does
/// not depend on the dump's spacing style.
pub fn split_field_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|field| strip_backticks(field).trim().to_string())
        .collect()
}

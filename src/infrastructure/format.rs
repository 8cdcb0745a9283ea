//! Placeholder rendering for composed format strings.
//!
//! Format strings use `{}` as a positional placeholder. Rendering never fails on
//! a mismatch:
//! - `{}` with no argument left stays literal
//! - arguments with no placeholder left are ignored
//! - `\{}` renders a literal `{}`; `\\{}` renders a backslash and an argument

use std::fmt::Display;

const PLACEHOLDER: &str = "{}";

/// Substitute `arguments` into `format`.
///
/// # Panics
/// Panics if an argument's `Display` implementation fails, like `format!`.
pub fn render(format: &str, arguments: &[&dyn Display]) -> String {
    let mut rendered = String::with_capacity(format.len() + arguments.len() * 8);
    let mut remaining_args = arguments.iter();
    let mut rest = format;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        let before = &rest[..pos];
        rest = &rest[pos + PLACEHOLDER.len()..];

        if before.ends_with("\\\\") {
            rendered.push_str(&before[..before.len() - 1]);
        } else if let Some(stripped) = before.strip_suffix('\\') {
            rendered.push_str(stripped);
            rendered.push_str(PLACEHOLDER);
            continue;
        } else {
            rendered.push_str(before);
        }

        match remaining_args.next() {
            Some(argument) => rendered.push_str(&argument.to_string()),
            None => rendered.push_str(PLACEHOLDER),
        }
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_substitution() {
        assert_eq!(render("a {} b {}", &[&1, &"two"]), "a 1 b two");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(render("plain text", &[]), "plain text");
        assert_eq!(render("", &[]), "");
    }

    #[test]
    fn test_missing_arguments_stay_literal() {
        assert_eq!(render("{} and {}", &[&"x"]), "x and {}");
    }

    #[test]
    fn test_surplus_arguments_are_ignored() {
        assert_eq!(render("only {}", &[&1, &2, &3]), "only 1");
    }

    #[test]
    fn test_escaped_placeholder() {
        assert_eq!(render("literal \\{} then {}", &[&"x"]), "literal {} then x");
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(render("path C:\\\\{}", &[&"dir"]), "path C:\\dir");
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(render("{}{}{}", &[&'a', &'b', &'c']), "abc");
    }

    #[test]
    fn test_unicode_around_placeholders() {
        assert_eq!(
            render("这是一条测试日志 {} {}", &[&1.5, &"哈哈"]),
            "这是一条测试日志 1.5 哈哈"
        );
    }

    #[test]
    fn test_lone_braces_are_kept() {
        assert_eq!(render("{ not } a {x}", &[&1]), "{ not } a {x}");
    }
}

//! Small text helpers shared across host consumers.

/// Returns whether `value` is empty or contains only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_blank_table() {
        let cases = [
            ("", true),
            (" ", true),
            ("\t\r\n", true),
            ("\u{a0}", true),
            ("a", false),
            (" a ", false),
            ("0", false),
        ];

        for (input, expected) in cases {
            assert_eq!(is_blank(input), expected, "input {input:?}");
        }
    }
}

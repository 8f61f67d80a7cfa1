//! Category field checks.

/// Returns true for `#RRGGBB` colors (either case).
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#808080"));
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("808080"));
        assert!(!is_hex_color("#80808"));
        assert!(!is_hex_color("#8080800"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color(""));
    }
}

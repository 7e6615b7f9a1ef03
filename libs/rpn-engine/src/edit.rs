//! Edit buffer text manipulation
//!
//! Pure string functions behind the input-edit actions. No numeric parsing
//! happens here; legality of the text is only checked on commit.

/// Append `text` to the buffer, starting a new one when not editing
pub fn insert(buffer: Option<&str>, text: &str) -> String {
    match buffer {
        Some(current) => format!("{}{}", current, text),
        None => text.to_string(),
    }
}

/// Remove the last character; an empty buffer stays empty
pub fn delete_last(buffer: &str) -> String {
    let mut result = buffer.to_string();
    result.pop();
    result
}

/// Byte position of the exponent marker
///
/// `E` and `e` are both recognized. If a buffer contains both, the first
/// occurrence wins.
pub fn exponent_marker(buffer: &str) -> Option<usize> {
    buffer.find(|c: char| c == 'E' || c == 'e')
}

/// Toggle the sign of the number being typed
///
/// Without an exponent marker the mantissa sign is toggled. With a marker,
/// the exponent sign is toggled, or a `-` is inserted right after the marker
/// when no sign has been typed yet.
pub fn toggle_sign(buffer: &str) -> String {
    match exponent_marker(buffer) {
        None => toggle_mantissa(buffer),
        Some(position) => toggle_exponent(buffer, position),
    }
}

fn toggle_mantissa(buffer: &str) -> String {
    match buffer.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", buffer),
    }
}

fn toggle_exponent(buffer: &str, marker: usize) -> String {
    // marker is ASCII, so marker + 1 is a char boundary
    let (head, tail) = buffer.split_at(marker + 1);
    match tail.chars().next() {
        Some('-') => format!("{}+{}", head, &tail[1..]),
        Some('+') => format!("{}-{}", head, &tail[1..]),
        _ => format!("{}-{}", head, tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        assert_eq!(insert(None, "5"), "5");
        assert_eq!(insert(Some("5"), "4"), "54");
        assert_eq!(insert(Some(""), "1"), "1");
        assert_eq!(insert(None, "1.7976931348623157e+308"), "1.7976931348623157e+308");
    }

    #[test]
    fn test_delete_last() {
        assert_eq!(delete_last("12"), "1");
        assert_eq!(delete_last("1"), "");
        assert_eq!(delete_last(""), "");
    }

    #[test]
    fn test_mantissa_sign() {
        assert_eq!(toggle_sign("1"), "-1");
        assert_eq!(toggle_sign("-1"), "1");
        assert_eq!(toggle_sign(""), "-");
        assert_eq!(toggle_sign("-"), "");
        assert_eq!(toggle_sign("2.5"), "-2.5");
    }

    #[test]
    fn test_mantissa_sign_is_own_inverse() {
        for buffer in ["", "0", "1", "-1", "3.14", ".5", "-0.25"] {
            assert_eq!(toggle_sign(&toggle_sign(buffer)), buffer, "buffer {:?}", buffer);
        }
    }

    #[test]
    fn test_exponent_sign_shapes() {
        let cases = [
            ("1E5", "1E-5"),
            ("1E+5", "1E-5"),
            ("3E-2", "3E+2"),
            ("3E", "3E-"),
            ("3E+", "3E-"),
            ("3E-", "3E+"),
        ];
        for (input, expected) in cases {
            assert_eq!(toggle_sign(input), expected, "upper {:?}", input);
            let lower = input.to_lowercase();
            assert_eq!(toggle_sign(&lower), expected.to_lowercase(), "lower {:?}", lower);
        }
    }

    #[test]
    fn test_exponent_keeps_mantissa_sign() {
        assert_eq!(toggle_sign("-2E3"), "-2E-3");
    }

    #[test]
    fn test_first_marker_wins() {
        assert_eq!(exponent_marker("1e2E3"), Some(1));
        assert_eq!(exponent_marker("1E2e3"), Some(1));
        assert_eq!(toggle_sign("1e2E3"), "1e-2E3");
        assert_eq!(exponent_marker("123"), None);
    }
}

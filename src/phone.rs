/// Formats raw keyboard input as `+7 (XXX) XXX-XX-XX`, emitting only the
/// groups the typed digits can fill.
pub fn format_phone(input: &str) -> String {
    let mut digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with('8') {
        digits.replace_range(..1, "7");
    }
    if !digits.starts_with('7') {
        digits.insert(0, '7');
    }

    let area = group(&digits, 1, 4);
    let exchange = group(&digits, 4, 7);
    let first_pair = group(&digits, 7, 9);
    let second_pair = group(&digits, 9, 11);

    let mut out = String::from("+7");
    if !area.is_empty() {
        out.push_str(" (");
        out.push_str(area);
        if area.len() == 3 {
            out.push(')');
        }
    }
    if !exchange.is_empty() {
        out.push(' ');
        out.push_str(exchange);
    }
    if !first_pair.is_empty() {
        out.push('-');
        out.push_str(first_pair);
    }
    if !second_pair.is_empty() {
        out.push('-');
        out.push_str(second_pair);
    }
    out
}

/// True when the formatted number carries nothing beyond the country code.
pub fn is_blank(formatted: &str) -> bool {
    formatted.chars().filter(char::is_ascii_digit).count() <= 1
}

// `digits` is ASCII-only, so byte offsets are char offsets.
fn group(digits: &str, start: usize, end: usize) -> &str {
    let end = end.min(digits.len());
    if start >= end {
        ""
    } else {
        &digits[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::{format_phone, is_blank};

    #[test]
    fn formats_complete_number() {
        assert_eq!(format_phone("79151234567"), "+7 (915) 123-45-67");
    }

    #[test]
    fn leading_eight_becomes_country_code() {
        assert_eq!(format_phone("8 915 123 45 67"), "+7 (915) 123-45-67");
    }

    #[test]
    fn missing_country_code_is_prepended() {
        assert_eq!(format_phone("915"), "+7 (915)");
        assert_eq!(format_phone("9151"), "+7 (915) 1");
    }

    #[test]
    fn partial_input_only_emits_filled_groups() {
        assert_eq!(format_phone(""), "+7");
        assert_eq!(format_phone("7"), "+7");
        assert_eq!(format_phone("79"), "+7 (9");
        assert_eq!(format_phone("791512345"), "+7 (915) 123-45");
        assert_eq!(format_phone("7915123456"), "+7 (915) 123-45-6");
    }

    #[test]
    fn extra_digits_are_dropped() {
        assert_eq!(format_phone("+7 (915) 123-45-6789"), "+7 (915) 123-45-67");
    }

    #[test]
    fn formatting_is_idempotent_and_prefixed() {
        for raw in ["", "8", "abc", "89", "8915123", "+7 (915) 12", "12345678901234", "7 9 1"] {
            let once = format_phone(raw);
            assert!(once.starts_with("+7"), "{raw:?} -> {once:?}");
            assert_eq!(format_phone(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn country_code_alone_is_blank() {
        assert!(is_blank("+7"));
        assert!(!is_blank("+7 (9"));
    }
}

/// Low 8 bits of the byte sum, the checksum convention shared by UART sensor
/// modules.
pub(crate) fn wrapping_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte))
}

/// Longest valid UTF-8 prefix of a raw field.
///
/// Fields are cut at fixed byte offsets first, so a noise byte only ever
/// truncates the field it falls in.
pub(crate) fn utf8_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
    }
}

/// Parse the leading decimal number of an ASCII field.
///
/// Leading whitespace is skipped and anything after the numeric prefix is
/// ignored (`"32.4C"` reads as `32.4`), matching how sensor firmware emits
/// unit suffixes inside fixed-width fields. Returns `None` when no digit is
/// found before the first non-numeric character.
pub(crate) fn parse_decimal_prefix(field: &str) -> Option<f32> {
    let text = field.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let dot = end;
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
            frac_digits += 1;
        }
        if int_digits == 0 && frac_digits == 0 {
            end = dot;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }
    text[..end].parse::<f32>().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_decimal_prefix, utf8_prefix, wrapping_sum};

    #[test]
    fn wrapping_sum_keeps_low_byte() {
        assert_eq!(wrapping_sum(&[0xFF, 0x02]), 0x01);
        assert_eq!(wrapping_sum(&[]), 0);
    }

    #[test]
    fn utf8_prefix_stops_at_invalid_byte() {
        assert_eq!(utf8_prefix(b"32.4C"), "32.4C");
        assert_eq!(utf8_prefix(b"32\xFF4C"), "32");
        assert_eq!(utf8_prefix(b"\xFF"), "");
    }

    #[test]
    fn decimal_prefix_plain() {
        assert_eq!(parse_decimal_prefix("070.0"), Some(70.0));
    }

    #[test]
    fn decimal_prefix_ignores_suffix_and_leading_space() {
        assert_eq!(parse_decimal_prefix("32.4C"), Some(32.4));
        assert_eq!(parse_decimal_prefix("  -5.5"), Some(-5.5));
        assert_eq!(parse_decimal_prefix(".5x"), Some(0.5));
    }

    #[test]
    fn decimal_prefix_rejects_non_numeric() {
        assert_eq!(parse_decimal_prefix("abc.d"), None);
        assert_eq!(parse_decimal_prefix("-"), None);
        assert_eq!(parse_decimal_prefix("."), None);
        assert_eq!(parse_decimal_prefix(""), None);
    }
}

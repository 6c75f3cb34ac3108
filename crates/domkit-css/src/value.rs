//! Numeric CSS value parsing

/// Parse the longest numeric prefix of `input`, the way `parseFloat` does.
///
/// Leading whitespace is skipped; `"12.5px"` → 12.5, `"-.5em"` → -0.5,
/// `"1e3"` → 1000, `"Infinity"` → ∞, `"auto"` → `None`.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let infinity = f64::INFINITY;
        return Some(if s.starts_with('-') { -infinity } else { infinity });
    }

    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Pixel value of a CSS length; anything unparsable is 0
pub fn css_px(value: &str) -> f64 {
    parse_float(value).unwrap_or(0.0)
}

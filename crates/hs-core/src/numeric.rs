use crate::{HsError, HsResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> HsResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HsError::NonFinite { what, value: v })
    }
}

/// Parse a user-typed number leniently.
///
/// - surrounding whitespace is ignored
/// - the first `,` is read as a decimal separator ("2,7" -> 2.7)
/// - only the leading numeric prefix counts ("22 °C" -> 22.0)
///
/// Returns `None` when no digits lead the text or the value is not finite.
pub fn parse_number(text: &str) -> Option<Real> {
    let normalized = text.trim().replacen(',', ".", 1);
    let len = numeric_prefix_len(&normalized);
    if len == 0 {
        return None;
    }
    normalized[..len].parse::<Real>().ok().filter(|v| v.is_finite())
}

/// Strict variant of [`parse_number`] for callers that report failures.
pub fn parse_number_strict(text: &str, what: &'static str) -> HsResult<Real> {
    parse_number(text).ok_or_else(|| HsError::Unparsable {
        what,
        text: text.to_string(),
    })
}

/// Length in bytes of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when followed by at least one digit
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_round_trips(v in -1.0e9_f64..1.0e9_f64) {
            let parsed = parse_number(&v.to_string()).unwrap();
            prop_assert!(nearly_equal(parsed, v, Tolerances::default()));
        }

        #[test]
        fn comma_form_matches_dot_form(v in 0.0_f64..1.0e6_f64) {
            let dotted = format!("{v:.3}");
            let comma = dotted.replace('.', ",");
            prop_assert_eq!(parse_number(&comma), parse_number(&dotted));
        }
    }
}

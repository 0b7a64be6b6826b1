//! Formatting of results for display.

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: f64) -> bool {
    let abs = n.abs();
    abs >= 1e21 || (abs != 0.0 && abs < 1e-6)
}

/// Formats a result for display.
///
/// Finite numbers use the shortest decimal representation that parses back to the same value,
/// switching to scientific notation for very large or very small magnitudes. Negative zero keeps
/// its sign.
///
/// ```
/// use calc_compute::format_number;
///
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(-0.0), "-0");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n.is_sign_negative() { "-" } else { "" };
        format!("{}Infinity", sign)
    } else if should_use_scientific(n) {
        format!("{:e}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(512.0), "512");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn fractions() {
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn signed_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn scientific() {
        assert_eq!(format_number(1e21), "1e21");
        assert_eq!(format_number(-2.5e30), "-2.5e30");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-10), "1.5e-10");
    }
}

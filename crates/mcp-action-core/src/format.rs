//! Number rendering that matches the action runtime's number-to-string rules.

/// Shortest round-trip rendering. Integral values print without a fraction,
/// and magnitudes `>= 1e21` or `< 1e-6` switch to exponent form.
pub fn number_to_string(value: f64) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        signed_exponent(&format!("{value:e}"))
    } else {
        format!("{value}")
    }
}

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Exponent form with a fixed number of fractional digits, e.g. `1.400000e+1`.
/// Exact halves round away from zero.
pub fn to_exponential(value: f64, digits: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exp) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exp: i32 = exp.parse().unwrap_or_default();

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let (mut kept, carried) = round_half_up(&all, digits + 1);
    if carried {
        kept.pop();
        exp += 1;
    }

    let mut out = sign(value).to_string();
    out.push(char::from(kept[0]));
    if digits > 0 {
        out.push('.');
        out.extend(kept[1..].iter().map(|&d| char::from(d)));
    }
    let exp_sign = if exp < 0 { '-' } else { '+' };
    out.push_str(&format!("e{exp_sign}{}", exp.abs()));
    out
}

/// Fixed-point form with a fixed number of fractional digits. Exact halves
/// round away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s;
    }
    if value.abs() >= 1e21 {
        return number_to_string(value);
    }
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let (kept, _) = round_half_up(&all, int_part.len() + digits);
    let (int_digits, frac_digits) = kept.split_at(kept.len() - digits);

    let mut out = sign(value).to_string();
    out.extend(int_digits.iter().map(|&d| char::from(d)));
    if digits > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| char::from(d)));
    }
    out
}

/// Keep the first `keep` decimal digits, rounding up when the next digit is
/// 5 or more. The second value is true when a carry added a leading digit.
fn round_half_up(all: &[u8], keep: usize) -> (Vec<u8>, bool) {
    let mut kept: Vec<u8> = all.iter().copied().take(keep).collect();
    kept.resize(keep, b'0');
    if all.get(keep).map_or(true, |&d| d < b'5') {
        return (kept, false);
    }
    for d in kept.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return (kept, false);
        }
    }
    kept.insert(0, b'1');
    (kept, true)
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}

fn signed_exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_and_fractional() {
        assert_eq!(number_to_string(14.0), "14");
        assert_eq!(number_to_string(2.5), "2.5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_large_and_small_magnitudes() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(to_fixed(f64::NAN, 6), "NaN");
    }

    #[test]
    fn test_exponential() {
        assert_eq!(to_exponential(14.0, 6), "1.400000e+1");
        assert_eq!(to_exponential(0.00125, 6), "1.250000e-3");
        assert_eq!(to_exponential(0.0, 6), "0.000000e+0");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(to_fixed(14.0, 6), "14.000000");
        assert_eq!(to_fixed(-2.5, 6), "-2.500000");
        assert_eq!(to_fixed(0.0, 6), "0.000000");
        assert_eq!(to_fixed(-0.0, 6), "0.000000");
        assert_eq!(to_fixed(1.0 / 3.0, 6), "0.333333");
        assert_eq!(to_fixed(2.0 / 3.0, 6), "0.666667");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(1.0 / 128.0, 6), "0.007813");
        assert_eq!(to_fixed(-1.0 / 128.0, 6), "-0.007813");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_exponential(1.0078125, 6), "1.007813e+0");
        assert_eq!(to_exponential(-1.0078125, 6), "-1.007813e+0");
    }

    #[test]
    fn test_near_ties_use_exact_value() {
        // 1.005 is stored just below 1.005.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.0078124999, 6), "0.007812");
    }

    #[test]
    fn test_rounding_carries() {
        assert_eq!(to_fixed(9.9999996, 6), "10.000000");
        assert_eq!(to_fixed(0.9999999, 6), "1.000000");
        assert_eq!(to_exponential(9.9999999, 6), "1.000000e+1");
        assert_eq!(to_exponential(123456.0, 2), "1.23e+5");
    }
}

//! Number formatting shared by the emitters.

/// Format like C's `%g`: six significant digits, trailing zeros removed,
/// scientific notation when the exponent is below -4 or at least 6.
///
/// ```
/// use memkmc_zacros::format::general;
///
/// assert_eq!(general(0.5), "0.5");
/// assert_eq!(general(2.5e12), "2.5e+12");
/// assert_eq!(general(1e8), "1e+08");
/// assert_eq!(general(123456.0), "123456");
/// assert_eq!(general(1234567.0), "1.23457e+06");
/// ```
pub fn general(x: f64) -> String {
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Round to six significant digits first; the exponent is taken after
    // rounding so 999999.5 becomes 1e+06.
    let sci = format!("{x:.5e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp).max(0) as usize;
        strip_zeros(&format!("{x:.decimals$}"))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_zeros(mantissa), exp.abs())
    }
}

fn strip_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

//! Number rendering shared by parsers and reports.

/// Render a value with the shortest round-trip representation.
///
/// Magnitudes below `1e-6` or at least `1e21` switch to exponent form
/// (`2.9351731952139377e-8`, `1e+21`), matching how benchmark tools and
/// previously stored records print such numbers.
pub fn display(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

/// Render a ratio or threshold: integers without a decimal point, anything
/// else with exactly two decimals. Non-finite values render as in
/// [`display`].
pub fn fixed(value: f64) -> String {
    if !value.is_finite() {
        return display(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Parse a decimal token, rejecting NaN and infinities.
pub(crate) fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

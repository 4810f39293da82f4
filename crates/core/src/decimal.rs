//! One-decimal display formatting.

/// Formats `x` with one fractional digit, rounding exact halves away from
/// zero (`4.25` -> `"4.3"`). Other values round to the nearest decimal.
///
/// `{:.1}` already rounds the exact binary value correctly; it only differs
/// on true ties, which in binary are the values where `4x` is an odd integer.
pub fn to_fixed_1(x: f64) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }

    let quarters = x * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    if !is_tie {
        return format!("{x:.1}");
    }

    let tenths = (x.abs() * 10.0).ceil() as u64;
    let sign = if x < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", tenths / 10, tenths % 10)
}

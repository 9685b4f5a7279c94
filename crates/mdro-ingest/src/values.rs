//! Cell value parsing shared by the table readers.

/// Parses a string as a finite `f64`, returning `None` for invalid, empty or NaN values.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a 0/1 style flag. Accepts `1`, `1.0`, `true`, `t`, `y`, `yes`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_uppercase().as_str(),
        "1" | "1.0" | "TRUE" | "T" | "Y" | "YES"
    )
}

use serde_json::Value;

/// a string field that is present and not empty (whitespace counts as content)
pub fn present_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// a string field that still has content after trimming, returned trimmed
pub fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Coerce a JSON number or numeric string into a finite, strictly positive value.
///
/// Anything else (missing, `null`, booleans, non-numeric text, `NaN`, infinities)
/// yields `None`.
pub fn positive_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number > 0.0).then_some(number)
}

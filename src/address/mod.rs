use std::sync::LazyLock;
use regex::Regex;

pub mod model;

/// 5 digits, optionally followed by a hyphen and 4 more (ZIP+4).
static ZIP_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

/// The 50 states plus the District of Columbia, in dropdown order.
pub const US_STATES: [(&str, &str); 51] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
];

/// check a state code against the known jurisdictions, ignoring case
pub fn is_valid_state(state: &str) -> bool {
    state_name(state).is_some()
}

/// display name for a state code, e.g. `ca` -> `California`
pub fn state_name(state: &str) -> Option<&'static str> {
    let code = state.to_uppercase();
    US_STATES.iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Normalize a ZIP to `12345` or `12345-6789`.
///
/// Every non-digit is dropped first. Nine remaining digits are hyphenated after
/// the fifth; any other digit count is returned as the bare digit string, which
/// [`is_valid_zip`] then rejects unless it is exactly five digits.
pub fn normalize_zip(zip: &str) -> String {
    let digits = digits_of(zip);
    if digits.len() == 9 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_REG.is_match(&normalize_zip(zip))
}

/// Format partially typed ZIP input for display, capped at 9 digits.
///
/// * `12` -> `12`
/// * `941021` -> `94102-1`
pub fn format_zip_input(raw: &str) -> String {
    let digits = digits_of(raw).chars().take(9).collect::<String>();
    if digits.len() <= 5 {
        digits
    } else {
        format!("{}-{}", &digits[..5], &digits[5..])
    }
}

fn digits_of(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

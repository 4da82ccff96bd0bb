//! Field coercion for loosely-typed catalog columns
//!
//! Every function here is total: malformed input coerces to `false`,
//! `None`, or an empty list, never a panic or an error. Coercion runs once
//! at normalization time so downstream code only sees typed records.

/// Case-insensitive truthy match: {"true", "1", "yes", "y"}
pub fn to_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// A field is false-like when it is absent/empty or an explicit negative.
///
/// Several accessory columns are tri-state in the source data: a real
/// id/name, or an explicit "0"/"false", or nothing at all. Both of the
/// latter mean "no value" here.
pub fn is_false_like(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(s) => {
            let s = s.trim();
            s.is_empty()
                || matches!(
                    s.to_ascii_lowercase().as_str(),
                    "false" | "0" | "no" | "n"
                )
        }
    }
}

/// String-or-absent: false-like fields normalize to `None`, not `"false"`.
pub fn to_str_or_absent(raw: Option<&str>) -> Option<String> {
    if is_false_like(raw) {
        None
    } else {
        raw.map(|s| s.trim().to_string())
    }
}

/// Finite number or absent. Never zero-substitutes a failed parse; callers
/// that need zero must decide that visibly.
pub fn to_num(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Non-negative integer or absent (quantities, channel counts, port counts).
pub fn to_count(raw: Option<&str>) -> Option<u32> {
    let n = to_num(raw)?;
    if n < 0.0 {
        return None;
    }
    Some(n.round() as u32)
}

/// Pipe-delimited list, trimmed, empties dropped. Empty input yields an
/// empty list, never `[""]`.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bool_truthy_variants() {
        assert!(to_bool("true"));
        assert!(to_bool("TRUE"));
        assert!(to_bool("1"));
        assert!(to_bool("Yes"));
        assert!(to_bool(" y "));
    }

    #[test]
    fn test_to_bool_everything_else_is_false() {
        assert!(!to_bool("false"));
        assert!(!to_bool(""));
        assert!(!to_bool("2"));
        assert!(!to_bool("oui"));
    }

    #[test]
    fn test_is_false_like() {
        assert!(is_false_like(None));
        assert!(is_false_like(Some("")));
        assert!(is_false_like(Some("  ")));
        assert!(is_false_like(Some("0")));
        assert!(is_false_like(Some("FALSE")));
        assert!(is_false_like(Some("no")));
        assert!(!is_false_like(Some("JB-100")));
        // "00" is a real value, not an explicit negative
        assert!(!is_false_like(Some("00")));
    }

    #[test]
    fn test_to_str_or_absent_distinguishes_no_value_from_zero_string() {
        assert_eq!(to_str_or_absent(Some("0")), None);
        assert_eq!(to_str_or_absent(Some("false")), None);
        assert_eq!(
            to_str_or_absent(Some(" WM-200 ")),
            Some("WM-200".to_string())
        );
    }

    #[test]
    fn test_to_num_absent_not_zero() {
        assert_eq!(to_num(Some("4.5")), Some(4.5));
        assert_eq!(to_num(Some("")), None);
        assert_eq!(to_num(Some("n/a")), None);
        assert_eq!(to_num(Some("NaN")), None);
        assert_eq!(to_num(Some("inf")), None);
        assert_eq!(to_num(None), None);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(Some("16")), Some(16));
        assert_eq!(to_count(Some("2.0")), Some(2));
        assert_eq!(to_count(Some("-3")), None);
        assert_eq!(to_count(Some("")), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a|b | c"), vec!["a", "b", "c"]);
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list(" | |"), Vec::<String>::new());
    }
}

//! Input normalization shared by services.

use skillswap_core::error::AppError;

/// Trimmed value of a mandatory field.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of an optional field; blank becomes `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim entries, drop blanks and case-insensitive duplicates, keep order.
pub(crate) fn skill_list(values: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_list_dedupes_case_insensitively() {
        let input = vec![
            " Guitar ".to_string(),
            "guitar".to_string(),
            "".to_string(),
            "Spanish".to_string(),
        ];
        assert_eq!(skill_list(&input), vec!["Guitar", "Spanish"]);
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional(Some("   ")), None);
        assert_eq!(optional(Some(" Sat 10am ")), Some("Sat 10am".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn required_rejects_whitespace() {
        assert!(required("  ", "skill_needed").is_err());
        assert_eq!(required(" Guitar", "skill_needed").unwrap(), "Guitar");
    }
}

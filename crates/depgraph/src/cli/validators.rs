//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to reject
//! malformed input at parse time, before any lookup happens.

/// Validate a package name: non-empty, no whitespace or control characters.
pub fn validate_package_name(s: &str) -> Result<String, String> {
    validate_token(s, "Package name")
}

/// Validate a package version: non-empty, no whitespace or control characters.
pub fn validate_version(s: &str) -> Result<String, String> {
    validate_token(s, "Package version")
}

fn validate_token(s: &str, field: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    if let Some(pos) = s.chars().position(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!(
            "{field} contains whitespace or a control character at position {pos}"
        ));
    }

    Ok(s.to_string())
}

/// Validate a reverse-lookup fragment: non-empty after trimming.
pub fn validate_fragment(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Search fragment cannot be empty".to_string());
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Newtonsoft.Json")]
    #[case("  Serilog  ")]
    #[case("Microsoft.Extensions.Logging.Abstractions")]
    fn test_valid_package_names(#[case] name: &str) {
        assert_eq!(validate_package_name(name), Ok(name.trim().to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("two words")]
    #[case("tab\there")]
    fn test_invalid_package_names(#[case] name: &str) {
        assert!(validate_package_name(name).is_err());
    }

    #[rstest]
    #[case("1.0")]
    #[case("13.0.1")]
    #[case("2.0.0-preview.1+build.5")]
    fn test_valid_versions(#[case] version: &str) {
        assert!(validate_version(version).is_ok());
    }

    #[test]
    fn test_empty_version_message() {
        assert_eq!(
            validate_version(""),
            Err("Package version cannot be empty".to_string())
        );
    }

    #[test]
    fn test_fragment() {
        assert_eq!(validate_fragment(" lib "), Ok("lib".to_string()));
        assert!(validate_fragment("  ").is_err());
    }
}

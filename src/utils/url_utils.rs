/// Prefixes `https://` unless the caller already supplied a scheme. No
/// further validation happens here; upstream rejects anything unusable.
pub fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
    }

    #[test]
    fn existing_schemes_are_kept() {
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(ensure_scheme("  example.com "), "https://example.com");
    }
}

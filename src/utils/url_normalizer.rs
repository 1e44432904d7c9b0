//! Target URL normalization.
//!
//! Links are stored exactly as entered apart from one change: a bare address
//! such as `example.com/page` gets an `https://` prefix. Only `http` and
//! `https` targets are accepted.

use url::Url;

/// Scheme prepended when the operator omits one.
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Returns true if `input` already starts with `scheme://`.
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`
/// (RFC 3986, section 3.1).
pub fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalizes a target URL entered in the admin form.
///
/// # Steps
///
/// 1. Trim surrounding whitespace
/// 2. Reject control characters (tab, CR, LF, ...)
/// 3. Prefix `https://` if no scheme is present
/// 4. Check the result parses as an `http`/`https` URL with a host
///
/// The returned string is the trimmed input plus the optional prefix; it is
/// not re-serialized, so the redirect target matches what was typed.
///
/// # Errors
///
/// Returns a description of the problem if the URL is empty, unparseable,
/// contains control characters, or uses a scheme other than `http`/`https`.
pub fn normalize_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("URL is required".to_string());
    }

    // The url crate silently drops interior tabs and newlines, but the stored
    // string must stay usable as a Location header.
    if trimmed.chars().any(char::is_control) {
        return Err("URL contains control characters".to_string());
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| format!("Invalid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("Unsupported URL scheme '{}'", parsed.scheme()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("URL has no host".to_string());
    }

    Ok(candidate)
}

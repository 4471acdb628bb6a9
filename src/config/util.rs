//! Configuration utility functions.

/// Join a base URL and a mapping segment.
///
/// Absolute base URLs are resolved with `url` crate semantics (the base is
/// treated as a directory), so a segment starting with `/` replaces the base
/// path. Root-relative or empty bases are concatenated with a single `/`.
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/app", "assets")  -> "https://example.com/app/assets"
/// join_url("https://example.com/app", "/assets") -> "https://example.com/assets"
/// join_url("", "assets")                         -> "/assets"
/// join_url("/static/", "/img")                   -> "/static/img"
/// ```
pub fn join_url(base: &str, segment: &str) -> String {
    // Segment is already a full URL
    if url::Url::parse(segment).is_ok_and(|u| !u.cannot_be_a_base()) {
        return segment.to_owned();
    }

    if let Ok(parsed) = url::Url::parse(base)
        && !parsed.cannot_be_a_base()
    {
        let dir = format!("{}/", parsed.as_str().trim_end_matches('/'));
        if let Ok(joined) = url::Url::parse(&dir).and_then(|d| d.join(segment)) {
            return joined.into();
        }
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

// ============================================================================
// tests
// ============================================================================

use url::Url;

use crate::error::ValidationError;
use crate::tools::types::SourceOptions;
use crate::types::Locator;

/// Parse a cleaned locator as an absolute URL.
///
/// Requires a scheme followed by an explicit `//` authority and a non-empty
/// host. The WHATWG parser alone would accept `ftp:/bad` or
/// `https:///example.com` (it repairs both), so the authority marker and
/// the host are checked on the raw text.
pub(super) fn parse_locator(
    locator: Locator,
    text: &str,
    opts: &SourceOptions,
) -> Result<Url, ValidationError> {
    let malformed = |reason: &str| ValidationError::MalformedUrl {
        locator,
        value: text.to_string(),
        reason: reason.to_string(),
    };

    let (scheme, rest) = text
        .split_once(':')
        .ok_or_else(|| malformed("missing scheme"))?;
    if !is_scheme(scheme) {
        return Err(malformed("missing scheme"));
    }
    let authority = match rest.strip_prefix("//") {
        Some(after) => after
            .split(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
            .next()
            .unwrap_or_default(),
        None => return Err(malformed("missing authority")),
    };
    if typed_host(authority).is_empty() {
        return Err(malformed("missing host"));
    }

    let url = Url::parse(text).map_err(|e| malformed(&e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(malformed("missing host")),
    }

    if !opts.allows_scheme(url.scheme()) {
        return Err(malformed(&format!("scheme {} not allowed", url.scheme())));
    }

    Ok(url)
}

/// Host part of an authority as typed: userinfo and port stripped.
fn typed_host(authority: &str) -> &str {
    let host = authority.rsplit('@').next().unwrap_or_default();
    if host.starts_with('[') {
        return host;
    }
    host.split(':').next().unwrap_or_default()
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

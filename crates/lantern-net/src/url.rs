//! Absolute URL parsing.
//!
//! Recognizes `http://` and `https://` prefixes; a missing scheme defaults
//! to http. Parsing never fails -- malformed input degrades to best-effort
//! fields, and over-long components are truncated at fixed caps rather than
//! rejected. Callers must not rely on full fidelity for pathologically long
//! URLs.

/// Maximum stored host length in characters.
pub const MAX_HOST: usize = 128;
/// Maximum stored path length in characters.
pub const MAX_PATH: usize = 256;
/// Maximum stored query length in characters.
pub const MAX_QUERY: usize = 256;

/// The components of an absolute URL.
///
/// Invariants: `path` always begins with `/`; `query` excludes the leading
/// `?` and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: String,
}

impl ParsedUrl {
    /// Parse an absolute URL string.
    ///
    /// `https://` sets port 443 but no transport-layer encryption is
    /// implemented anywhere in the core; the scheme is recognized so that
    /// such URLs still produce sensible components.
    pub fn parse(input: &str) -> Self {
        let (rest, default_port) = if let Some(stripped) = input.strip_prefix("http://") {
            (stripped, 80)
        } else if let Some(stripped) = input.strip_prefix("https://") {
            (stripped, 443)
        } else {
            (input, 80)
        };

        // Host runs to the first of '/', ':', '?', or end of string.
        let host_end = rest
            .find(['/', ':', '?'])
            .unwrap_or(rest.len());
        let host = truncate(&rest[..host_end], MAX_HOST);
        let mut rest = &rest[host_end..];

        // An explicit ':port' overrides the scheme default. A junk port
        // (no digits, or out of range) falls back to the default, and any
        // non-digit junk before the path is skipped so the path survives.
        let mut port = default_port;
        if let Some(after_colon) = rest.strip_prefix(':') {
            let digits_end = after_colon
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_colon.len());
            port = after_colon[..digits_end].parse().unwrap_or(default_port);
            let resume = after_colon[digits_end..]
                .find(['/', '?'])
                .map(|i| digits_end + i)
                .unwrap_or(after_colon.len());
            rest = &after_colon[resume..];
        }

        let (path, query) = match rest.find('?') {
            Some(q) => (&rest[..q], &rest[q + 1..]),
            None => (rest, ""),
        };
        let path = if path.starts_with('/') {
            truncate(path, MAX_PATH)
        } else {
            "/".to_string()
        };
        let query = truncate(query, MAX_QUERY);

        Self {
            host,
            port,
            path,
            query,
        }
    }

    /// Path plus `?query` when the query is non-empty, as sent on the wire.
    pub fn request_target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// Copy at most `cap` characters of `s`.
fn truncate(s: &str, cap: usize) -> String {
    s.chars().take(cap).collect()
}

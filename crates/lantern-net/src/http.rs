//! Minimal blocking HTTP/1.1 client.
//!
//! Builds a fixed-header GET request, drives a [`NetworkBackend`] through
//! connect/send/receive, and parses the raw response bytes. No TLS, no
//! chunked transfer-encoding, no redirects; `Connection: close` framing
//! only, with end-of-stream marking the end of the body.

use log::{debug, info};

use lantern_types::backend::NetworkBackend;
use lantern_types::error::{LanternError, Result};

use crate::resolve::resolve;
use crate::url::ParsedUrl;

/// Accumulation buffer cap: responses beyond this are cut off.
pub const MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// Default User-Agent header value. Overridable per request via
/// [`build_request_with_agent`] and [`get_with_agent`].
pub const USER_AGENT: &str = "Lantern/0.1";

// ------------------------------------------------------------------
// Request building
// ------------------------------------------------------------------

/// Build a complete HTTP/1.1 request with the fixed header set and the
/// default User-Agent.
pub fn build_request(method: &str, url: &ParsedUrl) -> String {
    build_request_with_agent(method, url, USER_AGENT)
}

/// Build a complete HTTP/1.1 request with the fixed header set.
///
/// Emits the request line, then `Host`, `User-Agent`, `Accept` and
/// `Connection: close`, then the terminating blank line. Deterministic:
/// no content negotiation, no cookies, no request body.
pub fn build_request_with_agent(method: &str, url: &ParsedUrl, user_agent: &str) -> String {
    format!(
        "{method} {target} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {user_agent}\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         \r\n",
        target = url.request_target(),
        host = url.host,
    )
}

// ------------------------------------------------------------------
// Response parsing
// ------------------------------------------------------------------

/// Parsed response metadata. Offsets index into the raw response buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// Numeric status code (e.g. 200, 404). Zero when unparseable.
    pub status_code: u16,
    /// `Content-Type` header value, empty when absent.
    pub content_type: String,
    /// `Content-Length` header value. Advisory only -- never checked
    /// against the byte count actually received.
    pub content_length: usize,
    /// Offset of the first body byte in the raw buffer.
    pub body_start: usize,
}

/// A complete response: the raw byte buffer plus its parsed head.
///
/// The body is a view into the buffer, never a copy, so it is exactly the
/// bytes received after the header terminator.
#[derive(Debug)]
pub struct HttpResponse {
    head: ResponseHead,
    raw: Vec<u8>,
}

impl HttpResponse {
    pub fn status_code(&self) -> u16 {
        self.head.status_code
    }

    pub fn content_type(&self) -> &str {
        &self.head.content_type
    }

    pub fn content_length(&self) -> usize {
        self.head.content_length
    }

    /// The body bytes: everything past the header terminator.
    pub fn body(&self) -> &[u8] {
        &self.raw[self.head.body_start..]
    }

    /// Body length derived from bytes received, not from `Content-Length`.
    pub fn body_len(&self) -> usize {
        self.raw.len() - self.head.body_start
    }

    /// Body decoded as UTF-8, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(self.body()).into_owned()
    }
}

/// Parse raw response bytes into a [`ResponseHead`].
///
/// The buffer must begin with `HTTP/1.` or the response is rejected as
/// malformed. Exactly two headers are recognized, case-sensitively by
/// prefix: `Content-Type:` and `Content-Length:`. All others are skipped.
///
/// The body boundary is the FIRST `\r\n\r\n` anywhere in the buffer, not
/// where the header block logically ends. A pathological buffer containing
/// that byte sequence early mis-locates the boundary; the global scan is a
/// documented quirk of the framing, kept deliberately.
pub fn parse_response(data: &[u8]) -> Result<ResponseHead> {
    if !data.starts_with(b"HTTP/1.") {
        return Err(LanternError::MalformedResponse(
            "missing HTTP/1. prefix".to_string(),
        ));
    }

    // Status code: the digits after the first space.
    let status_code = data
        .iter()
        .position(|&b| b == b' ')
        .map(|sp| parse_digits(&data[sp + 1..]))
        .unwrap_or(0) as u16;

    let (header_end, body_start) = match find_subsequence(data, b"\r\n\r\n") {
        Some(i) => (i, i + 4),
        // No terminator: the whole buffer is headers, the body is empty.
        None => (data.len(), data.len()),
    };

    let mut content_type = String::new();
    let mut content_length = 0usize;
    for line in data[..header_end].split(|&b| b == b'\n') {
        let line = strip_cr(line);
        if let Some(rest) = line.strip_prefix(b"Content-Type:".as_slice()) {
            content_type = String::from_utf8_lossy(rest).trim().to_string();
        } else if let Some(rest) = line.strip_prefix(b"Content-Length:".as_slice()) {
            content_length = parse_digits_trimmed(rest);
        }
    }

    Ok(ResponseHead {
        status_code,
        content_type,
        content_length,
        body_start,
    })
}

// ------------------------------------------------------------------
// GET
// ------------------------------------------------------------------

/// Perform a blocking GET with the default User-Agent.
pub fn get(backend: &mut dyn NetworkBackend, url: &ParsedUrl) -> Result<HttpResponse> {
    get_with_agent(backend, url, USER_AGENT)
}

/// Perform a blocking GET for `url` over `backend`.
///
/// Resolves the host, connects, sends the request in one call, then
/// receives into a single bounded buffer until the peer closes or
/// [`MAX_RESPONSE_SIZE`] is reached. There is no read timeout: a peer that
/// neither sends nor closes hangs the caller indefinitely. That is a
/// documented property of the blocking resource model.
pub fn get_with_agent(
    backend: &mut dyn NetworkBackend,
    url: &ParsedUrl,
    user_agent: &str,
) -> Result<HttpResponse> {
    let addr = resolve(&url.host)?;
    let mut stream = backend.connect(addr, url.port)?;

    let request = build_request_with_agent("GET", url, user_agent);
    debug!("request: GET {}", url.request_target());
    stream.send(request.as_bytes())?;

    let mut raw: Vec<u8> = Vec::with_capacity(4096);
    let mut chunk = [0u8; 2048];
    loop {
        if raw.len() >= MAX_RESPONSE_SIZE {
            debug!("response buffer full at {} bytes", raw.len());
            break;
        }
        let n = stream.receive(&mut chunk)?;
        if n == 0 {
            break;
        }
        let take = n.min(MAX_RESPONSE_SIZE - raw.len());
        raw.extend_from_slice(&chunk[..take]);
    }
    let _ = stream.close();

    let head = parse_response(&raw)?;
    info!(
        "GET {}:{}{} -> {} ({} body bytes)",
        url.host,
        url.port,
        url.request_target(),
        head.status_code,
        raw.len() - head.body_start,
    );

    Ok(HttpResponse { head, raw })
}

// ------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------

/// Find the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Parse a leading run of ASCII digits; stops at the first non-digit.
fn parse_digits(bytes: &[u8]) -> usize {
    let mut value = 0usize;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as usize);
    }
    value
}

/// Like [`parse_digits`] but skips leading ASCII whitespace first.
fn parse_digits_trimmed(bytes: &[u8]) -> usize {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    parse_digits(&bytes[start..])
}

/// Drop a trailing `\r` left over from `\r\n` line splitting.
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r".as_slice()).unwrap_or(line)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

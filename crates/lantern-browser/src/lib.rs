//! Page-load pipeline.
//!
//! Ties the stages together for one page load: URL parse, address
//! resolution, blocking GET, HTML parse, render. Network and protocol
//! errors collapse into a single "page load failed" outcome drawn inline;
//! an HTTP error status is NOT a failure -- the body still renders.

pub mod config;

use log::{info, warn};

use lantern_html::parse;
use lantern_net::http;
use lantern_net::url::ParsedUrl;
use lantern_render::{render, BOTTOM_MARGIN, TOP_MARGIN};
use lantern_types::backend::{NetworkBackend, TextDisplay, SCREEN_COLS};
use lantern_types::color::{TextAttr, VgaColor};
use lantern_types::error::Result;

pub use config::{parse_config, BrowserConfig};

/// Header bar attribute: white on blue.
const HEADER_ATTR: TextAttr = TextAttr::new(VgaColor::White, VgaColor::Blue);
/// Error text attribute.
const ERROR_ATTR: TextAttr = TextAttr::new(VgaColor::LightRed, VgaColor::Black);

/// The outcome of a page load, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub url: ParsedUrl,
    /// HTTP status, or 0 when the load failed before a response arrived.
    pub status: u16,
    pub content_type: String,
    pub title: Option<String>,
    /// True when the node arena filled and the tree is partial.
    pub truncated: bool,
}

/// Drives the pipeline over a [`NetworkBackend`].
pub struct PageLoader<B: NetworkBackend> {
    backend: B,
    config: BrowserConfig,
}

impl<B: NetworkBackend> PageLoader<B> {
    pub fn new(backend: B, config: BrowserConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Load and render a page, propagating network/protocol errors.
    pub fn load(&mut self, url_str: &str, display: &mut dyn TextDisplay) -> Result<LoadedPage> {
        let url = ParsedUrl::parse(url_str);
        let response = http::get_with_agent(&mut self.backend, &url, &self.config.user_agent)?;

        display.clear();
        if self.config.show_header {
            self.draw_header(display, url_str);
        }

        let doc = parse(&response.body_text());
        if doc.truncated() {
            warn!("document truncated at arena capacity: {url_str}");
        }
        let page = render(&doc, display);

        if self.config.show_status_bar {
            let status_line = format!(
                "HTTP {}  {}{}",
                response.status_code(),
                response.content_type(),
                if doc.truncated() { "  [truncated]" } else { "" },
            );
            self.draw_status(display, &status_line);
        }

        info!(
            "loaded {url_str}: status {}, title {:?}",
            response.status_code(),
            page.title,
        );
        Ok(LoadedPage {
            url,
            status: response.status_code(),
            content_type: response.content_type().to_string(),
            title: page.title,
            truncated: doc.truncated(),
        })
    }

    /// Like [`load`](Self::load), but failures render an inline error page
    /// instead of propagating. The returned page carries status 0.
    pub fn load_or_error_page(
        &mut self,
        url_str: &str,
        display: &mut dyn TextDisplay,
    ) -> LoadedPage {
        match self.load(url_str, display) {
            Ok(page) => page,
            Err(err) => {
                warn!("page load failed for {url_str}: {err}");
                display.clear();
                if self.config.show_header {
                    self.draw_header(display, url_str);
                }
                display.set_color(ERROR_ATTR);
                display.set_cursor(0, TOP_MARGIN + 1);
                display.write("Page load failed.");
                display.set_cursor(0, TOP_MARGIN + 3);
                display.set_color(TextAttr::DEFAULT);
                display.write(&format!("{err}"));
                LoadedPage {
                    url: ParsedUrl::parse(url_str),
                    status: 0,
                    content_type: String::new(),
                    title: None,
                    truncated: false,
                }
            }
        }
    }

    fn draw_header(&self, display: &mut dyn TextDisplay, url_str: &str) {
        display.set_color(HEADER_ATTR);
        display.set_cursor(0, 0);
        display.write(&pad_row(url_str));
    }

    fn draw_status(&self, display: &mut dyn TextDisplay, line: &str) {
        display.set_color(TextAttr::DIM);
        display.set_cursor(0, BOTTOM_MARGIN);
        display.write(&pad_row(line));
    }
}

/// Pad or cut a line to exactly the display width.
fn pad_row(s: &str) -> String {
    let mut out: String = s.chars().take(SCREEN_COLS).collect();
    while out.chars().count() < SCREEN_COLS {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::net::Ipv4Addr;
    use std::rc::Rc;

    use lantern_types::backend::{NetworkStream, TextSurface};
    use lantern_types::error::LanternError;

    struct MockStream {
        incoming: Vec<u8>,
        pos: usize,
        sent: Rc<RefCell<Vec<u8>>>,
    }

    impl NetworkStream for MockStream {
        fn send(&mut self, data: &[u8]) -> lantern_types::error::Result<usize> {
            self.sent.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn receive(&mut self, buf: &mut [u8]) -> lantern_types::error::Result<usize> {
            let remaining = &self.incoming[self.pos..];
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pos += n;
            Ok(n)
        }

        fn close(&mut self) -> lantern_types::error::Result<()> {
            Ok(())
        }
    }

    struct MockBackend {
        response: Vec<u8>,
        sent: Rc<RefCell<Vec<u8>>>,
    }

    impl MockBackend {
        fn replying(response: &str) -> Self {
            Self {
                response: response.as_bytes().to_vec(),
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl NetworkBackend for MockBackend {
        fn connect(
            &mut self,
            _addr: Ipv4Addr,
            _port: u16,
        ) -> lantern_types::error::Result<Box<dyn NetworkStream>> {
            Ok(Box::new(MockStream {
                incoming: self.response.clone(),
                pos: 0,
                sent: Rc::clone(&self.sent),
            }))
        }
    }

    fn html_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body,
        )
    }

    #[test]
    fn full_pipeline_renders_page() {
        let backend = MockBackend::replying(&html_response(
            "<html><head><title>Home</title></head><body><h1>Hi</h1><p>Welcome</p></body></html>",
        ));
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();

        let page = loader
            .load("http://127.0.0.1:8080/index.html", &mut surface)
            .unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.content_type, "text/html");
        assert_eq!(page.title.as_deref(), Some("Home"));
        assert!(!page.truncated);
        assert!(surface.contains("Hi"));
        assert!(surface.contains("Welcome"));
        // Chrome rows.
        assert!(surface.row_text(0).contains("http://127.0.0.1:8080/index.html"));
        assert!(surface.row_text(BOTTOM_MARGIN).contains("HTTP 200"));
    }

    #[test]
    fn request_goes_out_with_parsed_target() {
        let backend = MockBackend::replying(&html_response("<p>x</p>"));
        let sent = Rc::clone(&backend.sent);
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();
        loader.load("http://127.0.0.1/a/b?q=1", &mut surface).unwrap();

        let sent = sent.borrow();
        let text = String::from_utf8_lossy(&sent);
        assert!(text.starts_with("GET /a/b?q=1 HTTP/1.1\r\n"));
        assert!(text.contains("Host: 127.0.0.1\r\n"));
        assert!(text.contains("User-Agent: Lantern/0.1\r\n"));
    }

    #[test]
    fn configured_user_agent_is_sent() {
        let backend = MockBackend::replying(&html_response("<p>x</p>"));
        let sent = Rc::clone(&backend.sent);
        let config = BrowserConfig {
            user_agent: "Lantern/0.2-dev".to_string(),
            ..BrowserConfig::default()
        };
        let mut loader = PageLoader::new(backend, config);
        let mut surface = TextSurface::new();
        loader.load("http://127.0.0.1/", &mut surface).unwrap();

        let sent = sent.borrow();
        let text = String::from_utf8_lossy(&sent);
        assert!(text.contains("User-Agent: Lantern/0.2-dev\r\n"));
    }

    #[test]
    fn http_error_status_still_renders_body() {
        let backend = MockBackend::replying(
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\n\r\n<p>missing page</p>",
        );
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();
        let page = loader.load("http://127.0.0.1/gone", &mut surface).unwrap();

        assert_eq!(page.status, 404);
        assert!(surface.contains("missing page"));
        assert!(surface.row_text(BOTTOM_MARGIN).contains("HTTP 404"));
    }

    #[test]
    fn dns_failure_becomes_error_page() {
        let backend = MockBackend::replying("");
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();

        let page = loader.load_or_error_page("http://no-such-host/", &mut surface);
        assert_eq!(page.status, 0);
        assert!(surface.contains("Page load failed."));
        assert!(surface.contains("DNS failure"));
    }

    #[test]
    fn load_propagates_dns_error() {
        let backend = MockBackend::replying("");
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();
        let err = loader.load("http://nope/", &mut surface).unwrap_err();
        assert!(matches!(err, LanternError::Dns(_)));
    }

    #[test]
    fn malformed_response_becomes_error_page() {
        let backend = MockBackend::replying("not http at all");
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();
        let page = loader.load_or_error_page("http://127.0.0.1/", &mut surface);
        assert_eq!(page.status, 0);
        assert!(surface.contains("malformed response"));
    }

    #[test]
    fn chrome_can_be_disabled() {
        let backend = MockBackend::replying(&html_response("<p>bare</p>"));
        let config = BrowserConfig {
            show_header: false,
            show_status_bar: false,
            ..BrowserConfig::default()
        };
        let mut loader = PageLoader::new(backend, config);
        let mut surface = TextSurface::new();
        loader.load("http://127.0.0.1/", &mut surface).unwrap();

        assert_eq!(surface.row_text(0), "");
        assert_eq!(surface.row_text(BOTTOM_MARGIN), "");
        assert!(surface.contains("bare"));
    }

    #[test]
    fn truncated_document_is_flagged_in_status() {
        let mut body = String::new();
        for i in 0..600 {
            body.push_str(&format!("<p>{i}</p>"));
        }
        let backend = MockBackend::replying(&html_response(&body));
        let mut loader = PageLoader::new(backend, BrowserConfig::default());
        let mut surface = TextSurface::new();
        let page = loader.load("http://127.0.0.1/", &mut surface).unwrap();

        assert!(page.truncated);
        assert!(surface.row_text(BOTTOM_MARGIN).contains("[truncated]"));
    }

    #[test]
    fn pad_row_is_exactly_display_width() {
        assert_eq!(pad_row("abc").len(), SCREEN_COLS);
        let long = "z".repeat(200);
        assert_eq!(pad_row(&long).chars().count(), SCREEN_COLS);
    }
}

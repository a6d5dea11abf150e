//! Lantern CLI: fetch a URL and dump the rendered 80x25 grid to stdout.
//!
//! Usage: `lantern [URL]`. With no URL the configured home page is loaded.
//! Reads `lantern.toml` from the working directory when present.

use std::env;
use std::fs;
use std::process::ExitCode;

use log::warn;

use lantern_browser::{parse_config, BrowserConfig, PageLoader};
use lantern_types::backend::{StdNetworkBackend, TextSurface};

fn main() -> ExitCode {
    env_logger::init();

    let config = load_config();
    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| config.home_url.clone());

    let mut loader = PageLoader::new(StdNetworkBackend::new(), config);
    let mut surface = TextSurface::new();
    let page = loader.load_or_error_page(&url, &mut surface);

    println!("{}", surface.to_text());

    if page.status == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_config() -> BrowserConfig {
    match fs::read_to_string("lantern.toml") {
        Ok(text) => parse_config(&text).unwrap_or_else(|e| {
            warn!("ignoring bad config: {e}");
            BrowserConfig::default()
        }),
        Err(_) => BrowserConfig::default(),
    }
}

//! Networking for the Lantern browser core.
//!
//! Three layers, leaves first: [`url`] splits an absolute URL string into
//! host/port/path/query, [`resolve`] maps a host string to an IPv4 address,
//! and [`http`] drives a blocking transport through a full request/response
//! cycle.

pub mod http;
pub mod resolve;
pub mod url;

pub use http::{HttpResponse, ResponseHead};
pub use url::ParsedUrl;

//! HTTP access to catalog items addressed by a URL template.
//!
//! A template is a URL with one `{id}` placeholder, e.g.
//! `https://archive.example/recordings/detail/id/{id}`. Site-specific URL
//! construction stays with the caller; this module only substitutes ids.

mod http;
mod template;

pub use http::{fetch, fetch_to_file, status, HttpProber};
pub use template::{ProbeError, UrlTemplate};

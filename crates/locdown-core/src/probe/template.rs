use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PLACEHOLDER: &str = "{id}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("URL template must contain exactly one {{id}} placeholder, found {0}")]
    Placeholders(usize),
    #[error("invalid URL template: {0}")]
    Url(String),
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    Scheme(String),
}

/// A URL with exactly one `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn parse(template: &str) -> Result<Self, ProbeError> {
        let placeholders = template.matches(PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(ProbeError::Placeholders(placeholders));
        }
        let sample = url::Url::parse(&template.replace(PLACEHOLDER, "1"))
            .map_err(|e| ProbeError::Url(e.to_string()))?;
        match sample.scheme() {
            "http" | "https" => Ok(Self(template.to_string())),
            other => Err(ProbeError::Scheme(other.to_string())),
        }
    }

    pub fn expand(&self, id: u64) -> String {
        self.0.replace(PLACEHOLDER, &id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UrlTemplate {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_placeholder() {
        let t = UrlTemplate::parse("https://archive.example/recordings/detail/id/{id}").unwrap();
        assert_eq!(
            t.expand(8134),
            "https://archive.example/recordings/detail/id/8134"
        );
        let q: UrlTemplate = "http://h.example/item?id={id}&fmt=mp3".parse().unwrap();
        assert_eq!(q.expand(2), "http://h.example/item?id=2&fmt=mp3");
    }

    #[test]
    fn placeholder_count_enforced() {
        assert_eq!(
            UrlTemplate::parse("https://h.example/item"),
            Err(ProbeError::Placeholders(0))
        );
        assert_eq!(
            UrlTemplate::parse("https://h.example/{id}/{id}"),
            Err(ProbeError::Placeholders(2))
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            UrlTemplate::parse("not a url {id}"),
            Err(ProbeError::Url(_))
        ));
        assert_eq!(
            UrlTemplate::parse("ftp://h.example/{id}"),
            Err(ProbeError::Scheme("ftp".into()))
        );
    }
}

//! Request URL and header construction.

use crate::client::HttpError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Common HTTP headers.
pub mod headers {
    pub const X_API_KEY: &str = "x-api-key";
}

/// Builds URLs below a fixed base plus a set of default headers.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_url: Url,
}

impl RequestBuilder {
    /// Create a builder rooted at `base_url`.
    ///
    /// The base must be an absolute `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let base_url =
            Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            headers: HeaderMap::new(),
            base_url,
        })
    }

    /// Add a header. Invalid names or values are skipped.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add API key header.
    pub fn api_key(self, key: impl AsRef<str>) -> Self {
        self.header(headers::X_API_KEY, key)
    }

    /// Get the default headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_appends_segments() {
        let builder = RequestBuilder::new("https://authz.internal/api").unwrap();
        assert_eq!(
            builder.url(&["users", "42", "permissions"]).as_str(),
            "https://authz.internal/api/users/42/permissions"
        );
    }

    #[test]
    fn test_url_trailing_slash() {
        let builder = RequestBuilder::new("https://authz.internal/api/").unwrap();
        assert_eq!(builder.url(&["roles"]).as_str(), "https://authz.internal/api/roles");
    }

    #[test]
    fn test_url_encodes_segments() {
        let builder = RequestBuilder::new("http://localhost:9000").unwrap();
        let url = builder.url(&["permissions", "reports/export all"]);
        assert_eq!(url.path(), "/permissions/reports%2Fexport%20all");

        let url = builder.url(&["permissions", "read:x"]);
        assert_eq!(url.path(), "/permissions/read:x");
    }

    #[test]
    fn test_rejects_bad_base() {
        assert!(matches!(RequestBuilder::new("not a url"), Err(HttpError::InvalidUrl(_))));
        assert!(matches!(RequestBuilder::new("ftp://host/"), Err(HttpError::InvalidUrl(_))));
        assert!(matches!(RequestBuilder::new("mailto:a@b.c"), Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn test_headers() {
        let builder = RequestBuilder::new("http://localhost")
            .unwrap()
            .api_key("key123")
            .header("x-user-email", "a@example.com")
            .header("Bad Header", "skipped");

        assert_eq!(builder.headers().get(headers::X_API_KEY).unwrap(), "key123");
        assert_eq!(builder.headers().get("x-user-email").unwrap(), "a@example.com");
        assert_eq!(builder.headers().len(), 2);
    }
}

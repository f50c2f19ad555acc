//! HTTP transport for the web-service API.

use tracing::debug;

use crate::core::{Error, Result};

use super::query::WsQuery;

/// Basic credentials sent with every request. An empty username disables
/// authentication.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials from a username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Anonymous access.
    pub fn anonymous() -> Self {
        Self::default()
    }

    fn is_set(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Issues GET requests and returns raw JSON bodies.
///
/// HTTP 404 maps to `Ok(None)`; any other non-2xx status is a transport
/// error that propagates as a hard failure.
pub trait Connector {
    /// Execute a query, returning the response body or `None` on 404.
    fn execute(&self, query: &dyn WsQuery) -> Result<Option<String>>;
}

/// Blocking HTTP connector on top of reqwest.
pub struct HttpConnector {
    base_url: String,
    credentials: Credentials,
    client: reqwest::blocking::Client,
}

impl HttpConnector {
    /// Create a connector for the given server base URL.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// The server base URL this connector talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Connector for HttpConnector {
    fn execute(&self, query: &dyn WsQuery) -> Result<Option<String>> {
        let url = format!("{}{}", self.base_url, query.base_path());
        debug!(%url, "executing query");

        let mut request = self
            .client
            .get(&url)
            .query(&query.params())
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(query.timeout());
        if let Some(locale) = query.locale() {
            request = request.header(reqwest::header::ACCEPT_LANGUAGE, locale);
        }
        if self.credentials.is_set() {
            request = request.basic_auth(
                &self.credentials.username,
                Some(&self.credentials.password),
            );
        }

        let response = request
            .send()
            .map_err(|e| Error::connection(format!("query {url} failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| status.to_string());
            return Err(Error::Transport {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .map_err(|e| Error::connection(format!("can not read response: {e}")))?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_is_set() {
        assert!(!Credentials::anonymous().is_set());
        assert!(Credentials::new("admin", "admin").is_set());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let connector = HttpConnector::new("http://localhost:9000/", Credentials::anonymous());
        assert_eq!(connector.base_url(), "http://localhost:9000");
    }
}

//! Thin deserializing client over a [`Connector`].

use serde::de::DeserializeOwned;

use crate::core::Result;

use super::connector::{Connector, Credentials, HttpConnector};
use super::query::WsQuery;

/// Client for the web-service API: executes queries and maps JSON onto wire
/// models.
pub struct WsClient {
    connector: Box<dyn Connector>,
}

impl WsClient {
    /// Wrap an existing connector (used by tests with a canned fake).
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Connect to a server over HTTP with basic credentials.
    pub fn connect(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self::new(Box::new(HttpConnector::new(base_url, credentials)))
    }

    /// Execute a query whose response is a single JSON object.
    ///
    /// `Ok(None)` means the server answered 404.
    pub fn find<T: DeserializeOwned>(&self, query: &dyn WsQuery) -> Result<Option<T>> {
        match self.connector.execute(query)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Execute a query whose response is a JSON array.
    ///
    /// A 404 maps to an empty list.
    pub fn find_all<T: DeserializeOwned>(&self, query: &dyn WsQuery) -> Result<Vec<T>> {
        match self.connector.execute(query)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::model::Resource;
    use crate::ws::query::ResourceQuery;

    struct StaticConnector(Option<String>);

    impl Connector for StaticConnector {
        fn execute(&self, _query: &dyn WsQuery) -> Result<Option<String>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_find_all_parses_array() {
        let body = r#"[{"key": "com.acme:app", "scope": "PRJ"}]"#.to_string();
        let client = WsClient::new(Box::new(StaticConnector(Some(body))));
        let resources: Vec<Resource> = client
            .find_all(&ResourceQuery::by_key("com.acme:app"))
            .unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].scope.as_deref(), Some("PRJ"));
    }

    #[test]
    fn test_find_all_maps_404_to_empty() {
        let client = WsClient::new(Box::new(StaticConnector(None)));
        let resources: Vec<Resource> = client
            .find_all(&ResourceQuery::by_key("missing"))
            .unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn test_find_maps_404_to_none() {
        let client = WsClient::new(Box::new(StaticConnector(None)));
        let resource: Option<Resource> = client
            .find(&ResourceQuery::by_key("missing"))
            .unwrap();
        assert!(resource.is_none());
    }

    #[test]
    fn test_find_rejects_malformed_json() {
        let client = WsClient::new(Box::new(StaticConnector(Some("{not json".to_string()))));
        let result: Result<Option<Resource>> = client.find(&ResourceQuery::by_key("x"));
        assert!(result.is_err());
    }
}

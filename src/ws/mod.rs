//! Web-service API client: typed queries, wire models, and the HTTP
//! connector abstraction.

mod client;
mod connector;
pub mod model;
pub mod query;

pub use client::WsClient;
pub use connector::{Connector, Credentials, HttpConnector};

//! sonar-report - Quality reports from a SonarQube-compatible server.
//!
//! Queries the server's web-service API for a project's metrics, issues,
//! and rule violations, aggregates them into an in-memory [`model::Project`]
//! tree, and renders that tree into an executive or team-workbook report.
//!
//! # Example
//!
//! ```no_run
//! use sonar_report::config::Config;
//! use sonar_report::report;
//! use sonar_report::ws::{Credentials, WsClient};
//!
//! let config = Config::default();
//! let client = WsClient::connect("http://localhost:9000", Credentials::anonymous());
//! let bytes = report::generate(&client, &config, "com.acme:app").unwrap();
//! std::fs::write("report.html", bytes).unwrap();
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod core;
pub mod model;
pub mod report;
pub mod ws;

pub use crate::core::{Error, Outcome, Result};

//! Configuration loading and management.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::report::ReportKind;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server connection settings.
    pub server: ServerConfig,
    /// Report shape settings.
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config`
    /// flags. Env vars with `SONAR_REPORT_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed("SONAR_REPORT_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from a directory, looking for sonar-report.toml.
    ///
    /// A missing file is silently skipped (defaults are used). Env vars with
    /// `SONAR_REPORT_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("sonar-report.toml")))
            .merge(Env::prefixed("SONAR_REPORT_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the analysis server.
    pub url: String,
    /// Username for basic authentication; empty disables authentication.
    pub username: String,
    /// Password for basic authentication.
    pub password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Report shape settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report flavor to render.
    pub kind: ReportKind,
    /// Maximum rows per file-ranking table.
    pub table_limit: u32,
    /// Discovery budget for the rule ranking.
    pub details_limit: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            kind: ReportKind::Workbook,
            table_limit: 5,
            details_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:9000");
        assert_eq!(config.report.kind, ReportKind::Workbook);
        assert_eq!(config.report.table_limit, 5);
        assert_eq!(config.report.details_limit, 10);
    }

    #[test]
    fn test_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "sonar-report.toml",
                "[server]\nurl = \"https://sonar.acme.dev\"\n[report]\ntable_limit = 8",
            )?;
            let config = Config::from_file("sonar-report.toml").unwrap();
            assert_eq!(config.server.url, "https://sonar.acme.dev");
            assert_eq!(config.report.table_limit, 8);
            assert_eq!(config.report.details_limit, 10);
            Ok(())
        });
    }

    #[test]
    fn test_config_missing_file_errors() {
        assert!(Config::from_file("does-not-exist.toml").is_err());
    }

    #[test]
    fn test_load_default_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.report.table_limit, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("sonar-report.toml", "[report]\ndetails_limit = 3")?;
            jail.set_env("SONAR_REPORT_REPORT__DETAILS_LIMIT", "25");
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.report.details_limit, 25);
            Ok(())
        });
    }

    #[test]
    fn test_report_kind_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("sonar-report.toml", "[report]\nkind = \"executive\"")?;
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.report.kind, ReportKind::Executive);
            Ok(())
        });
    }
}

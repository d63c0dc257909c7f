// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration for [`initialize`](crate::initialize) and [`Facade::from_config`](crate::Facade::from_config).

use std::borrow::Cow;

use serde::Deserialize;

use crate::Error;
use crate::ErrorKind;

/// The configuration of a facade.
///
/// # Examples
///
/// ```
/// use logwarden::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{"level": "debug", "development": true, "reporting": {"dsn": "https://key@sentry.example.com/42"}}"#,
/// )
/// .unwrap();
/// assert_eq!(config.level, "debug");
/// assert_eq!(config.reporting.unwrap().sample_rate, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The verbosity string, parsed with [`parse_level`](crate::parse_level).
    pub level: String,
    /// Human-readable colored output instead of JSON lines.
    pub development: bool,
    /// Sentry settings; reporting stays disabled when absent.
    pub reporting: Option<ReportingConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            development: false,
            reporting: None,
        }
    }
}

impl Config {
    /// Read the configuration from environment variables.
    ///
    /// * `LOG_LEVEL`: the verbosity string, `info` if unset.
    /// * `LOG_DEVELOPMENT`: `1`, `true` or `yes` (any case) selects development mode.
    /// * `SENTRY_DSN`: enables reporting when set and not empty.
    /// * `SENTRY_ENVIRONMENT`, `SENTRY_RELEASE`: optional reporting metadata.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(level) = lookup("LOG_LEVEL") {
            config.level = level;
        }
        if let Some(development) = lookup("LOG_DEVELOPMENT") {
            config.development = matches!(
                development.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        config.reporting = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.trim().is_empty())
            .map(|dsn| ReportingConfig {
                environment: lookup("SENTRY_ENVIRONMENT"),
                release: lookup("SENTRY_RELEASE"),
                ..ReportingConfig::new(dsn)
            });
        config
    }
}

/// Settings of the Sentry client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportingConfig {
    pub dsn: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    /// The fraction of events sent, between 0.0 and 1.0.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f32,
    /// The breadcrumbs each hub retains.
    #[serde(default = "default_max_breadcrumbs")]
    pub max_breadcrumbs: usize,
    /// Turn on the Sentry SDK's own debug output.
    #[serde(default)]
    pub debug: bool,
}

fn default_sample_rate() -> f32 {
    1.0
}

fn default_max_breadcrumbs() -> usize {
    100
}

impl ReportingConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            environment: None,
            release: None,
            sample_rate: default_sample_rate(),
            max_breadcrumbs: default_max_breadcrumbs(),
            debug: false,
        }
    }

    /// Validate this configuration and convert it to Sentry client options.
    pub fn client_options(&self) -> Result<sentry::ClientOptions, Error> {
        let dsn = self.dsn.parse::<sentry::types::Dsn>().map_err(|err| {
            Error::new(ErrorKind::InvalidConfig, "invalid sentry dsn").with_source(err)
        })?;

        if !(0.0..=1.0).contains(&self.sample_rate) {
            return Err(
                Error::new(ErrorKind::InvalidConfig, "sample rate out of range")
                    .with_context("sample_rate", self.sample_rate),
            );
        }

        Ok(sentry::ClientOptions {
            dsn: Some(dsn),
            environment: self.environment.clone().map(Cow::Owned),
            release: self.release.clone().map(Cow::Owned),
            sample_rate: self.sample_rate,
            max_breadcrumbs: self.max_breadcrumbs,
            debug: self.debug,
            ..Default::default()
        })
    }

    /// Initialize the Sentry client. Keep the guard alive to keep reporting.
    ///
    /// The client is bound to the process-wide hub even when this runs off the main thread.
    pub(crate) fn init(&self) -> Result<sentry::ClientInitGuard, Error> {
        let options = self.client_options()?;
        let guard = sentry::init(options);
        sentry::Hub::main().bind_client(sentry::Hub::current().client());
        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let config: Config =
            serde_json::from_str(r#"{"reporting": {"dsn": "https://key@o1.ingest.example.com/7"}}"#)
                .unwrap();
        let reporting = config.reporting.unwrap();
        assert_eq!(reporting.max_breadcrumbs, 100);
        assert_eq!(reporting.sample_rate, 1.0);
        assert!(!reporting.debug);
    }

    #[test]
    fn test_from_lookup() {
        let env = HashMap::from([
            ("LOG_LEVEL", "WARN"),
            ("LOG_DEVELOPMENT", "True"),
            ("SENTRY_DSN", "https://key@sentry.example.com/42"),
            ("SENTRY_RELEASE", "app@1.2.3"),
        ]);
        let config = Config::from_lookup(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.level, "WARN");
        assert!(config.development);
        let reporting = config.reporting.unwrap();
        assert_eq!(reporting.dsn, "https://key@sentry.example.com/42");
        assert_eq!(reporting.release.as_deref(), Some("app@1.2.3"));
        assert_eq!(reporting.environment, None);
    }

    #[test]
    fn test_from_lookup_empty_dsn_disables_reporting() {
        let config = Config::from_lookup(|name| (name == "SENTRY_DSN").then(String::new));
        assert_eq!(config.reporting, None);
        assert_eq!(config.level, "info");
        assert!(!config.development);
    }

    #[test]
    fn test_client_options() {
        let mut reporting = ReportingConfig::new("https://key@sentry.example.com/42");
        reporting.environment = Some("staging".to_string());
        reporting.max_breadcrumbs = 20;

        let options = reporting.client_options().unwrap();
        assert!(options.dsn.is_some());
        assert_eq!(options.environment.as_deref(), Some("staging"));
        assert_eq!(options.max_breadcrumbs, 20);
    }

    #[test]
    fn test_invalid_reporting_config() {
        let err = ReportingConfig::new("not a dsn").client_options().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let mut reporting = ReportingConfig::new("https://key@sentry.example.com/42");
        reporting.sample_rate = 1.5;
        let err = reporting.client_options().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(err.message(), "sample rate out of range");
    }
}

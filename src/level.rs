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

//! Severities of facade calls and the verbosity threshold.

use std::fmt;

use log::LevelFilter;

/// The severity of a facade call.
///
/// `Panic` and `Fatal` sit above `Error`: they are written to the sink as errors, but are
/// reported as fatal and end the current thread or process afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Severity {
    /// The name of the severity in upper case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Panic => "PANIC",
            Severity::Fatal => "FATAL",
        }
    }

    /// The level a sink record of this severity is written at.
    pub fn log_level(&self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error | Severity::Panic | Severity::Fatal => log::Level::Error,
        }
    }

    /// The level breadcrumbs and events of this severity are reported at.
    pub fn sentry_level(&self) -> sentry::Level {
        match self {
            Severity::Debug => sentry::Level::Debug,
            Severity::Info => sentry::Level::Info,
            Severity::Warn => sentry::Level::Warning,
            Severity::Error => sentry::Level::Error,
            Severity::Panic | Severity::Fatal => sentry::Level::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warn,
            log::Level::Error => Severity::Error,
        }
    }
}

/// Parse a verbosity string into the sink threshold.
///
/// Matching is case-insensitive. `TRACE` and `DEBUG` enable debug output, `INFO` and `WARN`
/// map to their levels, and anything else, including an empty or unknown string, falls back
/// to `Error`.
///
/// # Examples
///
/// ```
/// use log::LevelFilter;
/// use logwarden::parse_level;
///
/// assert_eq!(parse_level("trace"), LevelFilter::Debug);
/// assert_eq!(parse_level("bogus"), LevelFilter::Error);
/// ```
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" | "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" => LevelFilter::Warn,
        _ => LevelFilter::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        for level in ["debug", "DEBUG", "Debug", "TRACE", "trace"] {
            assert_eq!(parse_level(level), LevelFilter::Debug, "{level}");
        }
        assert_eq!(parse_level("info"), LevelFilter::Info);
        assert_eq!(parse_level("INFO"), LevelFilter::Info);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("bogus"), LevelFilter::Error);
        assert_eq!(parse_level(""), LevelFilter::Error);
        // only the short form is recognized
        assert_eq!(parse_level("warning"), LevelFilter::Error);
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::Panic.log_level(), log::Level::Error);
        assert_eq!(Severity::Fatal.log_level(), log::Level::Error);
        assert_eq!(Severity::Warn.sentry_level(), sentry::Level::Warning);
        assert_eq!(Severity::Panic.sentry_level(), sentry::Level::Fatal);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
        assert!(Severity::Fatal > Severity::Error);
    }
}

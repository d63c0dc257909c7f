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

use std::fmt;
use std::time::Duration;

use log::LevelFilter;

use crate::Facade;
use crate::append::Append;
use crate::parse_level;
use crate::report::Report;
use crate::report::SentryReport;
use crate::sink::Sink;

const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Create a new empty [`FacadeBuilder`].
///
/// # Examples
///
/// ```rust
/// use log::LevelFilter;
/// use logwarden::append;
///
/// let facade = logwarden::builder()
///     // .build()  CANNOT COMPILE: a facade without Append
///     .max_level(LevelFilter::Info)
///     .append(append::Stderr::default())
///     .build();
///
/// facade.info("ready", &[]);
/// ```
pub fn builder() -> FacadeBuilder<false> {
    FacadeBuilder::default()
}

/// A builder for configuring a [`Facade`].
///
/// * `READY=false`: The initialized state. No appender is configured yet.
/// * `READY=true`: At least one appender is configured and the facade can be
///   [built][FacadeBuilder::build].
///
/// Without an explicit [report][FacadeBuilder::report], the facade reports to Sentry through
/// [`SentryReport`], which does nothing until a Sentry client is initialized.
#[must_use = "call `build` to construct the facade"]
pub struct FacadeBuilder<const READY: bool = true> {
    max_level: LevelFilter,
    appends: Vec<Box<dyn Append>>,
    report: Option<Box<dyn Report>>,
    exit: fn(i32) -> !,
    flush_timeout: Duration,
    guard: Option<sentry::ClientInitGuard>,
}

impl<const READY: bool> fmt::Debug for FacadeBuilder<READY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacadeBuilder")
            .field("max_level", &self.max_level)
            .field("appends", &self.appends)
            .field("report", &self.report)
            .field("flush_timeout", &self.flush_timeout)
            .field("sentry", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for FacadeBuilder<false> {
    fn default() -> Self {
        Self::new()
    }
}

impl FacadeBuilder<false> {
    /// Create a new empty [`FacadeBuilder`].
    pub fn new() -> Self {
        Self {
            max_level: LevelFilter::Error,
            appends: vec![],
            report: None,
            exit: std::process::exit,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            guard: None,
        }
    }
}

impl<const READY: bool> FacadeBuilder<READY> {
    /// Add an [`Append`] to the sink.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> FacadeBuilder<true> {
        self.appends.push(append.into());

        FacadeBuilder {
            max_level: self.max_level,
            appends: self.appends,
            report: self.report,
            exit: self.exit,
            flush_timeout: self.flush_timeout,
            guard: self.guard,
        }
    }

    /// Set the minimum level written to the sink. Defaults to `Error`.
    pub fn max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the minimum level from a verbosity string. See [`parse_level`].
    pub fn level(self, level: &str) -> Self {
        self.max_level(parse_level(level))
    }

    /// Set the reporting backend.
    pub fn report(mut self, report: impl Into<Box<dyn Report>>) -> Self {
        self.report = Some(report.into());
        self
    }

    /// Set how [`Facade::fatal`] terminates once everything is flushed. Defaults to
    /// [`std::process::exit`].
    pub fn exit_with(mut self, exit: fn(i32) -> !) -> Self {
        self.exit = exit;
        self
    }

    /// Set how long fatal calls and [`Facade::flush`] wait for the reporting backend.
    pub fn flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    /// Keep the Sentry client alive for as long as the facade.
    pub(crate) fn sentry_guard(mut self, guard: sentry::ClientInitGuard) -> Self {
        self.guard = Some(guard);
        self
    }
}

impl FacadeBuilder<true> {
    /// Build the facade.
    pub fn build(self) -> Facade {
        Facade {
            sink: Sink::new(self.max_level, self.appends),
            report: self
                .report
                .unwrap_or_else(|| Box::new(SentryReport::default())),
            exit: self.exit,
            flush_timeout: self.flush_timeout,
            _guard: self.guard,
        }
    }
}

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

//! The dual-sink logging facade.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use crate::Config;
use crate::Context;
use crate::Error;
use crate::Field;
use crate::Severity;
use crate::append::Stderr;
use crate::field::fields_to_payload;
use crate::layout::JsonLayout;
use crate::layout::Layout;
use crate::layout::TextLayout;
use crate::report::Breadcrumb;
use crate::report::Event;
use crate::report::Hub;
use crate::report::Report;
use crate::sink::Callsite;
use crate::sink::Sink;
use crate::sink::write_record;

pub use self::builder::FacadeBuilder;
pub use self::builder::builder;

mod builder;

/// A leveled logger paired with a reporting backend.
///
/// Every call writes a line to the sink. Info and warn calls then leave a breadcrumb on the
/// resolved hub; error calls also send an event. Panic and fatal calls report first, then
/// write and flush the sink, then unwind or terminate. Debug calls only touch the sink.
///
/// Calls without a [`Context`] use the backend's implicit hub. The `*_with_context` variants
/// use the hub cached on the context, creating it on first use.
///
/// Breadcrumbs are recorded even when the line itself is below the sink's minimum level.
///
/// The file and line written to the sink are those of the code calling the facade.
///
/// # Examples
///
/// ```
/// use logwarden::Field;
/// use logwarden::append;
///
/// let facade = logwarden::builder()
///     .level("info")
///     .append(append::Stderr::default())
///     .build();
///
/// facade.info("server started", &[Field::u64("port", 8080)]);
/// facade.error("upstream unavailable", &[Field::str("upstream", "billing")]);
/// ```
pub struct Facade {
    sink: Sink,
    report: Box<dyn Report>,
    exit: fn(i32) -> !,
    flush_timeout: Duration,
    _guard: Option<sentry::ClientInitGuard>,
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("sink", &self.sink)
            .field("report", &self.report)
            .field("flush_timeout", &self.flush_timeout)
            .finish_non_exhaustive()
    }
}

/// Which hub a call reports to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'a> {
    Current,
    Context(&'a Context),
}

impl Scope<'_> {
    fn resolve(&self, report: &dyn Report) -> Arc<dyn Hub> {
        match self {
            Scope::Current => report.current_hub(),
            Scope::Context(ctx) => ctx.resolve_hub(report),
        }
    }
}

impl Facade {
    /// Create a new empty [`FacadeBuilder`].
    pub fn builder() -> FacadeBuilder<false> {
        builder()
    }

    /// Build a facade from a [`Config`].
    ///
    /// The sink writes to stderr: colored text in development mode, JSON lines otherwise.
    /// If reporting is configured, the Sentry client is initialized here.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidConfig`](crate::ErrorKind::InvalidConfig) error if the
    /// reporting configuration is invalid.
    pub fn from_config(config: &Config) -> Result<Facade, Error> {
        let layout: Box<dyn Layout> = if config.development {
            Box::new(TextLayout::default())
        } else {
            Box::new(JsonLayout::default())
        };

        let mut builder = builder()
            .level(&config.level)
            .append(Stderr::default().with_layout(layout));
        if let Some(reporting) = &config.reporting {
            builder = builder.sentry_guard(reporting.init()?);
        }
        Ok(builder.build())
    }

    /// The leveled logger this facade writes to.
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// The reporting backend this facade reports to.
    pub fn report(&self) -> &dyn Report {
        self.report.as_ref()
    }

    /// Attach a hub to `ctx` now, instead of on its first reporting call.
    pub fn attach_hub(&self, ctx: &Context) -> Arc<dyn Hub> {
        ctx.resolve_hub(self.report.as_ref())
    }

    /// Create a new execution context with its own hub already attached.
    pub fn new_context(&self) -> Context {
        Context::with_hub(self.report.new_hub())
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.call(Scope::Current, Severity::Debug, msg, fields);
    }

    #[track_caller]
    pub fn debug_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) {
        self.call(Scope::Context(ctx), Severity::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.call(Scope::Current, Severity::Info, msg, fields);
    }

    #[track_caller]
    pub fn info_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) {
        self.call(Scope::Context(ctx), Severity::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.call(Scope::Current, Severity::Warn, msg, fields);
    }

    #[track_caller]
    pub fn warn_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) {
        self.call(Scope::Context(ctx), Severity::Warn, msg, fields);
    }

    /// Log an error and send it to the reporting backend as an event.
    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.call(Scope::Current, Severity::Error, msg, fields);
    }

    /// Log an error and send it as an event from the context's hub.
    #[track_caller]
    pub fn error_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) {
        self.call(Scope::Context(ctx), Severity::Error, msg, fields);
    }

    /// Report, log, flush both sinks and then panic with `msg`.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.call(Scope::Current, Severity::Panic, msg, fields);
        self.terminate(Severity::Panic, msg)
    }

    #[track_caller]
    pub fn panic_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) -> ! {
        self.call(Scope::Context(ctx), Severity::Panic, msg, fields);
        self.terminate(Severity::Panic, msg)
    }

    /// Report, log, flush both sinks and then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.call(Scope::Current, Severity::Fatal, msg, fields);
        self.terminate(Severity::Fatal, msg)
    }

    #[track_caller]
    pub fn fatal_with_context(&self, ctx: &Context, msg: &str, fields: &[Field]) -> ! {
        self.call(Scope::Context(ctx), Severity::Fatal, msg, fields);
        self.terminate(Severity::Fatal, msg)
    }

    /// Flush the sink and wait for the reporting backend to send pending events.
    pub fn flush(&self) {
        log::Log::flush(&self.sink);
        self.report.flush(self.flush_timeout);
    }

    #[track_caller]
    fn call(&self, scope: Scope<'_>, severity: Severity, msg: &str, fields: &[Field]) {
        let callsite = Callsite::from(Location::caller());
        self.emit(&self.sink, scope, severity, callsite, msg, fields);
    }

    /// Perform the side effects of one call, in order, without terminating.
    pub(crate) fn emit(
        &self,
        logger: &dyn log::Log,
        scope: Scope<'_>,
        severity: Severity,
        callsite: Callsite<'_>,
        msg: &str,
        fields: &[Field],
    ) {
        match severity {
            Severity::Debug => {
                write_record(logger, severity, callsite, msg, fields);
            }
            Severity::Info | Severity::Warn => {
                write_record(logger, severity, callsite, msg, fields);
                let hub = scope.resolve(self.report.as_ref());
                hub.add_breadcrumb(Breadcrumb::new(severity, msg, fields_to_payload(fields)));
            }
            Severity::Error => {
                write_record(logger, severity, callsite, msg, fields);
                let hub = scope.resolve(self.report.as_ref());
                let payload = fields_to_payload(fields);
                hub.add_breadcrumb(Breadcrumb::new(severity, msg, payload.clone()));
                hub.capture_event(Event::new(severity, msg, payload));
            }
            Severity::Panic | Severity::Fatal => {
                // the caller is about to unwind or exit
                let hub = scope.resolve(self.report.as_ref());
                let payload = fields_to_payload(fields);
                hub.add_breadcrumb(Breadcrumb::new(severity, msg, payload.clone()));
                hub.capture_event(Event::new(severity, msg, payload));
                write_record(logger, severity, callsite, msg, fields);
                logger.flush();
            }
        }
    }

    #[track_caller]
    pub(crate) fn terminate(&self, severity: Severity, msg: &str) -> ! {
        self.report.flush(self.flush_timeout);
        if severity == Severity::Fatal {
            (self.exit)(1)
        }
        panic!("{msg}")
    }
}

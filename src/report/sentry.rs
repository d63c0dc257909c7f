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
use std::sync::Arc;
use std::time::Duration;

use sentry::protocol;

use crate::report::Breadcrumb;
use crate::report::Event;
use crate::report::Hub;
use crate::report::Report;

/// A reporting backend that forwards to the [`sentry`] SDK.
///
/// The implicit hub is the process-wide [`sentry::Hub::main`], shared by every thread, so
/// breadcrumbs left on one thread are attached to events captured on another. Hubs for
/// execution contexts are forked from it and share its client and options. Without an
/// initialized Sentry client every call is a no-op.
#[derive(Default, Clone)]
pub struct SentryReport {
    hub: Option<Arc<sentry::Hub>>,
}

impl SentryReport {
    /// Report through `hub` instead of [`sentry::Hub::main`].
    pub fn with_hub(hub: Arc<sentry::Hub>) -> Self {
        Self { hub: Some(hub) }
    }

    fn process_hub(&self) -> Arc<sentry::Hub> {
        match &self.hub {
            Some(hub) => hub.clone(),
            None => sentry::Hub::main(),
        }
    }
}

impl fmt::Debug for SentryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryReport")
            .field("main_hub", &self.hub.is_none())
            .finish()
    }
}

impl Report for SentryReport {
    fn current_hub(&self) -> Arc<dyn Hub> {
        Arc::new(SentryHub::new(self.process_hub()))
    }

    fn new_hub(&self) -> Arc<dyn Hub> {
        let hub = sentry::Hub::new_from_top(self.process_hub());
        Arc::new(SentryHub::new(Arc::new(hub)))
    }

    fn flush(&self, timeout: Duration) {
        if let Some(client) = self.process_hub().client() {
            client.flush(Some(timeout));
        }
    }
}

/// A [`Hub`] backed by a [`sentry::Hub`].
pub struct SentryHub {
    hub: Arc<sentry::Hub>,
}

impl SentryHub {
    pub fn new(hub: Arc<sentry::Hub>) -> Self {
        Self { hub }
    }

    /// The underlying Sentry hub.
    pub fn inner(&self) -> &Arc<sentry::Hub> {
        &self.hub
    }
}

impl fmt::Debug for SentryHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryHub")
            .field("has_client", &self.hub.client().is_some())
            .finish()
    }
}

impl Hub for SentryHub {
    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        self.hub.add_breadcrumb(protocol::Breadcrumb {
            timestamp: breadcrumb.timestamp,
            level: breadcrumb.severity.sentry_level(),
            message: Some(breadcrumb.message),
            data: breadcrumb.data,
            ..Default::default()
        });
    }

    fn capture_event(&self, event: Event) {
        self.hub.capture_event(protocol::Event {
            logger: Some(env!("CARGO_PKG_NAME").to_string()),
            level: event.severity.sentry_level(),
            message: Some(event.message),
            extra: event.data,
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use sentry::test::TestTransport;
    use serde_json::json;

    use super::*;
    use crate::Payload;
    use crate::Severity;

    fn test_report() -> (SentryReport, Arc<TestTransport>) {
        let transport = TestTransport::new();
        let options = sentry::ClientOptions {
            dsn: Some("https://public@sentry.example.com/1".parse().unwrap()),
            transport: Some(Arc::new(transport.clone())),
            ..Default::default()
        };
        let hub = sentry::Hub::new(
            Some(Arc::new(options.into())),
            Arc::new(Default::default()),
        );
        (SentryReport::with_hub(Arc::new(hub)), transport)
    }

    #[test]
    fn test_event_carries_breadcrumbs() {
        let (report, transport) = test_report();
        let hub = report.current_hub();

        let mut data = Payload::new();
        data.insert("attempt".to_string(), json!(2));
        hub.add_breadcrumb(Breadcrumb::new(Severity::Warn, "retrying", data));
        hub.capture_event(Event::new(Severity::Error, "gave up", Payload::new()));

        let events = transport.fetch_and_clear_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.message.as_deref(), Some("gave up"));
        assert_eq!(event.level, sentry::Level::Error);
        assert_eq!(event.logger.as_deref(), Some("logwarden"));

        let breadcrumbs = &event.breadcrumbs.values;
        assert_eq!(breadcrumbs.len(), 1);
        assert_eq!(breadcrumbs[0].message.as_deref(), Some("retrying"));
        assert_eq!(breadcrumbs[0].level, sentry::Level::Warning);
        assert_eq!(breadcrumbs[0].data["attempt"], json!(2));
    }

    #[test]
    fn test_implicit_hub_is_shared_across_threads() {
        let (report, transport) = test_report();

        std::thread::scope(|s| {
            s.spawn(|| {
                report
                    .current_hub()
                    .add_breadcrumb(Breadcrumb::new(Severity::Info, "worker", Payload::new()));
            });
        });
        report
            .current_hub()
            .capture_event(Event::new(Severity::Error, "main", Payload::new()));

        let events = transport.fetch_and_clear_events();
        assert_eq!(events.len(), 1);
        let messages = events[0]
            .breadcrumbs
            .values
            .iter()
            .filter_map(|b| b.message.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["worker"]);
    }

    #[test]
    fn test_forked_hub_keeps_its_own_trail() {
        let (report, transport) = test_report();
        let forked = report.new_hub();

        report
            .current_hub()
            .add_breadcrumb(Breadcrumb::new(Severity::Info, "ambient", Payload::new()));
        forked.add_breadcrumb(Breadcrumb::new(Severity::Info, "scoped", Payload::new()));
        forked.capture_event(Event::new(Severity::Error, "scoped failure", Payload::new()));

        let events = transport.fetch_and_clear_events();
        assert_eq!(events.len(), 1);
        let messages = events[0]
            .breadcrumbs
            .values
            .iter()
            .filter_map(|b| b.message.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["scoped"]);
    }

    #[test]
    fn test_default_report_uses_main_hub() {
        let report = SentryReport::default();
        assert!(Arc::ptr_eq(&report.process_hub(), &sentry::Hub::main()));
    }
}

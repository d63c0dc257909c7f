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

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::report::Breadcrumb;
use crate::report::Event;
use crate::report::Hub;
use crate::report::Report;

const DEFAULT_MAX_BREADCRUMBS: usize = 100;

/// A reporting backend that keeps everything in memory.
///
/// Cloning a `MemoryReport` yields another handle to the same hubs, so a test can hand one
/// clone to the facade and inspect the other.
///
/// # Examples
///
/// ```
/// use logwarden::Facade;
/// use logwarden::append;
/// use logwarden::report::MemoryReport;
///
/// let report = MemoryReport::default();
/// let facade = Facade::builder()
///     .append(append::Testing::default())
///     .report(report.clone())
///     .build();
///
/// facade.info("cache warmed", &[]);
/// assert_eq!(report.current().breadcrumbs().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryReport {
    inner: Arc<MemoryReportInner>,
}

#[derive(Debug)]
struct MemoryReportInner {
    max_breadcrumbs: usize,
    current: Arc<MemoryHub>,
    forked: Mutex<Vec<Arc<MemoryHub>>>,
}

impl Default for MemoryReport {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BREADCRUMBS)
    }
}

impl MemoryReport {
    /// Create a report whose hubs retain at most `max_breadcrumbs` breadcrumbs each.
    pub fn new(max_breadcrumbs: usize) -> Self {
        Self {
            inner: Arc::new(MemoryReportInner {
                max_breadcrumbs,
                current: Arc::new(MemoryHub::new(max_breadcrumbs)),
                forked: Mutex::new(vec![]),
            }),
        }
    }

    /// The implicit hub.
    pub fn current(&self) -> Arc<MemoryHub> {
        self.inner.current.clone()
    }

    /// Every hub created for an execution context, in creation order.
    pub fn forked(&self) -> Vec<Arc<MemoryHub>> {
        lock(&self.inner.forked).clone()
    }
}

impl Report for MemoryReport {
    fn current_hub(&self) -> Arc<dyn Hub> {
        self.inner.current.clone()
    }

    fn new_hub(&self) -> Arc<dyn Hub> {
        let hub = Arc::new(MemoryHub::new(self.inner.max_breadcrumbs));
        lock(&self.inner.forked).push(hub.clone());
        hub
    }
}

/// An event together with the breadcrumb trail its hub held when it was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub event: Event,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// A [`Hub`] that keeps breadcrumbs in a bounded ring buffer and records captured events.
#[derive(Debug)]
pub struct MemoryHub {
    max_breadcrumbs: usize,
    breadcrumbs: Mutex<VecDeque<Breadcrumb>>,
    captures: Mutex<Vec<Capture>>,
}

impl MemoryHub {
    pub fn new(max_breadcrumbs: usize) -> Self {
        Self {
            max_breadcrumbs,
            breadcrumbs: Mutex::new(VecDeque::new()),
            captures: Mutex::new(vec![]),
        }
    }

    /// The retained breadcrumbs, oldest first.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        lock(&self.breadcrumbs).iter().cloned().collect()
    }

    /// The captured events, in capture order.
    pub fn captures(&self) -> Vec<Capture> {
        lock(&self.captures).clone()
    }

    /// The captured events without their trails.
    pub fn events(&self) -> Vec<Event> {
        lock(&self.captures)
            .iter()
            .map(|capture| capture.event.clone())
            .collect()
    }
}

impl Hub for MemoryHub {
    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        if self.max_breadcrumbs == 0 {
            return;
        }

        let mut breadcrumbs = lock(&self.breadcrumbs);
        while breadcrumbs.len() >= self.max_breadcrumbs {
            breadcrumbs.pop_front();
        }
        breadcrumbs.push_back(breadcrumb);
    }

    fn capture_event(&self, event: Event) {
        let breadcrumbs = self.breadcrumbs();
        lock(&self.captures).push(Capture { event, breadcrumbs });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Payload;
    use crate::Severity;

    fn crumb(message: &str) -> Breadcrumb {
        Breadcrumb::new(Severity::Info, message, Payload::new())
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let hub = MemoryHub::new(2);
        hub.add_breadcrumb(crumb("one"));
        hub.add_breadcrumb(crumb("two"));
        hub.add_breadcrumb(crumb("three"));

        let messages = hub
            .breadcrumbs()
            .into_iter()
            .map(|b| b.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_capture_snapshots_trail() {
        let hub = MemoryHub::new(10);
        hub.add_breadcrumb(crumb("before"));
        hub.capture_event(Event::new(Severity::Error, "failed", Payload::new()));
        hub.add_breadcrumb(crumb("after"));

        let captures = hub.captures();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].event.message, "failed");
        assert_eq!(captures[0].breadcrumbs.len(), 1);
        assert_eq!(captures[0].breadcrumbs[0].message, "before");
        assert_eq!(hub.breadcrumbs().len(), 2);
    }

    #[test]
    fn test_forked_hubs_inherit_capacity() {
        let report = MemoryReport::new(1);
        let forked = report.new_hub();
        forked.add_breadcrumb(crumb("one"));
        forked.add_breadcrumb(crumb("two"));

        let hubs = report.forked();
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].breadcrumbs().len(), 1);
        assert!(report.current().breadcrumbs().is_empty());
    }
}

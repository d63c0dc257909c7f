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

//! Reporting backends that receive breadcrumbs and events.
//!
//! A [`Report`] owns the implicit process-wide [`Hub`] and forks new hubs for execution
//! contexts. Hubs do their own synchronization; the facade never locks around them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use std::time::SystemTime;

use crate::Payload;
use crate::Severity;

pub use self::memory::Capture;
pub use self::memory::MemoryHub;
pub use self::memory::MemoryReport;
pub use self::sentry::SentryHub;
pub use self::sentry::SentryReport;

mod memory;
mod sentry;

/// A timestamped record kept on a hub and shipped along with a later event.
#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub timestamp: SystemTime,
    pub severity: Severity,
    pub message: String,
    pub data: Payload,
}

impl Breadcrumb {
    pub fn new(severity: Severity, message: impl Into<String>, data: Payload) -> Self {
        Self {
            timestamp: SystemTime::now(),
            severity,
            message: message.into(),
            data,
        }
    }
}

/// A message actively sent to the reporting backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub severity: Severity,
    pub message: String,
    pub data: Payload,
}

impl Event {
    pub fn new(severity: Severity, message: impl Into<String>, data: Payload) -> Self {
        Self {
            severity,
            message: message.into(),
            data,
        }
    }
}

/// A correlation handle binding breadcrumbs and events to one logical execution.
///
/// Implementations must be safe to use from several threads at once.
pub trait Hub: fmt::Debug + Send + Sync + 'static {
    /// Appends a breadcrumb to this hub's trail.
    fn add_breadcrumb(&self, breadcrumb: Breadcrumb);

    /// Sends an event, carrying the breadcrumbs recorded on this hub so far.
    fn capture_event(&self, event: Event);
}

/// A reporting backend.
pub trait Report: fmt::Debug + Send + Sync + 'static {
    /// The hub used when no execution context is supplied.
    fn current_hub(&self) -> Arc<dyn Hub>;

    /// Creates a hub for a new execution context, inheriting the current hub's configuration.
    fn new_hub(&self) -> Arc<dyn Hub>;

    /// Flushes pending events, waiting at most `timeout`.
    fn flush(&self, timeout: Duration) {
        let _ = timeout;
    }
}

impl<T: Report> From<T> for Box<dyn Report> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

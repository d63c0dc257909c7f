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

//! Execution contexts that scope reporting hubs.

use std::sync::Arc;
use std::sync::OnceLock;

use crate::report::Hub;
use crate::report::Report;

/// The scope of one logical execution, such as a request or a workflow run.
///
/// A context carries at most one reporting hub. The hub is created from the reporting
/// backend on first use and cached for the rest of the context's lifetime. Clones of a
/// context share the same hub, while independently created contexts never do.
///
/// # Examples
///
/// ```
/// use logwarden::Context;
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
/// let ctx = Context::new();
/// facade.info_with_context(&ctx, "request accepted", &[]);
/// facade.warn_with_context(&ctx, "slow upstream", &[]);
///
/// assert_eq!(report.forked().len(), 1);
/// assert_eq!(report.forked()[0].breadcrumbs().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    hub: Arc<OnceLock<Arc<dyn Hub>>>,
}

impl Context {
    /// Create a context without a hub; one is created on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with `hub` already attached.
    pub fn with_hub(hub: Arc<dyn Hub>) -> Self {
        let context = Self::new();
        let _ = context.hub.set(hub);
        context
    }

    /// The hub attached to this context, if any has been attached or created yet.
    pub fn hub(&self) -> Option<&Arc<dyn Hub>> {
        self.hub.get()
    }

    /// Whether `self` and `other` are the same execution context.
    pub fn same_as(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.hub, &other.hub)
    }

    pub(crate) fn resolve_hub(&self, report: &dyn Report) -> Arc<dyn Hub> {
        self.hub.get_or_init(|| report.new_hub()).clone()
    }
}

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

//! Adapters for code running inside an external execution engine, such as the workflow and
//! activity handlers of a workflow engine.
//!
//! An engine is supported by implementing [`NativeLoggerSource`]: it tells the facade which
//! logger the engine provides for the current execution, which correlation fields identify
//! that execution, and which [`Context`] scopes its reporting. [`ContextLogger`] then offers
//! the six facade operations on top of it.

use std::panic::Location;

use crate::Context;
use crate::Facade;
use crate::Field;
use crate::Severity;
use crate::facade::Scope;
use crate::global::global;
use crate::sink::Callsite;

pub use self::activity::ActivityInfo;
pub use self::activity::ActivitySource;
pub use self::printf::PrintfLogger;
pub use self::workflow::WorkflowInfo;
pub use self::workflow::WorkflowSource;

mod activity;
mod printf;
mod workflow;

/// An execution environment the facade can log from.
pub trait NativeLoggerSource {
    /// The logger the engine provides for this execution, or `None` to use the facade's sink.
    fn native_logger(&self) -> Option<&dyn log::Log> {
        None
    }

    /// Fields identifying this execution, appended to every call.
    fn correlation_fields(&self) -> Vec<Field>;

    /// The context whose hub this execution reports to.
    fn context(&self) -> &Context;
}

/// A logger bound to one execution of an external engine.
///
/// # Examples
///
/// ```
/// use logwarden::Context;
/// use logwarden::adapter::ContextLogger;
/// use logwarden::adapter::WorkflowInfo;
/// use logwarden::adapter::WorkflowSource;
/// use logwarden::append;
///
/// let facade = logwarden::builder()
///     .append(append::Stderr::default())
///     .build();
/// let source = WorkflowSource::new(
///     WorkflowInfo {
///         workflow_id: "order-42".to_string(),
///         run_id: "3f1c".to_string(),
///         workflow_type: "FulfillOrder".to_string(),
///     },
///     Context::new(),
/// );
///
/// let logger = ContextLogger::new(&facade, source);
/// logger.warn("inventory low", &[]);
/// ```
#[derive(Debug)]
pub struct ContextLogger<'a, S> {
    facade: &'a Facade,
    source: S,
}

impl<S: NativeLoggerSource> ContextLogger<'static, S> {
    /// Bind `source` to the process-wide facade.
    ///
    /// # Panics
    ///
    /// Panic if no process-wide facade has been installed yet.
    #[track_caller]
    pub fn global(source: S) -> Self {
        Self::new(global(), source)
    }
}

impl<'a, S: NativeLoggerSource> ContextLogger<'a, S> {
    pub fn new(facade: &'a Facade, source: S) -> Self {
        Self { facade, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.call(Severity::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.call(Severity::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.call(Severity::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.call(Severity::Error, msg, fields);
    }

    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.call(Severity::Panic, msg, fields);
        self.facade.terminate(Severity::Panic, msg)
    }

    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.call(Severity::Fatal, msg, fields);
        self.facade.terminate(Severity::Fatal, msg)
    }

    #[track_caller]
    fn call(&self, severity: Severity, msg: &str, fields: &[Field]) {
        let callsite = Callsite::from(Location::caller());
        let mut fields = fields.to_vec();
        fields.extend(self.source.correlation_fields());

        let logger = match self.source.native_logger() {
            Some(logger) => logger,
            None => self.facade.sink(),
        };
        self.facade.emit(
            logger,
            Scope::Context(self.source.context()),
            severity,
            callsite,
            msg,
            &fields,
        );
    }
}

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

use crate::Context;
use crate::Field;
use crate::adapter::NativeLoggerSource;

/// What a workflow engine knows about a running activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInfo {
    pub workflow_id: String,
    pub run_id: String,
    pub activity_id: String,
    pub activity_type: String,
    /// The type of the workflow that scheduled the activity, when the engine reports it.
    pub workflow_type: Option<String>,
}

/// A [`NativeLoggerSource`] for activity handlers.
///
/// Every call carries `workflow_id`, `workflow_run_id`, `activity_id`, `activity_type` and,
/// when known, `workflow_type`.
pub struct ActivitySource {
    info: ActivityInfo,
    context: Context,
    logger: Option<Arc<dyn log::Log>>,
}

impl ActivitySource {
    pub fn new(info: ActivityInfo, context: Context) -> Self {
        Self {
            info,
            context,
            logger: None,
        }
    }

    /// Write lines through the engine's own logger instead of the facade's sink.
    pub fn with_logger(mut self, logger: Arc<dyn log::Log>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn info(&self) -> &ActivityInfo {
        &self.info
    }
}

impl fmt::Debug for ActivitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivitySource")
            .field("info", &self.info)
            .field("context", &self.context)
            .field("native_logger", &self.logger.is_some())
            .finish()
    }
}

impl NativeLoggerSource for ActivitySource {
    fn native_logger(&self) -> Option<&dyn log::Log> {
        self.logger.as_deref()
    }

    fn correlation_fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::str("workflow_id", self.info.workflow_id.as_str()),
            Field::str("workflow_run_id", self.info.run_id.as_str()),
            Field::str("activity_id", self.info.activity_id.as_str()),
            Field::str("activity_type", self.info.activity_type.as_str()),
        ];
        if let Some(workflow_type) = &self.info.workflow_type {
            fields.push(Field::str("workflow_type", workflow_type.as_str()));
        }
        fields
    }

    fn context(&self) -> &Context {
        &self.context
    }
}

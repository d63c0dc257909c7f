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

/// What a workflow engine knows about a running workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInfo {
    pub workflow_id: String,
    pub run_id: String,
    pub workflow_type: String,
}

/// A [`NativeLoggerSource`] for workflow handlers.
///
/// Every call carries `workflow_id`, `workflow_type` and `workflow_run_id`.
pub struct WorkflowSource {
    info: WorkflowInfo,
    context: Context,
    logger: Option<Arc<dyn log::Log>>,
}

impl WorkflowSource {
    pub fn new(info: WorkflowInfo, context: Context) -> Self {
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

    pub fn info(&self) -> &WorkflowInfo {
        &self.info
    }
}

impl fmt::Debug for WorkflowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowSource")
            .field("info", &self.info)
            .field("context", &self.context)
            .field("native_logger", &self.logger.is_some())
            .finish()
    }
}

impl NativeLoggerSource for WorkflowSource {
    fn native_logger(&self) -> Option<&dyn log::Log> {
        self.logger.as_deref()
    }

    fn correlation_fields(&self) -> Vec<Field> {
        vec![
            Field::str("workflow_id", self.info.workflow_id.as_str()),
            Field::str("workflow_type", self.info.workflow_type.as_str()),
            Field::str("workflow_run_id", self.info.run_id.as_str()),
        ]
    }

    fn context(&self) -> &Context {
        &self.context
    }
}

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

use logwarden::Context;
use logwarden::Field;
use logwarden::adapter::ActivityInfo;
use logwarden::adapter::ActivitySource;
use logwarden::adapter::ContextLogger;
use logwarden::adapter::WorkflowInfo;
use logwarden::adapter::WorkflowSource;
use logwarden::append;
use logwarden::layout::JsonLayout;

fn main() {
    let facade = logwarden::builder()
        .level("info")
        .append(append::Stdout::default().with_layout(JsonLayout::default()))
        .build();
    logwarden::set_global(facade).unwrap();

    // one context per workflow run, shared by the run's activities
    let run = Context::new();

    let workflow = ContextLogger::global(WorkflowSource::new(
        WorkflowInfo {
            workflow_id: "order-42".to_string(),
            run_id: "0b6f7a".to_string(),
            workflow_type: "FulfillOrder".to_string(),
        },
        run.clone(),
    ));
    workflow.info("workflow started", &[]);

    let activity = ContextLogger::global(ActivitySource::new(
        ActivityInfo {
            workflow_id: "order-42".to_string(),
            run_id: "0b6f7a".to_string(),
            activity_id: "1".to_string(),
            activity_type: "ChargeCard".to_string(),
            workflow_type: Some("FulfillOrder".to_string()),
        },
        run,
    ));
    activity.warn("card declined, retrying", &[Field::u64("attempt", 1)]);
    activity.error("card declined", &[Field::u64("attempt", 3)]);

    logwarden::flush();
}

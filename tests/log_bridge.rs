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

use logwarden::Severity;
use logwarden::append;
use logwarden::report::MemoryReport;

#[test]
fn test_log_crate_records_reach_the_facade() {
    let report = MemoryReport::default();
    let facade = logwarden::builder()
        .level("debug")
        .append(append::Testing::default())
        .report(report.clone())
        .build();

    logwarden::bridge::setup_log_crate();
    // dropped, nothing is installed yet
    log::info!("before the facade");

    logwarden::set_global(facade).unwrap();

    log::trace!("trace is debug");
    log::debug!("debug only logs");
    log::info!(user = "alice"; "signed in");
    log::warn!("quota at {}%", 90);
    log::error!(code = 503; "upstream failed");

    let hub = report.current();
    let breadcrumbs = hub.breadcrumbs();
    let seen = breadcrumbs
        .iter()
        .map(|b| (b.severity, b.message.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        seen,
        vec![
            (Severity::Info, "signed in"),
            (Severity::Warn, "quota at 90%"),
            (Severity::Error, "upstream failed"),
        ]
    );
    assert_eq!(breadcrumbs[0].data["user"], "alice");

    let events = hub.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "upstream failed");
    assert_eq!(events[0].data["code"], 503);
}

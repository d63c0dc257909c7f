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

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use logwarden::Context;
use logwarden::Field;
use logwarden::append;
use logwarden::report::SentryReport;
use sentry::test::TestTransport;

fn exit_by_panic(code: i32) -> ! {
    panic!("exit({code})")
}

fn trail(event: &sentry::protocol::Event<'static>) -> Vec<String> {
    event
        .breadcrumbs
        .values
        .iter()
        .filter_map(|b| b.message.clone())
        .collect()
}

// sentry binds its client process-wide, so the whole flow is one test
#[test]
fn test_sentry_backend_end_to_end() {
    let transport = TestTransport::new();
    let _guard = sentry::init(sentry::ClientOptions {
        dsn: Some("https://public@sentry.example.com/1".parse().unwrap()),
        transport: Some(Arc::new(transport.clone())),
        ..Default::default()
    });
    sentry::Hub::main().bind_client(sentry::Hub::current().client());

    let facade = logwarden::builder()
        .level("debug")
        .append(append::Testing::default())
        .report(SentryReport::default())
        .exit_with(exit_by_panic)
        .build();

    // context-free calls share one trail across threads
    std::thread::scope(|s| {
        s.spawn(|| facade.info("from worker thread", &[]));
    });
    facade.debug("never reported", &[]);
    facade.error("main failure", &[Field::str("stage", "load")]);

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message.as_deref(), Some("main failure"));
    assert_eq!(events[0].level, sentry::Level::Error);
    assert_eq!(events[0].extra["stage"], "load");
    assert_eq!(trail(&events[0]), vec!["from worker thread", "main failure"]);

    // one context used from several threads reports to one forked hub
    let ctx = Context::new();
    std::thread::scope(|s| {
        for i in 0..3 {
            let facade = &facade;
            let ctx = ctx.clone();
            s.spawn(move || facade.warn_with_context(&ctx, &format!("step {i}"), &[]));
        }
    });
    facade.error_with_context(&ctx, "context failure", &[]);

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1);
    let scoped = trail(&events[0]);
    assert_eq!(scoped.iter().filter(|m| m.starts_with("step ")).count(), 3);
    assert_eq!(scoped.last().map(String::as_str), Some("context failure"));

    // panic sends exactly one event, with its message and payload
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        facade.panic("boom", &[Field::str("stage", "commit")]);
    }));
    assert!(result.is_err());

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, sentry::Level::Fatal);
    assert_eq!(events[0].message.as_deref(), Some("boom"));
    assert_eq!(events[0].extra["stage"], "commit");
    assert!(!trail(&events[0]).iter().any(|m| m.starts_with("step ")));

    // fatal reports once, then calls the exit hook
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        facade.fatal("disk gone", &[]);
    }));
    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("exit(1)")
    );

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, sentry::Level::Fatal);
    assert_eq!(events[0].message.as_deref(), Some("disk gone"));
}

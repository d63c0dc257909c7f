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

use logwarden::Config;
use logwarden::ErrorKind;
use logwarden::ReportingConfig;

#[test]
fn test_concurrent_initialize_installs_one_client() {
    let config = Config {
        level: "info".to_string(),
        development: false,
        reporting: Some(ReportingConfig::new("https://public@sentry.example.com/1")),
    };

    let results = std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| s.spawn(|| logwarden::initialize(&config)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::AlreadyInitialized);
    }

    // the winner's client stays bound to the process-wide hub and open
    let client = sentry::Hub::main().client().unwrap();
    assert!(client.is_enabled());
    assert!(logwarden::try_global().is_ok());
}

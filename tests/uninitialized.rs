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
use logwarden::ErrorKind;
use logwarden::Field;

#[test]
#[should_panic(expected = "use logger without initializing")]
fn test_debug_before_initialize_panics() {
    logwarden::debug("too early", &[]);
}

#[test]
#[should_panic(expected = "use logger without initializing")]
fn test_info_before_initialize_panics() {
    logwarden::info("too early", &[Field::bool("early", true)]);
}

#[test]
#[should_panic(expected = "use logger without initializing")]
fn test_warn_with_context_before_initialize_panics() {
    logwarden::warn_with_context(&Context::new(), "too early", &[]);
}

#[test]
#[should_panic(expected = "use logger without initializing")]
fn test_error_before_initialize_panics() {
    logwarden::error("too early", &[]);
}

#[test]
#[should_panic(expected = "use logger without initializing")]
fn test_fatal_before_initialize_panics() {
    logwarden::fatal("too early", &[]);
}

#[test]
fn test_try_global_before_initialize() {
    let err = logwarden::try_global().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotInitialized);

    // flushing has nothing to lose
    logwarden::flush();
}

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

use std::time::Duration;

use logwarden::Config;
use logwarden::Context;
use logwarden::Field;

fn main() {
    let mut config = Config::from_env();
    config.development = true;
    config.level = "debug".to_string();
    logwarden::initialize(&config).unwrap();

    logwarden::debug("Hello debug!", &[]);
    logwarden::info("Hello info!", &[Field::u64("port", 8080)]);
    logwarden::warn(
        "Hello warn!",
        &[Field::duration("elapsed", Duration::from_millis(1500))],
    );

    let ctx = Context::new();
    logwarden::info_with_context(&ctx, "request accepted", &[Field::str("path", "/orders")]);
    logwarden::error_with_context(&ctx, "Hello error!", &[Field::i64("status", 503)]);

    logwarden::flush();
}

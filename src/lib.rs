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

//! Logwarden is a leveled logging facade that mirrors log calls into an error-reporting
//! backend.
//!
//! # Overview
//!
//! Every call writes a line to a leveled logger. Info and warn calls also leave a breadcrumb on
//! a reporting hub; error calls additionally send an event, which carries the breadcrumbs left
//! before it. Panic and fatal calls report first, then log, then unwind or exit. Debug calls
//! only log.
//!
//! Hubs are scoped by [`Context`]: calls made with the same context share one hub, calls made
//! without a context use the backend's implicit hub. The default backend is [Sentry](sentry).
//!
//! # Examples
//!
//! Process-wide setup:
//!
//! ```
//! use logwarden::Config;
//! use logwarden::Field;
//!
//! logwarden::initialize(&Config {
//!     level: "debug".to_string(),
//!     development: true,
//!     reporting: None,
//! })
//! .unwrap();
//!
//! logwarden::info("server started", &[Field::u64("port", 8080)]);
//!
//! let ctx = logwarden::Context::new();
//! logwarden::warn_with_context(&ctx, "slow request", &[Field::str("path", "/orders")]);
//! logwarden::error_with_context(&ctx, "request failed", &[]);
//! ```
//!
//! An explicitly constructed facade, without global state:
//!
//! ```
//! use logwarden::append;
//! use logwarden::layout::JsonLayout;
//!
//! let facade = logwarden::builder()
//!     .level("info")
//!     .append(append::Stdout::default().with_layout(JsonLayout::default()))
//!     .build();
//!
//! facade.warn("cache miss ratio high", &[]);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod adapter;
pub mod append;
pub mod bridge;
pub mod layout;
pub mod report;

pub use append::Append;
pub use layout::Layout;
pub use report::Hub;
pub use report::Report;

mod config;
pub use config::Config;
pub use config::ReportingConfig;

mod context;
pub use context::Context;

mod error;
pub use error::Error;
pub use error::ErrorKind;

mod facade;
pub use facade::Facade;
pub use facade::FacadeBuilder;
pub use facade::builder;

mod field;
pub use field::Field;
pub use field::FieldValue;
pub use field::Payload;
pub use field::fields_to_payload;

mod global;
pub use global::*;

mod level;
pub use level::Severity;
pub use level::parse_level;

mod sink;
pub use sink::Sink;

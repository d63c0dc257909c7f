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

//! The process-wide facade.
//!
//! The facade is installed once, by [`initialize`] or [`set_global`], and read by every
//! function in this module afterwards. A second installation is an error and leaves the first
//! facade in place. Logging through this module before installation panics: silently dropping
//! diagnostics would hide every failure that follows.

use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;

use crate::Config;
use crate::Context;
use crate::Error;
use crate::ErrorKind;
use crate::Facade;
use crate::Field;

static FACADE: OnceLock<Facade> = OnceLock::new();
static INSTALL: Mutex<()> = Mutex::new(());

/// Build a facade from `config` and install it as the process-wide facade.
///
/// # Errors
///
/// Return an error if the reporting configuration is invalid, or if a facade has already been
/// installed.
///
/// # Examples
///
/// ```
/// use logwarden::Config;
///
/// logwarden::initialize(&Config::default()).unwrap();
/// logwarden::info("initialized", &[]);
/// ```
pub fn initialize(config: &Config) -> Result<(), Error> {
    // hold the lock across building: a facade that loses the race must never initialize and
    // then close a Sentry client
    let _guard = INSTALL.lock().unwrap_or_else(PoisonError::into_inner);
    if FACADE.get().is_some() {
        return Err(already_initialized());
    }
    install(Facade::from_config(config)?)
}

/// Install `facade` as the process-wide facade.
///
/// # Errors
///
/// Return an error if a facade has already been installed.
pub fn set_global(facade: Facade) -> Result<(), Error> {
    let _guard = INSTALL.lock().unwrap_or_else(PoisonError::into_inner);
    install(facade)
}

fn install(facade: Facade) -> Result<(), Error> {
    FACADE.set(facade).map_err(|_| already_initialized())
}

/// Return the process-wide facade, or an error if none has been installed yet.
pub fn try_global() -> Result<&'static Facade, Error> {
    FACADE.get().ok_or_else(|| {
        Error::new(
            ErrorKind::NotInitialized,
            "use logger without initializing",
        )
    })
}

/// Return the process-wide facade.
///
/// # Panics
///
/// Panic if no facade has been installed yet.
#[track_caller]
pub fn global() -> &'static Facade {
    match FACADE.get() {
        Some(facade) => facade,
        None => panic!("logwarden: use logger without initializing"),
    }
}

fn already_initialized() -> Error {
    Error::new(
        ErrorKind::AlreadyInitialized,
        "logwarden facade has been already initialized",
    )
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    global().debug(msg, fields);
}

#[track_caller]
pub fn debug_with_context(ctx: &Context, msg: &str, fields: &[Field]) {
    global().debug_with_context(ctx, msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    global().info(msg, fields);
}

#[track_caller]
pub fn info_with_context(ctx: &Context, msg: &str, fields: &[Field]) {
    global().info_with_context(ctx, msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    global().warn(msg, fields);
}

#[track_caller]
pub fn warn_with_context(ctx: &Context, msg: &str, fields: &[Field]) {
    global().warn_with_context(ctx, msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    global().error(msg, fields);
}

#[track_caller]
pub fn error_with_context(ctx: &Context, msg: &str, fields: &[Field]) {
    global().error_with_context(ctx, msg, fields);
}

#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    global().panic(msg, fields)
}

#[track_caller]
pub fn panic_with_context(ctx: &Context, msg: &str, fields: &[Field]) -> ! {
    global().panic_with_context(ctx, msg, fields)
}

#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    global().fatal(msg, fields)
}

#[track_caller]
pub fn fatal_with_context(ctx: &Context, msg: &str, fields: &[Field]) -> ! {
    global().fatal_with_context(ctx, msg, fields)
}

/// Create an execution context with a hub forked from the process-wide facade's backend.
#[track_caller]
pub fn new_context() -> Context {
    global().new_context()
}

/// Flush the process-wide facade. Does nothing if none has been installed.
pub fn flush() {
    if let Ok(facade) = try_global() {
        facade.flush();
    }
}

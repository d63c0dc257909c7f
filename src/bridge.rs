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

//! Forward records of the [`log`] crate to the process-wide facade.

use crate::Field;
use crate::Severity;
use crate::facade::Scope;
use crate::field::FieldValue;
use crate::global::try_global;
use crate::sink::Callsite;

struct LogCrateProxy(());

impl log::Log for LogCrateProxy {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        // info and above still leave breadcrumbs when the sink drops them
        match try_global() {
            Ok(facade) => {
                metadata.level() <= log::Level::Info
                    || log::Log::enabled(facade.sink(), metadata)
            }
            Err(_) => false,
        }
    }

    fn log(&self, record: &log::Record) {
        let Ok(facade) = try_global() else {
            return;
        };

        let severity = Severity::from(record.level());
        let fields = collect_fields(record.key_values());
        let callsite = Callsite {
            module_path: record.module_path(),
            file: record.file(),
            line: record.line(),
        };
        let msg = record.args().to_string();
        facade.emit(
            facade.sink(),
            Scope::Current,
            severity,
            callsite,
            &msg,
            &fields,
        );
    }

    fn flush(&self) {
        if let Ok(facade) = try_global() {
            log::Log::flush(facade.sink());
        }
    }
}

fn collect_fields(kv: &dyn log::kv::Source) -> Vec<Field> {
    struct Collector(Vec<Field>);

    impl<'kvs> log::kv::VisitSource<'kvs> for Collector {
        fn visit_pair(
            &mut self,
            key: log::kv::Key<'kvs>,
            value: log::kv::Value<'kvs>,
        ) -> Result<(), log::kv::Error> {
            let value = serde_json::to_value(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
            self.0
                .push(Field::new(key.as_str().to_string(), FieldValue::Json(value)));
            Ok(())
        }
    }

    let mut collector = Collector(Vec::with_capacity(kv.count()));
    kv.visit(&mut collector).ok();
    collector.0
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] to set up a `LogCrateProxy` and all logs from the
/// log crate will be forwarded to the process-wide facade: written to its sink, recorded as
/// breadcrumbs from info up, and sent as events from error up. `trace` records are treated as
/// debug.
///
/// Records logged before the facade is installed are dropped, since the log crate may be used
/// by dependencies long before logging is configured.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// logwarden::bridge::try_setup_log_crate().unwrap();
/// logwarden::initialize(&logwarden::Config::default()).unwrap();
///
/// log::info!(user = "alice"; "signed in");
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: LogCrateProxy = LogCrateProxy(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "logwarden::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

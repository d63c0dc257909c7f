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

//! The leveled logger handle that facade calls write lines to.

use std::io::Write;
use std::panic::Location;

use log::LevelFilter;

use crate::Error;
use crate::Field;
use crate::Severity;
use crate::append::Append;
use crate::field::FieldSource;

/// A leveled logger: a minimum level and the appenders records are written to.
///
/// `Sink` implements [`log::Log`], so it can be used wherever a `log` logger is expected.
#[derive(Debug)]
pub struct Sink {
    max_level: LevelFilter,
    appends: Vec<Box<dyn Append>>,
}

impl Sink {
    pub fn new(max_level: LevelFilter, appends: Vec<Box<dyn Append>>) -> Self {
        Self {
            max_level,
            appends,
        }
    }

    /// The minimum level a record needs to be written.
    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }
}

impl log::Log for Sink {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        for append in &self.appends {
            if let Err(err) = append.append(record) {
                handle_log_error(record, err);
            }
        }
    }

    fn flush(&self) {
        for append in &self.appends {
            if let Err(err) = append.flush() {
                handle_flush_error(err);
            }
        }
    }
}

/// Where a facade call was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Callsite<'a> {
    pub(crate) module_path: Option<&'a str>,
    pub(crate) file: Option<&'a str>,
    pub(crate) line: Option<u32>,
}

impl From<&'static Location<'static>> for Callsite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Callsite {
            module_path: None,
            file: Some(location.file()),
            line: Some(location.line()),
        }
    }
}

/// Write one facade call to `logger` as a `log` record.
///
/// `#[track_caller]` carries only the caller's file and line, not its module, so records of
/// facade calls have no module path and use the crate name as their target. Filter them by
/// file instead. Records forwarded from the `log` crate keep their own target and module path.
pub(crate) fn write_record(
    logger: &dyn log::Log,
    severity: Severity,
    callsite: Callsite<'_>,
    msg: &str,
    fields: &[Field],
) {
    let source = FieldSource(fields);
    logger.log(
        &log::Record::builder()
            .args(format_args!("{msg}"))
            .level(severity.log_level())
            .target(callsite.module_path.unwrap_or(env!("CARGO_PKG_NAME")))
            .module_path(callsite.module_path)
            .file(callsite.file)
            .line(callsite.line)
            .key_values(&source)
            .build(),
    );
}

fn handle_log_error(record: &log::Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use log::Log;

    use super::*;

    #[derive(Debug, Default, Clone)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl Append for Lines {
        fn append(&self, record: &log::Record) -> Result<(), Error> {
            self.0.lock().unwrap().push(format!(
                "{} {}:{} {}",
                record.level(),
                record.file().unwrap_or_default(),
                record.line().unwrap_or_default(),
                record.args()
            ));
            Ok(())
        }
    }

    #[test]
    fn test_threshold_filters_records() {
        let lines = Lines::default();
        let sink = Sink::new(LevelFilter::Warn, vec![Box::new(lines.clone())]);

        write_record(&sink, Severity::Info, Location::caller().into(), "skipped", &[]);
        write_record(&sink, Severity::Warn, Location::caller().into(), "kept", &[]);
        write_record(&sink, Severity::Fatal, Location::caller().into(), "fatal", &[]);
        sink.flush();

        let lines = lines.0.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("WARN src/sink.rs:"), "{}", lines[0]);
        assert!(lines[0].ends_with(" kept"));
        assert!(lines[1].starts_with("ERROR "));
        assert!(!sink.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
    }

    #[derive(Default)]
    struct Targets(Mutex<Vec<(String, Option<String>, Option<String>)>>);

    impl Log for Targets {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0.lock().unwrap().push((
                record.target().to_string(),
                record.module_path().map(str::to_string),
                record.file().map(str::to_string),
            ));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_record_target() {
        let targets = Targets::default();

        write_record(&targets, Severity::Info, Location::caller().into(), "facade", &[]);
        let forwarded = Callsite {
            module_path: Some("billing::invoice"),
            file: Some("src/invoice.rs"),
            line: Some(12),
        };
        write_record(&targets, Severity::Info, forwarded, "forwarded", &[]);

        let targets = targets.0.lock().unwrap();
        assert_eq!(
            targets[0],
            ("logwarden".to_string(), None, Some(file!().to_string()))
        );
        assert_eq!(
            targets[1],
            (
                "billing::invoice".to_string(),
                Some("billing::invoice".to_string()),
                Some("src/invoice.rs".to_string())
            )
        );
    }
}

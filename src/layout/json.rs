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

use std::fmt::Arguments;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::Error;
use crate::layout::Layout;
use crate::layout::TIMESTAMP_FORMAT;
use crate::layout::kv::collect_json;

/// A JSON layout for formatting log records. Used in production mode.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T22:44:57.172051+08:00","level":"ERROR","file":"src/main.rs","line":51,"message":"Hello error!","kvs":{"attempt":3}}
/// {"timestamp":"2024-08-11T22:44:57.172187+08:00","level":"WARN","file":"src/main.rs","line":52,"message":"Hello warn!","kvs":{}}
/// ```
///
/// # Examples
///
/// ```
/// use logwarden::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
}

impl JsonLayout {
    /// Sets the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logwarden::layout::JsonLayout;
    ///
    /// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    timestamp: String,
    level: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_path: Option<&'a str>,
    file: &'a str,
    line: u32,
    #[serde(serialize_with = "serialize_args")]
    message: &'a Arguments<'a>,
    kvs: Map<String, Value>,
}

fn serialize_args<S>(args: &Arguments, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(args)
}

impl Layout for JsonLayout {
    fn format(&self, record: &log::Record) -> Result<Vec<u8>, Error> {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let timestamp = Timestamp::now()
            .to_zoned(tz)
            .strftime(TIMESTAMP_FORMAT)
            .to_string();

        let record_line = RecordLine {
            timestamp,
            level: record.level().as_str(),
            module_path: record.module_path(),
            file: record.file().unwrap_or_default(),
            line: record.line().unwrap_or_default(),
            message: record.args(),
            kvs: collect_json(record.key_values()),
        };

        serde_json::to_vec(&record_line).map_err(Error::from_json_error)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Field;
    use crate::field::FieldSource;

    #[test]
    fn test_format_keeps_field_types() {
        let fields = [
            Field::u64("attempt", 3),
            Field::bool("retry", true),
            Field::any("job", &json!({"id": 7})),
        ];
        let source = FieldSource(&fields);
        let bytes = JsonLayout::default()
            .timezone(TimeZone::UTC)
            .format(
                &log::Record::builder()
                    .args(format_args!("job failed"))
                    .level(log::Level::Error)
                    .file(Some("src/jobs.rs"))
                    .line(Some(12))
                    .key_values(&source)
                    .build(),
            )
            .unwrap();
        let line: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(line["level"], "ERROR");
        assert_eq!(line["file"], "src/jobs.rs");
        assert_eq!(line["line"], 12);
        assert_eq!(line["message"], "job failed");
        assert_eq!(line["kvs"], json!({"attempt": 3, "retry": true, "job": {"id": 7}}));
        assert!(line.get("module_path").is_none());
        assert!(line["timestamp"].as_str().unwrap().ends_with("+00:00"));
    }
}

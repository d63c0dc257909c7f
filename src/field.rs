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

//! Typed key-value fields attached to a single facade call.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// The flat payload breadcrumbs and events carry to the reporting backend.
pub type Payload = BTreeMap<String, Value>;

/// A key-value pair attached to one log call.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use logwarden::Field;
///
/// let fields = [
///     Field::str("user", "alice"),
///     Field::u64("attempt", 3),
///     Field::duration("elapsed", Duration::from_millis(1500)),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

/// The typed value of a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Duration(Duration),
    /// A structured value in its serialized form.
    Json(Value),
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn str(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Str(value.into()))
    }

    pub fn i64(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, FieldValue::I64(value))
    }

    pub fn u64(key: impl Into<Cow<'static, str>>, value: u64) -> Self {
        Self::new(key, FieldValue::U64(value))
    }

    pub fn f64(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, FieldValue::F64(value))
    }

    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    /// Attach any serializable value.
    ///
    /// If serialization fails, the field carries the serialization error message instead.
    pub fn any<T>(key: impl Into<Cow<'static, str>>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")));
        Self::new(key, FieldValue::Json(value))
    }

    /// Attach an error under the key `error`.
    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::str("error", err.to_string())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

impl FieldValue {
    /// Render this value for the reporting backend.
    ///
    /// Durations use their debug form (`1.5s`); floats that JSON cannot hold become strings.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(v) => Value::String(v.clone()),
            FieldValue::I64(v) => Value::from(*v),
            FieldValue::U64(v) => Value::from(*v),
            FieldValue::F64(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(v.to_string())),
            FieldValue::Bool(v) => Value::Bool(*v),
            FieldValue::Duration(v) => Value::String(format!("{v:?}")),
            FieldValue::Json(v) => v.clone(),
        }
    }

    fn to_kv_value(&self) -> log::kv::Value<'_> {
        match self {
            FieldValue::Str(v) => log::kv::Value::from(v.as_str()),
            FieldValue::I64(v) => log::kv::Value::from(*v),
            FieldValue::U64(v) => log::kv::Value::from(*v),
            FieldValue::F64(v) => log::kv::Value::from(*v),
            FieldValue::Bool(v) => log::kv::Value::from(*v),
            FieldValue::Duration(v) => log::kv::Value::from_debug(v),
            FieldValue::Json(v) => log::kv::Value::from_serde(v),
        }
    }
}

/// Convert fields into the flat payload of a breadcrumb or event.
///
/// The last field wins when keys repeat.
///
/// # Examples
///
/// ```
/// use logwarden::Field;
/// use logwarden::fields_to_payload;
///
/// let payload = fields_to_payload(&[Field::i64("a", 1), Field::i64("a", 2)]);
/// assert_eq!(payload["a"], 2);
/// ```
pub fn fields_to_payload(fields: &[Field]) -> Payload {
    let mut payload = Payload::new();
    for field in fields {
        payload.insert(field.key.to_string(), field.value.to_json());
    }
    payload
}

/// Exposes fields as the key-values of a `log` record.
pub(crate) struct FieldSource<'a>(pub(crate) &'a [Field]);

impl log::kv::Source for FieldSource<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        for field in self.0 {
            visitor.visit_pair(log::kv::Key::from_str(&field.key), field.value.to_kv_value())?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

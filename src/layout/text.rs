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

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use log::Level;

use crate::Error;
use crate::layout::KvDisplay;
use crate::layout::Layout;
use crate::layout::TIMESTAMP_FORMAT;

/// A layout that formats log records as human-readable text. Used in development mode.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 ERROR src/main.rs:51 Hello error! attempt=3
/// 2024-08-11T22:44:57.172219+08:00  WARN src/main.rs:52 Hello warn!
/// 2024-08-11T22:44:57.172276+08:00  INFO app::server: src/server.rs:53 Hello info!
/// ```
///
/// Records bridged from the `log` crate carry a module path, which is printed before the file.
///
/// By default, log levels are colored. You can customize the color of each log level with
/// [`LevelColor`], or disable colors with [`TextLayout::no_color`].
#[derive(Default, Debug, Clone)]
pub struct TextLayout {
    colors: LevelColor,
    no_color: bool,
    tz: Option<TimeZone>,
}

impl TextLayout {
    /// Customizes the color of each log level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Disables colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Sets the timezone for timestamps. The system timezone is used otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logwarden::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

/// Customize the color of each log level.
#[derive(Debug, Clone)]
pub struct LevelColor {
    pub error: Color,
    pub warn: Color,
    pub info: Color,
    pub debug: Color,
    pub trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
            trace: Color::Magenta,
        }
    }
}

impl LevelColor {
    fn colorize(&self, no_color: bool, level: Level) -> ColoredString {
        if no_color {
            return ColoredString::from(level.as_str());
        }

        let color = match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        };
        ColoredString::from(level.as_str()).color(color)
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &log::Record) -> Result<Vec<u8>, Error> {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let time = Timestamp::now().to_zoned(tz);
        let time = time.strftime(TIMESTAMP_FORMAT);
        let level = self.colors.colorize(self.no_color, record.level());
        let module = match record.module_path() {
            Some(module) => format!("{module}: "),
            None => String::new(),
        };
        let file = record.file().unwrap_or_default();
        let line = record.line().unwrap_or_default();
        let message = record.args();
        let kvs = KvDisplay::new(record.key_values());

        Ok(format!("{time} {level:>5} {module}{file}:{line} {message}{kvs}").into_bytes())
    }
}

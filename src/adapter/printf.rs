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

use std::fmt;

use serde::Serialize;

use crate::Facade;
use crate::Field;
use crate::global::global;

/// A logger for libraries that only accept printf-style output.
///
/// Each formatted line is logged at info level, with the raw arguments attached as the `args`
/// field. A default `PrintfLogger` logs through the process-wide facade.
///
/// # Examples
///
/// ```
/// use logwarden::adapter::PrintfLogger;
///
/// logwarden::initialize(&logwarden::Config::default()).unwrap();
///
/// let logger = PrintfLogger::default();
/// logger.printf(format_args!("retrying request {} of {}", 2, 5), &(2, 5));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintfLogger<'a> {
    facade: Option<&'a Facade>,
}

impl<'a> PrintfLogger<'a> {
    /// Log through `facade` instead of the process-wide facade.
    pub fn new(facade: &'a Facade) -> Self {
        Self {
            facade: Some(facade),
        }
    }

    /// Log one formatted line.
    ///
    /// # Panics
    ///
    /// Panic if this logger is not bound to a facade and no process-wide facade has been
    /// installed yet.
    #[track_caller]
    pub fn printf<A>(&self, line: fmt::Arguments<'_>, args: &A)
    where
        A: Serialize + ?Sized,
    {
        let msg = match line.as_str() {
            Some(msg) => msg.to_string(),
            None => line.to_string(),
        };
        let facade = match self.facade {
            Some(facade) => facade,
            None => global(),
        };
        facade.info(&msg, &[Field::any("args", args)]);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::append::Testing;
    use crate::report::MemoryReport;

    #[test]
    fn test_printf_keeps_raw_args() {
        let report = MemoryReport::default();
        let facade = crate::builder()
            .append(Testing::default())
            .report(report.clone())
            .build();

        let logger = PrintfLogger::new(&facade);
        logger.printf(format_args!("retrying {} of {}", 2, 5), &(2, 5));
        logger.printf(format_args!("no arguments"), &[] as &[u8]);

        let breadcrumbs = report.current().breadcrumbs();
        assert_eq!(breadcrumbs.len(), 2);
        assert_eq!(breadcrumbs[0].message, "retrying 2 of 5");
        assert_eq!(breadcrumbs[0].data["args"], json!([2, 5]));
        assert_eq!(breadcrumbs[1].message, "no arguments");
        assert_eq!(breadcrumbs[1].data["args"], json!([]));
    }
}

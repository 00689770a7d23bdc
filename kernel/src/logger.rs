// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    error::{code, Error},
    sync::SpinLock,
};
use core::fmt;
use log::{LevelFilter, Metadata, Record};
use spin::Once;

static LOGGER_MUTEX: SpinLock<()> = SpinLock::new(());
static SINK: Once<&'static dyn LogSink> = Once::new();

/// Destination of formatted log lines, usually the board console.
pub trait LogSink: Sync {
    fn write_line(&self, args: fmt::Arguments<'_>);
}

struct Logger;

pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

///set max log level
pub fn set_max_level(level: LogLevel) {
    match level {
        LogLevel::Trace => log::set_max_level(LevelFilter::Trace),
        LogLevel::Debug => log::set_max_level(LevelFilter::Debug),
        LogLevel::Info => log::set_max_level(LevelFilter::Info),
        LogLevel::Warn => log::set_max_level(LevelFilter::Warn),
        LogLevel::Error => log::set_max_level(LevelFilter::Error),
    }
}

/// log init
///
/// Only the first call installs the logger; later calls report `EBUSY`.
pub fn logger_init(sink: &'static dyn LogSink) -> Result<(), Error> {
    static LOGGER: Logger = Logger {};
    SINK.call_once(|| sink);
    log::set_logger(&LOGGER).map_err(|_| code::EBUSY)?;
    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            set_max_level(LogLevel::Trace);
        } else {
            set_max_level(LogLevel::Warn);
        }
    }
    Ok(())
}

///impl log for Logger
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(sink) = SINK.get() else {
            return;
        };
        let _guard = LOGGER_MUTEX.lock();
        sink.write_line(format_args!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{string::String, sync::Mutex, vec::Vec};

    struct CaptureSink {
        lines: Mutex<Vec<String>>,
    }

    impl LogSink for CaptureSink {
        fn write_line(&self, args: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(std::format!("{}", args));
        }
    }

    static CAPTURE: CaptureSink = CaptureSink {
        lines: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_logger_formats_and_filters() {
        logger_init(&CAPTURE).unwrap();
        assert_eq!(logger_init(&CAPTURE), Err(code::EBUSY));

        set_max_level(LogLevel::Info);
        log::info!(target: "pll", "locked at {} Hz", 50_000_000);
        log::debug!(target: "pll", "filtered out");

        let lines = CAPTURE.lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|l| l == "[INFO] pll: locked at 50000000 Hz"));
        assert!(!lines.iter().any(|l| l.contains("filtered out")));
    }
}

// Copyright 2025 eraflo
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

//! The one-time startup measurement taken around a module's `init` call.

use std::time::Duration;

/// Two timestamps taken immediately around the single `init` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupTiming {
    before: Duration,
    after: Duration,
}

impl StartupTiming {
    /// Records a sample. An `after` reading earlier than `before` can only
    /// come from a broken clock and is clamped to a zero latency.
    pub fn new(before: Duration, after: Duration) -> Self {
        Self {
            before,
            after: after.max(before),
        }
    }

    /// The reading taken immediately before `init`.
    pub fn before(&self) -> Duration {
        self.before
    }

    /// The reading taken immediately after `init` returned.
    pub fn after(&self) -> Duration {
        self.after
    }

    /// The startup latency, `after - before`.
    pub fn latency(&self) -> Duration {
        self.after - self.before
    }

    /// The startup latency in fractional milliseconds.
    pub fn latency_ms(&self) -> f64 {
        self.latency().as_secs_f64() * 1000.0
    }
}

/// Receives the startup measurement once the module is initialized.
pub trait StartupObserver {
    /// Called exactly once, after `init` returned successfully and before the
    /// first frame is requested.
    fn startup_completed(&self, module: &str, timing: &StartupTiming);
}

/// Reports the startup latency as a single info-level log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStartupReporter;

impl StartupObserver for LogStartupReporter {
    fn startup_completed(&self, module: &str, timing: &StartupTiming) {
        log::info!(
            "Startup: '{}' initialized in {:.3} ms",
            module,
            timing.latency_ms()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Collects the records this module emits. Records from other targets
    /// are ignored so concurrently running tests cannot interfere.
    struct CaptureLogger {
        records: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.target().ends_with("timing::startup")
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata()) {
                self.records
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    #[test]
    fn log_reporter_emits_one_info_line_in_milliseconds() {
        // --- 1. ARRANGE ---
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        let timing = StartupTiming::new(Duration::from_millis(10), Duration::from_micros(12_500));

        // --- 2. ACT ---
        LogStartupReporter.startup_completed("life", &timing);

        // --- 3. ASSERT ---
        let records = CAPTURE.records.lock().unwrap();
        assert_eq!(
            *records,
            vec![(
                log::Level::Info,
                "Startup: 'life' initialized in 2.500 ms".to_string()
            )]
        );
    }

    #[test]
    fn latency_is_after_minus_before() {
        let timing = StartupTiming::new(Duration::from_millis(10), Duration::from_micros(12_500));
        assert_eq!(timing.latency(), Duration::from_micros(2_500));
        assert!((timing.latency_ms() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn latency_is_never_negative() {
        let timing = StartupTiming::new(Duration::from_millis(5), Duration::from_millis(3));
        assert_eq!(timing.latency(), Duration::ZERO);
        assert_eq!(timing.before(), Duration::from_millis(5));
    }

    #[test]
    fn identical_readings_give_zero_latency() {
        let timing = StartupTiming::new(Duration::from_secs(1), Duration::from_secs(1));
        assert_eq!(timing.latency_ms(), 0.0);
    }
}

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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic timestamp source with sub-millisecond resolution.
///
/// Timestamps are offsets from an origin fixed by the clock itself; only the
/// difference between two readings of the same clock is meaningful.
pub trait Clock {
    /// The current timestamp.
    fn now(&self) -> Duration;
}

/// Measures time elapsed since it was started.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    origin: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch.
    #[inline]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since [`start`](Self::start).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Time elapsed since [`start`](Self::start), in fractional milliseconds.
    #[inline]
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

/// The OS monotonic clock, with its origin at construction time.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock {
    stopwatch: Stopwatch,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            stopwatch: Stopwatch::start(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.stopwatch.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to the host
/// and advance another from inside a compute module.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `step`. The reading saturates at
    /// `u64::MAX` nanoseconds.
    pub fn advance(&self, step: Duration) {
        let step = u64::try_from(step.as_nanos()).unwrap_or(u64::MAX);
        // The update closure never declines, so this cannot fail.
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |nanos| {
                Some(nanos.saturating_add(step))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

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

//! A frame host that refreshes at a fixed rate on the current thread.
//!
//! Stands in for a display when there is none: each refresh interval the
//! callbacks registered during the previous frame are run, in order. A frame
//! that overruns its slot is not made up for; the next one starts a full
//! interval after the late one finished.

use crate::summary::{discard_pending, report_outcomes, HostExit, HostSummary};
use cadence_core::{FrameCallback, FrameScheduler, FrameToken};
use cadence_runtime::FrameQueue;
use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Default refresh rate when none is configured.
pub const DEFAULT_REFRESH_RATE_HZ: u32 = 60;

/// A fixed-rate frame host driven from the calling thread.
#[derive(Debug)]
pub struct PacedFrameHost {
    queue: FrameQueue,
    interval: Duration,
    max_frames: Option<u64>,
    frames: Cell<u64>,
}

impl PacedFrameHost {
    /// Creates a host refreshing `refresh_rate_hz` times per second.
    /// A rate of zero is treated as one.
    pub fn new(refresh_rate_hz: u32) -> Self {
        Self {
            queue: FrameQueue::new(),
            interval: Duration::from_secs(1) / refresh_rate_hz.max(1),
            max_frames: None,
            frames: Cell::new(0),
        }
    }

    /// Stops [`run`](Self::run) after `limit` frames. `None` runs until
    /// nothing is pending.
    pub fn with_max_frames(mut self, limit: Option<u64>) -> Self {
        self.max_frames = limit;
        self
    }

    /// Time between two refreshes.
    pub fn refresh_interval(&self) -> Duration {
        self.interval
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    /// Drives frames until nothing is pending or the frame limit is hit.
    pub fn run(&self) -> HostSummary {
        log::info!(
            "Paced frame host started ({:.2} ms per frame, limit: {:?})",
            self.interval.as_secs_f64() * 1000.0,
            self.max_frames
        );

        let mut callback_errors = 0;
        let mut deadline = Instant::now() + self.interval;

        let exit = loop {
            if self.queue.is_idle() {
                break HostExit::Idle;
            }
            if self.max_frames.is_some_and(|limit| self.frames.get() >= limit) {
                discard_pending(&self.queue);
                break HostExit::FrameLimit;
            }

            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }

            self.frames.set(self.frames.get() + 1);
            callback_errors += report_outcomes(self.queue.run_frame());

            let finished = Instant::now();
            deadline += self.interval;
            if deadline < finished {
                deadline = finished + self.interval;
            }
        };

        let summary = HostSummary {
            frames: self.frames.get(),
            callback_errors,
            exit,
        };
        log::info!(
            "Paced frame host stopped after {} frames: {}",
            summary.frames,
            summary.exit
        );
        summary
    }
}

impl Default for PacedFrameHost {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_RATE_HZ)
    }
}

impl FrameScheduler for PacedFrameHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        self.queue.request_frame(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::FrameError;
    use std::rc::Rc;

    fn chain(host: &Rc<PacedFrameHost>, remaining: u32, runs: Rc<Cell<u32>>) {
        let next = Rc::clone(host);
        host.request_frame(Box::new(move || {
            runs.set(runs.get() + 1);
            if remaining > 1 {
                chain(&next, remaining - 1, runs);
            }
            Ok(())
        }));
    }

    #[test]
    fn test_interval_from_rate() {
        assert_eq!(
            PacedFrameHost::new(50).refresh_interval(),
            Duration::from_millis(20)
        );
        assert_eq!(
            PacedFrameHost::new(0).refresh_interval(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_run_returns_immediately_when_idle() {
        let host = PacedFrameHost::new(1000);
        let summary = host.run();
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.exit, HostExit::Idle);
    }

    #[test]
    fn test_run_stops_when_chain_ends() {
        let host = Rc::new(PacedFrameHost::new(1000));
        let runs = Rc::new(Cell::new(0));
        chain(&host, 5, Rc::clone(&runs));

        let summary = host.run();
        assert_eq!(runs.get(), 5);
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.exit, HostExit::Idle);
    }

    #[test]
    fn test_frame_limit_stops_endless_chain() {
        let host = Rc::new(PacedFrameHost::new(1000).with_max_frames(Some(3)));
        let runs = Rc::new(Cell::new(0));
        chain(&host, u32::MAX, Rc::clone(&runs));

        let summary = host.run();
        assert_eq!(runs.get(), 3);
        assert_eq!(summary.exit, HostExit::FrameLimit);
        assert_eq!(Rc::strong_count(&host), 1, "teardown drops pending callbacks");
    }

    #[test]
    fn test_frames_are_paced() {
        let host = Rc::new(PacedFrameHost::new(100));
        chain(&host, 5, Rc::new(Cell::new(0)));

        let started = Instant::now();
        host.run();
        assert!(
            started.elapsed() >= Duration::from_millis(45),
            "five 10 ms frames took only {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_callback_errors_are_counted_not_retried() {
        let host = PacedFrameHost::new(1000);
        host.request_frame(Box::new(|| {
            Err(FrameError::Tick {
                frame: 1,
                source: "boom".into(),
            })
        }));

        let summary = host.run();
        assert_eq!(summary.callback_errors, 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.exit, HostExit::Idle);
    }
}

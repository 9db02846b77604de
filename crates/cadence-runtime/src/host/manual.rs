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

use super::queue::{FrameOutcome, FrameQueue};
use cadence_core::{FrameCallback, FrameScheduler, FrameToken};
use std::cell::Cell;

/// A host whose display refreshes only when told to.
///
/// Nothing runs inside [`request_frame`](FrameScheduler::request_frame);
/// pending callbacks run synchronously on [`fire_frame`](Self::fire_frame),
/// which makes frame-by-frame assertions on the run-loop deterministic.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    queue: FrameQueue,
    requests: Cell<u64>,
    frames: Cell<u64>,
}

impl ManualFrameHost {
    /// Creates a host with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates one display refresh and returns what each callback produced.
    pub fn fire_frame(&self) -> Vec<FrameOutcome> {
        self.frames.set(self.frames.get() + 1);
        self.queue.run_frame()
    }

    /// Simulates up to `count` refreshes, stopping early once nothing is
    /// pending. Returns every outcome in order.
    pub fn fire_frames(&self, count: usize) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..count {
            if self.queue.is_idle() {
                break;
            }
            outcomes.extend(self.fire_frame());
        }
        outcomes
    }

    /// Total number of frame requests received so far.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }

    /// Number of refreshes simulated so far.
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    /// Number of callbacks waiting for the next refresh.
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }
}

impl FrameScheduler for ManualFrameHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        self.requests.set(self.requests.get() + 1);
        self.queue.request_frame(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_runs_until_fired() {
        let host = ManualFrameHost::new();
        let ran = std::rc::Rc::new(Cell::new(false));
        let flag = std::rc::Rc::clone(&ran);
        host.request_frame(Box::new(move || {
            flag.set(true);
            Ok(())
        }));

        assert!(!ran.get());
        assert_eq!(host.requests(), 1);
        assert_eq!(host.pending(), 1);

        let outcomes = host.fire_frame();
        assert!(ran.get());
        assert_eq!(outcomes.len(), 1);
        assert_eq!(host.frames(), 1);
    }

    #[test]
    fn test_fire_frames_stops_when_idle() {
        let host = ManualFrameHost::new();
        host.request_frame(Box::new(|| Ok(())));

        let outcomes = host.fire_frames(10);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(host.frames(), 1, "refreshes stop once nothing is pending");
    }
}

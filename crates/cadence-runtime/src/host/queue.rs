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

use cadence_core::{FrameCallback, FrameResult, FrameScheduler, FrameToken};
use std::cell::{Cell, RefCell};
use std::fmt;

/// The result of one callback run during a frame.
#[derive(Debug)]
pub struct FrameOutcome {
    /// The token the callback was registered under.
    pub token: FrameToken,
    /// What the callback returned to the host.
    pub result: FrameResult,
}

/// Callbacks waiting for the next frame.
///
/// A frame detaches the whole pending batch before running any of it, so a
/// callback that registers itself again lands in the following frame.
#[derive(Default)]
pub struct FrameQueue {
    pending: RefCell<Vec<(FrameToken, FrameCallback)>>,
    next_token: Cell<u64>,
}

impl FrameQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// `true` when nothing is waiting for a frame.
    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Detaches the callbacks due in the current frame, in registration order.
    pub fn take_frame(&self) -> Vec<(FrameToken, FrameCallback)> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Runs one frame: every callback registered before this call, in order.
    pub fn run_frame(&self) -> Vec<FrameOutcome> {
        self.take_frame()
            .into_iter()
            .map(|(token, callback)| FrameOutcome {
                token,
                result: callback(),
            })
            .collect()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let id = self.next_token.get() + 1;
        self.next_token.set(id);

        let token = FrameToken::new(id);
        self.pending.borrow_mut().push((token, callback));
        token
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .field("last_token", &self.next_token.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::FrameError;
    use std::rc::Rc;

    #[test]
    fn test_tokens_increase_per_request() {
        let queue = FrameQueue::new();
        let first = queue.request_frame(Box::new(|| Ok(())));
        let second = queue.request_frame(Box::new(|| Ok(())));

        assert!(first < second);
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_run_frame_runs_batch_in_order() {
        let queue = FrameQueue::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let order = Rc::clone(&order);
            queue.request_frame(Box::new(move || {
                order.borrow_mut().push(i);
                Ok(())
            }));
        }

        let outcomes = queue.run_frame();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_reregistration_is_deferred_to_next_frame() {
        let queue = Rc::new(FrameQueue::new());
        let runs = Rc::new(Cell::new(0));

        let inner_queue = Rc::clone(&queue);
        let inner_runs = Rc::clone(&runs);
        queue.request_frame(Box::new(move || {
            inner_runs.set(inner_runs.get() + 1);
            let runs = Rc::clone(&inner_runs);
            inner_queue.request_frame(Box::new(move || {
                runs.set(runs.get() + 1);
                Ok(())
            }));
            Ok(())
        }));

        queue.run_frame();
        assert_eq!(runs.get(), 1, "nested request must not run in the same frame");
        assert_eq!(queue.pending(), 1);

        queue.run_frame();
        assert_eq!(runs.get(), 2);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_outcome_carries_callback_error() {
        let queue = FrameQueue::new();
        let token = queue.request_frame(Box::new(|| {
            Err(FrameError::Tick {
                frame: 1,
                source: "boom".into(),
            })
        }));

        let outcomes = queue.run_frame();
        assert_eq!(outcomes[0].token, token);
        assert!(outcomes[0].result.is_err());
    }
}

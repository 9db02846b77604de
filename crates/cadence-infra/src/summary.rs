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

//! What a frame host reports once it stops driving frames.

use cadence_runtime::{FrameOutcome, FrameQueue};
use std::fmt;

/// Why a frame host returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostExit {
    /// No callback was waiting for another frame.
    Idle,
    /// The configured frame limit was reached.
    FrameLimit,
    /// The display was closed by the user or the platform.
    Closed,
}

impl fmt::Display for HostExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostExit::Idle => write!(f, "nothing left to run"),
            HostExit::FrameLimit => write!(f, "frame limit reached"),
            HostExit::Closed => write!(f, "display closed"),
        }
    }
}

/// Totals for one host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSummary {
    /// Frames presented.
    pub frames: u64,
    /// Callbacks that returned an error to the host.
    pub callback_errors: u64,
    /// Why the host stopped.
    pub exit: HostExit,
}

/// Applies the host's default handling to the callbacks of one frame:
/// errors are logged and counted, nothing is retried.
pub(crate) fn report_outcomes(outcomes: Vec<FrameOutcome>) -> u64 {
    let mut errors = 0;
    for outcome in outcomes {
        if let Err(err) = outcome.result {
            log::error!("Uncaught error in frame callback {}: {}", outcome.token, err);
            errors += 1;
        }
    }
    errors
}

/// Host teardown: callbacks still waiting for a frame are dropped unrun.
pub(crate) fn discard_pending(queue: &FrameQueue) {
    let pending = queue.take_frame();
    if !pending.is_empty() {
        log::debug!("Host teardown: discarding {} pending frame callbacks", pending.len());
    }
}

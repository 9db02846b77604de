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

//! The host's "run this before the next repaint" primitive.
//!
//! Hosts differ wildly in how they are driven (a browser's animation frame, a
//! window's redraw request, a paced loop on a plain thread), but they all
//! expose the same one-shot contract: accept a callback and invoke it once,
//! later, at the start of the next display refresh. There is no repeating
//! mode; a callback that wants to run again has to register itself again.

use crate::module::ModuleError;
use std::fmt;
use thiserror::Error;

/// The handle returned when a frame callback is registered.
///
/// Tokens increase monotonically per host. The run-loop never cancels a
/// pending frame, so it discards the token right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Wraps a raw host identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw host identifier.
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An error escaping a frame callback into the host.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The compute module's tick failed.
    #[error("tick {frame} of compute module failed: {source}")]
    Tick {
        /// The 1-based index of the failing tick.
        frame: u64,
        /// What the module raised.
        #[source]
        source: ModuleError,
    },
}

/// What a frame callback hands back to the host.
pub type FrameResult = Result<(), FrameError>;

/// A zero-argument, one-shot callback run at the start of a frame.
///
/// Callbacks are not `Send`: every host in this workspace runs them on the
/// thread that owns the display.
pub type FrameCallback = Box<dyn FnOnce() -> FrameResult + 'static>;

/// A host's frame-scheduling primitive.
pub trait FrameScheduler {
    /// Registers `callback` to run once before the next repaint.
    ///
    /// Callbacks registered while a frame is being processed run in the
    /// following frame, never in the current one.
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;
}

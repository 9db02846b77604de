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

//! The frame-synchronized run-loop.
//!
//! Once the module handle is available the loop calls `init` exactly once,
//! bracketing the call with two clock readings, reports the startup latency,
//! and then registers a frame callback. Every frame the callback ticks the
//! module and registers itself again. The handle travels inside the callback,
//! so only the one callback pending at any time can touch the module.

mod state;

pub use state::{LoopFailure, RunLoopMonitor, RunLoopState};

use crate::loader::ModuleHandle;
use cadence_core::{
    Clock, FrameError, FrameResult, FrameScheduler, LogStartupReporter, ModuleError,
    ModuleLoadError, MonotonicClock, StartupObserver, StartupTiming,
};
use serde::{Deserialize, Serialize};
use state::LoopStatus;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

/// What the run-loop does after a tick raises an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFailurePolicy {
    /// Hand the error to the host and request no further frame.
    #[default]
    Halt,
    /// Log the error and keep ticking on the next frame.
    SkipAndContinue,
}

/// Why the run-loop never reached `Running`.
#[derive(Debug, Error)]
pub enum RunLoopError {
    /// The module could not be acquired.
    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),
    /// The module's `init` raised an error.
    #[error("compute module '{module}' failed to initialize: {source}")]
    Initialization {
        /// The module that failed.
        module: String,
        /// What `init` raised.
        #[source]
        source: ModuleError,
    },
}

/// Sequences a compute module's `init` and its unbounded per-frame `tick`.
pub struct RunLoop<S: FrameScheduler + ?Sized + 'static> {
    scheduler: Rc<S>,
    clock: Box<dyn Clock>,
    observer: Box<dyn StartupObserver>,
    policy: TickFailurePolicy,
    status: Rc<LoopStatus>,
}

impl<S: FrameScheduler + ?Sized + 'static> RunLoop<S> {
    /// Creates a run-loop driven by `scheduler`, timed by the OS monotonic
    /// clock, reporting startup through the log and halting on tick failure.
    pub fn new(scheduler: Rc<S>) -> Self {
        Self {
            scheduler,
            clock: Box::new(MonotonicClock::new()),
            observer: Box::new(LogStartupReporter),
            policy: TickFailurePolicy::default(),
            status: Rc::new(LoopStatus::default()),
        }
    }

    /// Replaces the clock used for the startup measurement.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the receiver of the startup measurement.
    pub fn with_observer(mut self, observer: impl StartupObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Sets what happens after a failing tick.
    pub fn with_failure_policy(mut self, policy: TickFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// A view of this loop's progress that outlives the loop itself.
    pub fn monitor(&self) -> RunLoopMonitor {
        RunLoopMonitor::new(Rc::clone(&self.status))
    }

    /// Waits for the module, then [`start`](Self::start)s it.
    ///
    /// This is the only point where the run-loop suspends.
    pub async fn boot<F>(self, acquisition: F) -> Result<(), RunLoopError>
    where
        F: Future<Output = Result<ModuleHandle, ModuleLoadError>>,
    {
        match acquisition.await {
            Ok(module) => self.start(module),
            Err(err) => {
                self.status
                    .transition(RunLoopState::Failed(LoopFailure::ModuleLoad));
                Err(err.into())
            }
        }
    }

    /// Initializes the module and requests the first frame.
    ///
    /// Returns once the loop is `Running`; ticks happen later, from the
    /// host's frame callbacks.
    pub fn start(self, mut module: ModuleHandle) -> Result<(), RunLoopError> {
        self.status.transition(RunLoopState::Initializing);

        let before = self.clock.now();
        let initialized = module.init();
        let after = self.clock.now();

        if let Err(source) = initialized {
            self.status
                .transition(RunLoopState::Failed(LoopFailure::Initialization));
            return Err(RunLoopError::Initialization {
                module: module.name().to_string(),
                source,
            });
        }

        let timing = StartupTiming::new(before, after);
        self.observer.startup_completed(module.name(), &timing);
        self.status.transition(RunLoopState::Running);

        FrameLoop {
            module,
            scheduler: self.scheduler,
            policy: self.policy,
            status: self.status,
        }
        .request_next();
        Ok(())
    }
}

/// The state carried from one frame callback to the next.
struct FrameLoop<S: FrameScheduler + ?Sized + 'static> {
    module: ModuleHandle,
    scheduler: Rc<S>,
    policy: TickFailurePolicy,
    status: Rc<LoopStatus>,
}

impl<S: FrameScheduler + ?Sized + 'static> FrameLoop<S> {
    fn request_next(self) {
        let scheduler = Rc::clone(&self.scheduler);
        let token = scheduler.request_frame(Box::new(move || self.on_frame()));
        log::trace!("Run-loop: frame {token} requested");
    }

    fn on_frame(mut self) -> FrameResult {
        let frame = self.status.begin_tick();

        match self.module.tick() {
            Ok(()) => {
                self.request_next();
                Ok(())
            }
            Err(source) => {
                self.status.record_failed_tick();
                match self.policy {
                    TickFailurePolicy::Halt => {
                        self.status.transition(RunLoopState::Halted);
                        Err(FrameError::Tick { frame, source })
                    }
                    TickFailurePolicy::SkipAndContinue => {
                        log::warn!(
                            "Tick {} of '{}' failed, continuing: {}",
                            frame,
                            self.module.name(),
                            source
                        );
                        self.request_next();
                        Ok(())
                    }
                }
            }
        }
    }
}

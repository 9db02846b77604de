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

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Which stage stopped the run-loop before it reached `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopFailure {
    /// The module could not be acquired.
    ModuleLoad,
    /// The module's `init` failed.
    Initialization,
}

/// Lifecycle of a run-loop.
///
/// `AwaitingModule → Initializing → Running` is the only forward path.
/// `Running` lasts until the host tears the process down, unless a tick fails
/// under [`TickFailurePolicy::Halt`](super::TickFailurePolicy::Halt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunLoopState {
    /// Waiting for the loader to resolve.
    #[default]
    AwaitingModule,
    /// `init` is executing.
    Initializing,
    /// Ticking once per frame.
    Running,
    /// A tick failed and no further frame was requested.
    Halted,
    /// The loop never started.
    Failed(LoopFailure),
}

impl RunLoopState {
    /// Whether this state can be entered from `self`.
    pub fn can_transition_to(self, next: RunLoopState) -> bool {
        use RunLoopState::*;
        matches!(
            (self, next),
            (AwaitingModule, Initializing)
                | (AwaitingModule, Failed(LoopFailure::ModuleLoad))
                | (Initializing, Running)
                | (Initializing, Failed(LoopFailure::Initialization))
                | (Running, Halted)
        )
    }
}

impl fmt::Display for RunLoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunLoopState::AwaitingModule => write!(f, "awaiting module"),
            RunLoopState::Initializing => write!(f, "initializing"),
            RunLoopState::Running => write!(f, "running"),
            RunLoopState::Halted => write!(f, "halted"),
            RunLoopState::Failed(LoopFailure::ModuleLoad) => write!(f, "failed (module load)"),
            RunLoopState::Failed(LoopFailure::Initialization) => {
                write!(f, "failed (initialization)")
            }
        }
    }
}

/// Mutable status shared between the run-loop and its monitors.
#[derive(Debug, Default)]
pub(crate) struct LoopStatus {
    state: Cell<RunLoopState>,
    ticks: Cell<u64>,
    failed_ticks: Cell<u64>,
}

impl LoopStatus {
    pub(crate) fn transition(&self, next: RunLoopState) {
        let current = self.state.get();
        debug_assert!(
            current.can_transition_to(next),
            "invalid run-loop transition {current} -> {next}"
        );
        log::debug!("Run-loop: {current} -> {next}");
        self.state.set(next);
    }

    /// Counts a tick invocation and returns its 1-based index.
    pub(crate) fn begin_tick(&self) -> u64 {
        let index = self.ticks.get() + 1;
        self.ticks.set(index);
        index
    }

    pub(crate) fn record_failed_tick(&self) {
        self.failed_ticks.set(self.failed_ticks.get() + 1);
    }
}

/// A read-only view of a run-loop's progress.
///
/// Monitors observe; nothing they report feeds back into scheduling.
#[derive(Debug, Clone)]
pub struct RunLoopMonitor {
    status: Rc<LoopStatus>,
}

impl RunLoopMonitor {
    pub(crate) fn new(status: Rc<LoopStatus>) -> Self {
        Self { status }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> RunLoopState {
        self.status.state.get()
    }

    /// `true` while the loop is ticking.
    pub fn is_running(&self) -> bool {
        self.state() == RunLoopState::Running
    }

    /// Number of tick invocations so far, failed ones included.
    pub fn ticks(&self) -> u64 {
        self.status.ticks.get()
    }

    /// Number of ticks that raised an error.
    pub fn failed_ticks(&self) -> u64 {
        self.status.failed_ticks.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path_is_allowed() {
        use RunLoopState::*;
        assert!(AwaitingModule.can_transition_to(Initializing));
        assert!(Initializing.can_transition_to(Running));
        assert!(Running.can_transition_to(Halted));
    }

    #[test]
    fn test_skipping_or_reversing_is_rejected() {
        use RunLoopState::*;
        assert!(!AwaitingModule.can_transition_to(Running));
        assert!(!Running.can_transition_to(Initializing));
        assert!(!Initializing.can_transition_to(Failed(LoopFailure::ModuleLoad)));
        assert!(!Failed(LoopFailure::ModuleLoad).can_transition_to(Initializing));
        assert!(!Halted.can_transition_to(Running));
    }

    #[test]
    fn test_monitor_reflects_status() {
        let status = Rc::new(LoopStatus::default());
        let monitor = RunLoopMonitor::new(Rc::clone(&status));
        assert_eq!(monitor.state(), RunLoopState::AwaitingModule);

        status.transition(RunLoopState::Initializing);
        status.transition(RunLoopState::Running);
        assert!(monitor.is_running());

        assert_eq!(status.begin_tick(), 1);
        assert_eq!(status.begin_tick(), 2);
        status.record_failed_tick();
        assert_eq!(monitor.ticks(), 2);
        assert_eq!(monitor.failed_ticks(), 1);
    }
}

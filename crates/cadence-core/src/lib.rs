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

//! # Cadence Core
//!
//! Foundational crate containing the contracts shared by every layer of the
//! host: the compute-module capability set, the host frame-scheduling
//! primitive, and the timing sources used to measure startup.

#![warn(missing_docs)]

pub mod frame;
pub mod module;
pub mod timing;

#[doc(hidden)]
pub use inventory;

pub use frame::{FrameCallback, FrameError, FrameResult, FrameScheduler, FrameToken};
pub use module::{
    ComputeModule, ModuleError, ModuleLoadError, ModuleRegistration, ModuleSource,
};
pub use timing::{
    Clock, LogStartupReporter, ManualClock, MonotonicClock, StartupObserver, StartupTiming,
    Stopwatch,
};

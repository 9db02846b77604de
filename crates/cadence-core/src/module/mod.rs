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

//! The compute-module capability set and the ways a host obtains one.
//!
//! A compute module is built separately and owns all of the real work
//! (simulation, rendering, ...). The host only ever sees two entry points:
//! a one-time [`init`](ComputeModule::init) and a per-frame
//! [`tick`](ComputeModule::tick).

pub mod registry;
pub mod source;

pub use registry::ModuleRegistration;
pub use source::{ModuleLoadError, ModuleSource};

/// The error type raised by a compute module's entry points.
///
/// Modules are free to fail with any error type; the host only needs to
/// display it and hand it on, so it is boxed. The error must be thread-safe
/// because modules may be constructed on a worker thread.
pub type ModuleError = Box<dyn std::error::Error + Send + Sync>;

/// The two capabilities a compute module exposes to the host.
///
/// Both calls are synchronous, run-to-completion units from the host's point
/// of view: the run-loop never invokes a second call while one is in flight.
///
/// # Example
///
/// ```rust
/// use cadence_core::{ComputeModule, ModuleError};
///
/// struct Counter { frames: u64 }
///
/// impl ComputeModule for Counter {
///     fn init(&mut self) -> Result<(), ModuleError> {
///         self.frames = 0;
///         Ok(())
///     }
///
///     fn tick(&mut self) -> Result<(), ModuleError> {
///         self.frames += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait ComputeModule: Send + 'static {
    /// Called exactly once, before the first tick.
    fn init(&mut self) -> Result<(), ModuleError>;

    /// Called once per display refresh to perform one unit of work.
    fn tick(&mut self) -> Result<(), ModuleError>;

    /// A human-readable name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}


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

//! # Cadence Runtime
//!
//! Sequences a compute module's lifecycle: acquire it asynchronously, run its
//! one-time initialization with a startup measurement, then tick it once per
//! host frame, forever.
//!
//! ```rust,ignore
//! let host = Rc::new(ManualFrameHost::new());
//! let run_loop = RunLoop::new(Rc::clone(&host));
//! run_loop.boot(ModuleLoader::new(source).acquire()).await?;
//! host.fire_frame();
//! ```

#![warn(missing_docs)]

pub mod host;
pub mod loader;
pub mod run_loop;

pub use host::{FrameOutcome, FrameQueue, ManualFrameHost};
pub use loader::{ModuleHandle, ModuleLoader};
pub use run_loop::{
    LoopFailure, RunLoop, RunLoopError, RunLoopMonitor, RunLoopState, TickFailurePolicy,
};

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

//! # Cadence Infra
//!
//! Concrete implementations of the host-facing contracts: frame hosts that
//! turn a display (or a stand-in for one) into [`FrameScheduler`] callbacks,
//! and module sources that produce the compute module.
//!
//! [`FrameScheduler`]: cadence_core::FrameScheduler

#![warn(missing_docs)]

pub mod paced;
#[cfg(not(target_arch = "wasm32"))]
pub mod registry_source;
pub mod summary;
#[cfg(target_arch = "wasm32")]
pub mod web;
#[cfg(feature = "window")]
pub mod window;

pub use paced::PacedFrameHost;
#[cfg(not(target_arch = "wasm32"))]
pub use registry_source::RegistryModuleSource;
pub use summary::{HostExit, HostSummary};
#[cfg(target_arch = "wasm32")]
pub use web::{AnimationFrameScheduler, PerformanceClock, WebHostError};
#[cfg(feature = "window")]
pub use window::{WindowHostError, WinitFrameHost};

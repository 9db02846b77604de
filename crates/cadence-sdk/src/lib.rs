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

//! # Cadence SDK
//!
//! The public-facing API for running a compute module: load a
//! [`HostConfig`], hand it to a [`Host`] and call [`Host::run`].
//!
//! Compute modules implement [`ComputeModule`] and make themselves known to
//! the host with [`register_module!`].

#![warn(missing_docs)]

pub mod config;
pub mod host;

pub use config::{ConfigError, FrameBackend, HostConfig, WindowConfig, DEFAULT_MODULE};
pub use host::{Host, SessionReport};

pub use cadence_core::{register_module, ComputeModule, ModuleError};
pub use cadence_infra::{HostExit, HostSummary};
pub use cadence_runtime::{LoopFailure, RunLoopState, TickFailurePolicy};

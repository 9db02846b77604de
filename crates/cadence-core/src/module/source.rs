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

//! Asynchronous acquisition of a compute module.

use super::{ComputeModule, ModuleError};
use async_trait::async_trait;
use thiserror::Error;

/// Why the host could not obtain its compute module.
#[derive(Debug, Error)]
pub enum ModuleLoadError {
    /// No module is available under the configured name.
    #[error("no compute module named '{name}' (available: {available:?})")]
    NotFound {
        /// The name that was requested.
        name: String,
        /// The names that could have been requested instead.
        available: Vec<&'static str>,
    },
    /// The module was found but refused to come up (bad artifact, failed
    /// constructor, ...).
    #[error("compute module '{name}' was rejected: {source}")]
    Rejected {
        /// The module that failed.
        name: String,
        /// The underlying failure.
        #[source]
        source: ModuleError,
    },
    /// The acquisition task itself went away before producing a module.
    #[error("compute module acquisition aborted: {0}")]
    Aborted(String),
}

/// Where a compute module comes from.
///
/// Acquisition may take arbitrarily long (I/O, compilation, ...) and must not
/// block the host context while it does, hence the async contract. A source
/// is asked at most once per process.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    /// A short description of the location, used in logs.
    fn describe(&self) -> String;

    /// Produces a fresh, uninitialized module.
    async fn acquire(&self) -> Result<Box<dyn ComputeModule>, ModuleLoadError>;
}

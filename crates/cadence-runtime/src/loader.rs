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

//! Acquisition of the single compute module a host session runs.

use cadence_core::{ComputeModule, ModuleError, ModuleLoadError, ModuleSource, Stopwatch};
use std::fmt;

/// Exclusive ownership of the loaded compute module.
///
/// A handle only comes out of [`ModuleLoader::acquire`] and cannot be
/// cloned; the run-loop moves it from one frame callback to the next.
pub struct ModuleHandle {
    module: Box<dyn ComputeModule>,
}

impl ModuleHandle {
    pub(crate) fn new(module: Box<dyn ComputeModule>) -> Self {
        Self { module }
    }

    /// The module's diagnostic name.
    pub fn name(&self) -> &str {
        self.module.name()
    }

    pub(crate) fn init(&mut self) -> Result<(), ModuleError> {
        self.module.init()
    }

    pub(crate) fn tick(&mut self) -> Result<(), ModuleError> {
        self.module.tick()
    }
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("module", &self.name())
            .finish()
    }
}

/// Obtains the compute module from its source without blocking the host.
///
/// [`acquire`](Self::acquire) consumes the loader, so a session acquires its
/// module exactly once. Nothing is cached and failures are not retried.
pub struct ModuleLoader {
    source: Box<dyn ModuleSource>,
}

impl ModuleLoader {
    /// Creates a loader for the given source.
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Creates a loader for an already boxed source.
    pub fn from_boxed(source: Box<dyn ModuleSource>) -> Self {
        Self { source }
    }

    /// Resolves to the module handle, or to the reason it is unavailable.
    pub async fn acquire(self) -> Result<ModuleHandle, ModuleLoadError> {
        let location = self.source.describe();
        log::debug!("Acquiring compute module from {location}...");

        let stopwatch = Stopwatch::start();
        let module = self.source.acquire().await?;
        log::debug!(
            "Compute module '{}' acquired from {} in {:.3} ms",
            module.name(),
            location,
            stopwatch.elapsed_ms_f64()
        );

        Ok(ModuleHandle::new(module))
    }
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("source", &self.source.describe())
            .finish()
    }
}

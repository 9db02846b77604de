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

//! Acquires a compute module registered at link time.

use async_trait::async_trait;
use cadence_core::{ComputeModule, ModuleLoadError, ModuleRegistration, ModuleSource};

/// Looks a module up by its registered name and constructs it on a blocking
/// worker, so an expensive constructor never stalls the host context.
///
/// Requires a running tokio runtime.
#[derive(Debug, Clone)]
pub struct RegistryModuleSource {
    name: String,
}

impl RegistryModuleSource {
    /// Creates a source for the module registered under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The registered name this source resolves.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ModuleSource for RegistryModuleSource {
    fn describe(&self) -> String {
        format!("module registry entry '{}'", self.name)
    }

    async fn acquire(&self) -> Result<Box<dyn ComputeModule>, ModuleLoadError> {
        let registration =
            ModuleRegistration::find(&self.name).ok_or_else(|| ModuleLoadError::NotFound {
                name: self.name.clone(),
                available: ModuleRegistration::names(),
            })?;

        tokio::task::spawn_blocking(move || registration.construct())
            .await
            .map_err(|err| ModuleLoadError::Aborted(err.to_string()))?
            .map_err(|source| ModuleLoadError::Rejected {
                name: self.name.clone(),
                source,
            })
    }
}

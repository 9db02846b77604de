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

//! Link-time registration of compute modules.
//!
//! Modules register a constructor under a stable name with
//! [`register_module!`](crate::register_module). The host resolves the name it
//! was configured with at startup; no module is constructed before that.

use super::{ComputeModule, ModuleError};

/// Builds a fresh, uninitialized instance of a compute module.
pub type ModuleConstructor = fn() -> Result<Box<dyn ComputeModule>, ModuleError>;

/// A named compute-module constructor collected at link time.
#[derive(Debug)]
pub struct ModuleRegistration {
    name: &'static str,
    construct: ModuleConstructor,
}

inventory::collect!(ModuleRegistration);

impl ModuleRegistration {
    /// Creates a registration entry. Usable in `const` context so it can be
    /// handed to `inventory::submit!`.
    pub const fn new(name: &'static str, construct: ModuleConstructor) -> Self {
        Self { name, construct }
    }

    /// The name this module is registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the registered constructor.
    pub fn construct(&self) -> Result<Box<dyn ComputeModule>, ModuleError> {
        (self.construct)()
    }

    /// Looks up a registration by name.
    pub fn find(name: &str) -> Option<&'static ModuleRegistration> {
        inventory::iter::<ModuleRegistration>
            .into_iter()
            .find(|registration| registration.name == name)
    }

    /// Returns the names of every registered module, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = inventory::iter::<ModuleRegistration>
            .into_iter()
            .map(|registration| registration.name)
            .collect();
        names.sort_unstable();
        names
    }
}

/// Registers a compute module constructor under a name.
///
/// ```rust,ignore
/// fn build_life() -> Result<Box<dyn ComputeModule>, ModuleError> {
///     Ok(Box::new(Life::new(64, 48)?))
/// }
///
/// cadence_core::register_module!("life", build_life);
/// ```
#[macro_export]
macro_rules! register_module {
    ($name:expr, $construct:expr) => {
        $crate::inventory::submit! {
            $crate::ModuleRegistration::new($name, $construct)
        }
    };
}

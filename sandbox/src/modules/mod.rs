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

//! Demo compute modules, registered with the host at link time.

mod life;
mod pulse;

use cadence_sdk::{register_module, ComputeModule, ModuleError};
use life::Life;
use pulse::Pulse;

fn build_life() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(Life::new(64, 48)?))
}

fn build_pulse() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(Pulse::new(60)))
}

register_module!("life", build_life);
register_module!("pulse", build_pulse);

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

//! A heartbeat: logs a sine-wave level once per period.

use cadence_sdk::{ComputeModule, ModuleError};
use std::f64::consts::TAU;

/// Oscillates with a period of `period` ticks and reports the peak level
/// reached during each period.
#[derive(Debug, Clone)]
pub struct Pulse {
    period: u64,
    tick: u64,
    peak: f64,
}

impl Pulse {
    /// Creates a pulse. A period of zero is treated as one.
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(1),
            tick: 0,
            peak: 0.0,
        }
    }

    /// Current level, in `[0, 1]`.
    pub fn level(&self) -> f64 {
        let phase = (self.tick % self.period) as f64 / self.period as f64;
        0.5 - 0.5 * (phase * TAU).cos()
    }
}

impl ComputeModule for Pulse {
    fn init(&mut self) -> Result<(), ModuleError> {
        log::info!("Pulse armed with a period of {} ticks", self.period);
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ModuleError> {
        self.tick += 1;
        self.peak = self.peak.max(self.level());
        if self.tick % self.period == 0 {
            log::info!("Pulse {}: peak level {:.2}", self.tick / self.period, self.peak);
            self.peak = 0.0;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "pulse"
    }
}

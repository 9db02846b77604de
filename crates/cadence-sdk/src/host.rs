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

//! The `Host` facade: one compute module, one frame host, one session.

use crate::config::{FrameBackend, HostConfig};
use anyhow::{Context, Result};
use cadence_core::FrameScheduler;
use cadence_infra::{HostSummary, PacedFrameHost, RegistryModuleSource};
use cadence_runtime::{ModuleLoader, RunLoop, RunLoopMonitor, RunLoopState};
use std::rc::Rc;
use tokio::runtime::Runtime;

/// What happened during one host session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Name of the compute module that ran.
    pub module: String,
    /// Frame host totals.
    pub summary: HostSummary,
    /// Run-loop state when the host stopped.
    pub state: RunLoopState,
    /// Tick invocations, failed ones included.
    pub ticks: u64,
    /// Ticks that returned an error.
    pub failed_ticks: u64,
}

impl SessionReport {
    /// `true` if no tick failed and no frame callback errored.
    pub fn is_clean(&self) -> bool {
        self.failed_ticks == 0 && self.summary.callback_errors == 0
    }
}

/// Runs the configured compute module inside the configured frame host.
#[derive(Debug, Clone)]
pub struct Host {
    config: HostConfig,
}

impl Host {
    /// Creates a host for `config`.
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    /// The configuration this host runs with.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Acquires the module, initializes it and drives frames until the frame
    /// host stops.
    ///
    /// Fails if the module cannot be acquired or initialized. A halting tick
    /// is not an error here; it shows up in the returned report.
    pub fn run(&self) -> Result<SessionReport> {
        self.config.validate()?;

        log::info!(
            "Starting host session: module '{}', {:?} backend at {} Hz",
            self.config.module,
            self.config.backend,
            self.config.refresh_rate_hz
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("cadence-loader")
            .build()
            .context("failed to build the module loader runtime")?;

        match self.config.backend {
            FrameBackend::Paced => {
                let host = Rc::new(
                    PacedFrameHost::new(self.config.refresh_rate_hz)
                        .with_max_frames(self.config.max_frames),
                );
                let monitor = self.boot(&runtime, Rc::clone(&host))?;
                Ok(self.report(host.run(), &monitor))
            }
            FrameBackend::Window => self.run_window(&runtime),
        }
    }

    #[cfg(feature = "window")]
    fn run_window(&self, runtime: &Runtime) -> Result<SessionReport> {
        use cadence_infra::WinitFrameHost;

        let window = &self.config.window;
        let host = Rc::new(
            WinitFrameHost::new()
                .with_title(window.title.clone())
                .with_dimensions(window.width, window.height)
                .with_refresh_rate(self.config.refresh_rate_hz)
                .with_max_frames(self.config.max_frames),
        );
        let monitor = self.boot(runtime, Rc::clone(&host))?;
        let summary = host.run().context("window frame host failed")?;
        Ok(self.report(summary, &monitor))
    }

    #[cfg(not(feature = "window"))]
    fn run_window(&self, _runtime: &Runtime) -> Result<SessionReport> {
        anyhow::bail!("the window backend is unavailable: built without the `window` feature")
    }

    /// Drives acquisition to completion and registers the first frame.
    fn boot<S: FrameScheduler + 'static>(
        &self,
        runtime: &Runtime,
        scheduler: Rc<S>,
    ) -> Result<RunLoopMonitor> {
        let run_loop = RunLoop::new(scheduler).with_failure_policy(self.config.tick_failure);
        let monitor = run_loop.monitor();
        let loader = ModuleLoader::new(RegistryModuleSource::new(self.config.module.clone()));

        runtime
            .block_on(run_loop.boot(loader.acquire()))
            .with_context(|| format!("compute module '{}' failed to start", self.config.module))?;
        Ok(monitor)
    }

    fn report(&self, summary: HostSummary, monitor: &RunLoopMonitor) -> SessionReport {
        let report = SessionReport {
            module: self.config.module.clone(),
            summary,
            state: monitor.state(),
            ticks: monitor.ticks(),
            failed_ticks: monitor.failed_ticks(),
        };
        log::info!(
            "Host session ended: {} ticks ({} failed), run-loop {}",
            report.ticks,
            report.failed_ticks,
            report.state
        );
        report
    }
}

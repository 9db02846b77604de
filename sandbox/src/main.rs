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

// Cadence Sandbox
// Runs one of the demo compute modules inside a frame host.

mod modules;

use anyhow::{bail, Result};
use cadence_sdk::{FrameBackend, Host, HostConfig, RunLoopState, TickFailurePolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The config shipped next to the sandbox sources.
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/cadence.json");

/// Module run when no config file names one.
const DEFAULT_MODULE: &str = "life";

#[derive(Debug, Parser)]
#[command(name = "sandbox", about = "Run a demo compute module once per frame")]
struct Cli {
    /// Path to the JSON host configuration.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Registered compute module to run.
    #[arg(long)]
    module: Option<String>,

    /// Frame host to run in.
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Stop the host after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Refresh rate of the frame host, in Hz.
    #[arg(long)]
    refresh_rate: Option<u32>,

    /// What to do when a tick fails.
    #[arg(long, value_enum)]
    tick_failure: Option<TickFailureArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Paced,
    Window,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TickFailureArg {
    Halt,
    Skip,
}

impl Cli {
    /// Loads the config file, then lets command-line flags override it.
    fn host_config(&self) -> Result<HostConfig> {
        let fallback = HostConfig {
            module: DEFAULT_MODULE.to_string(),
            ..HostConfig::default()
        };
        let mut config = HostConfig::load_or(&self.config, fallback)?;

        if let Some(module) = &self.module {
            config.module = module.clone();
        }
        if let Some(backend) = self.backend {
            config.backend = match backend {
                BackendArg::Paced => FrameBackend::Paced,
                BackendArg::Window => FrameBackend::Window,
            };
        }
        if let Some(frames) = self.frames {
            config.max_frames = Some(frames);
        }
        if let Some(rate) = self.refresh_rate {
            config.refresh_rate_hz = rate;
        }
        if let Some(policy) = self.tick_failure {
            config.tick_failure = match policy {
                TickFailureArg::Halt => TickFailurePolicy::Halt,
                TickFailureArg::Skip => TickFailurePolicy::SkipAndContinue,
            };
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("winit", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let report = Host::new(cli.host_config()?).run()?;

    if report.state == RunLoopState::Halted {
        bail!(
            "compute module '{}' halted after {} ticks",
            report.module,
            report.ticks
        );
    }
    Ok(())
}

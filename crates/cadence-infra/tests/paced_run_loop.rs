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

use cadence_core::{ComputeModule, ModuleError};
use cadence_infra::{HostExit, PacedFrameHost, RegistryModuleSource};
use cadence_runtime::{ModuleLoader, RunLoop, RunLoopState, TickFailurePolicy};
use std::rc::Rc;

// --- DUMMY MODULE FOR THIS TEST ---
// Fails every fourth tick.
struct Flaky {
    ticks: u64,
}

impl ComputeModule for Flaky {
    fn init(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ModuleError> {
        self.ticks += 1;
        if self.ticks % 4 == 0 {
            return Err(format!("tick {} lost its state", self.ticks).into());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn build_flaky() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(Flaky { ticks: 0 }))
}

cadence_core::register_module!("paced-test-flaky", build_flaky);

#[tokio::test]
async fn test_halting_loop_leaves_paced_host_idle() {
    let host = Rc::new(PacedFrameHost::new(1000));
    let run_loop = RunLoop::new(Rc::clone(&host));
    let monitor = run_loop.monitor();

    let loader = ModuleLoader::new(RegistryModuleSource::new("paced-test-flaky"));
    run_loop.boot(loader.acquire()).await.expect("boot should succeed");

    let summary = host.run();

    assert_eq!(summary.frames, 4);
    assert_eq!(summary.callback_errors, 1);
    assert_eq!(summary.exit, HostExit::Idle);
    assert_eq!(monitor.state(), RunLoopState::Halted);
    assert_eq!(monitor.ticks(), 4);
}

#[tokio::test]
async fn test_skipping_loop_runs_until_frame_limit() {
    let host = Rc::new(PacedFrameHost::new(1000).with_max_frames(Some(10)));
    let run_loop = RunLoop::new(Rc::clone(&host))
        .with_failure_policy(TickFailurePolicy::SkipAndContinue);
    let monitor = run_loop.monitor();

    let loader = ModuleLoader::new(RegistryModuleSource::new("paced-test-flaky"));
    run_loop.boot(loader.acquire()).await.unwrap();

    let summary = host.run();

    assert_eq!(summary.frames, 10);
    assert_eq!(summary.callback_errors, 0, "skipped failures never reach the host");
    assert_eq!(summary.exit, HostExit::FrameLimit);
    assert_eq!(monitor.ticks(), 10);
    assert_eq!(monitor.failed_ticks(), 2);
    assert!(monitor.is_running());
}

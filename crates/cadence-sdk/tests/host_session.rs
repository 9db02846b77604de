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

use cadence_sdk::{
    register_module, ComputeModule, FrameBackend, Host, HostConfig, HostExit, ModuleError,
    RunLoopState, TickFailurePolicy,
};

// --- DUMMY MODULES FOR THIS TEST ---
struct Counter {
    ticks: u64,
    fail_at: Option<u64>,
}

impl ComputeModule for Counter {
    fn init(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ModuleError> {
        self.ticks += 1;
        if self.fail_at == Some(self.ticks) {
            return Err("counter overflowed".into());
        }
        Ok(())
    }
}

struct BrokenInit;

impl ComputeModule for BrokenInit {
    fn init(&mut self) -> Result<(), ModuleError> {
        Err("missing shader cache".into())
    }

    fn tick(&mut self) -> Result<(), ModuleError> {
        unreachable!("tick must never run after a failed init")
    }
}

fn build_counter() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(Counter {
        ticks: 0,
        fail_at: None,
    }))
}

fn build_failing_counter() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(Counter {
        ticks: 0,
        fail_at: Some(3),
    }))
}

fn build_broken_init() -> Result<Box<dyn ComputeModule>, ModuleError> {
    Ok(Box::new(BrokenInit))
}

register_module!("sdk-test-counter", build_counter);
register_module!("sdk-test-fails-at-3", build_failing_counter);
register_module!("sdk-test-broken-init", build_broken_init);

fn paced_config(module: &str) -> HostConfig {
    HostConfig {
        module: module.to_string(),
        backend: FrameBackend::Paced,
        refresh_rate_hz: 1000,
        max_frames: Some(5),
        ..HostConfig::default()
    }
}

#[test]
fn test_session_runs_until_frame_limit() {
    // --- 1. ARRANGE ---
    let host = Host::new(paced_config("sdk-test-counter"));

    // --- 2. ACT ---
    let report = host.run().expect("session should start");

    // --- 3. ASSERT ---
    assert_eq!(report.module, "sdk-test-counter");
    assert_eq!(report.summary.frames, 5);
    assert_eq!(report.summary.exit, HostExit::FrameLimit);
    assert_eq!(report.ticks, 5);
    assert_eq!(report.state, RunLoopState::Running);
    assert!(report.is_clean());
}

#[test]
fn test_halting_tick_ends_session_early() {
    let host = Host::new(paced_config("sdk-test-fails-at-3"));

    let report = host.run().expect("session should start");

    assert_eq!(report.summary.frames, 3);
    assert_eq!(report.summary.callback_errors, 1);
    assert_eq!(report.summary.exit, HostExit::Idle);
    assert_eq!(report.state, RunLoopState::Halted);
    assert!(!report.is_clean());
}

#[test]
fn test_skipping_tick_failures_keeps_session_alive() {
    let host = Host::new(HostConfig {
        tick_failure: TickFailurePolicy::SkipAndContinue,
        ..paced_config("sdk-test-fails-at-3")
    });

    let report = host.run().expect("session should start");

    assert_eq!(report.summary.frames, 5);
    assert_eq!(report.summary.callback_errors, 0);
    assert_eq!(report.failed_ticks, 1);
    assert_eq!(report.state, RunLoopState::Running);
}

#[test]
fn test_unknown_module_fails_to_start() {
    let host = Host::new(paced_config("sdk-test-does-not-exist"));

    let err = host.run().expect_err("an unregistered module must not start");

    let message = format!("{err:#}");
    assert!(message.contains("sdk-test-does-not-exist"), "{message}");
    assert!(message.contains("sdk-test-counter"), "{message}");
}

#[test]
fn test_failed_init_fails_to_start() {
    let host = Host::new(paced_config("sdk-test-broken-init"));

    let err = host.run().expect_err("a failing init must not start the loop");

    let message = format!("{err:#}");
    assert!(message.contains("sdk-test-broken-init"), "{message}");
    assert!(message.contains("missing shader cache"), "{message}");
}

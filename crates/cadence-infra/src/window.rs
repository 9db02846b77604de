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

//! A `winit`-based frame host: frames follow the window's redraw cycle.

use crate::summary::{discard_pending, report_outcomes, HostExit, HostSummary};
use cadence_core::{FrameCallback, FrameScheduler, FrameToken};
use cadence_runtime::FrameQueue;
use std::cell::Cell;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Errors raised while bringing up or running the window.
#[derive(Debug, Error)]
pub enum WindowHostError {
    /// The platform event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
}

/// A frame host that opens one window and runs pending callbacks whenever
/// that window is redrawn, at most once per refresh interval.
#[derive(Debug)]
pub struct WinitFrameHost {
    queue: FrameQueue,
    title: String,
    width: u32,
    height: u32,
    interval: Duration,
    max_frames: Option<u64>,
    frames: Cell<u64>,
}

impl WinitFrameHost {
    /// Creates a host with default window settings, refreshing at 60 Hz.
    pub fn new() -> Self {
        Self {
            queue: FrameQueue::new(),
            title: "Cadence".to_string(),
            width: 1024,
            height: 768,
            interval: Duration::from_secs(1) / 60,
            max_frames: None,
            frames: Cell::new(0),
        }
    }

    /// Sets the title of the window.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Caps the refresh rate. A rate of zero is treated as one.
    pub fn with_refresh_rate(mut self, refresh_rate_hz: u32) -> Self {
        self.interval = Duration::from_secs(1) / refresh_rate_hz.max(1);
        self
    }

    /// Closes the window after `limit` frames. `None` keeps it open until
    /// nothing is pending or the user closes it.
    pub fn with_max_frames(mut self, limit: Option<u64>) -> Self {
        self.max_frames = limit;
        self
    }

    /// Opens the window and drives frames until it closes.
    ///
    /// Must be called from the main thread on platforms that require it.
    pub fn run(&self) -> Result<HostSummary, WindowHostError> {
        let event_loop = EventLoop::new()?;
        let mut driver = WindowDriver {
            host: self,
            window: None,
            next_frame: Instant::now(),
            callback_errors: 0,
            exit: None,
            error: None,
        };
        event_loop.run_app(&mut driver)?;

        if let Some(err) = driver.error {
            return Err(err);
        }

        let summary = HostSummary {
            frames: self.frames.get(),
            callback_errors: driver.callback_errors,
            exit: driver.exit.unwrap_or(HostExit::Closed),
        };
        log::info!(
            "Window frame host stopped after {} frames: {}",
            summary.frames,
            summary.exit
        );
        Ok(summary)
    }
}

impl Default for WinitFrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for WinitFrameHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        self.queue.request_frame(callback)
    }
}

/// Event-loop state for one [`WinitFrameHost::run`] call.
struct WindowDriver<'a> {
    host: &'a WinitFrameHost,
    window: Option<Window>,
    next_frame: Instant,
    callback_errors: u64,
    exit: Option<HostExit>,
    error: Option<WindowHostError>,
}

impl WindowDriver<'_> {
    fn stop(&mut self, event_loop: &ActiveEventLoop, exit: HostExit) {
        self.exit.get_or_insert(exit);
        discard_pending(&self.host.queue);
        event_loop.exit();
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let host = self.host;
        if host.max_frames.is_some_and(|limit| host.frames.get() >= limit) {
            self.stop(event_loop, HostExit::FrameLimit);
            return;
        }

        host.frames.set(host.frames.get() + 1);
        self.callback_errors += report_outcomes(host.queue.run_frame());
        self.next_frame = Instant::now() + host.interval;

        if host.queue.is_idle() {
            self.stop(event_loop, HostExit::Idle);
        }
    }
}

impl ApplicationHandler for WindowDriver<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.host.title.clone())
            .with_inner_size(LogicalSize::new(self.host.width, self.host.height));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!(
                    "Window '{}' created ({}x{})",
                    self.host.title,
                    self.host.width,
                    self.host.height
                );
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Failed to create window: {err}");
                self.error = Some(err.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(Window::id) != Some(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting event loop...");
                self.stop(event_loop, HostExit::Closed);
            }
            WindowEvent::RedrawRequested => self.present(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        if self.host.queue.is_idle() {
            self.stop(event_loop, HostExit::Idle);
            return;
        }

        if Instant::now() >= self.next_frame {
            window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }
}

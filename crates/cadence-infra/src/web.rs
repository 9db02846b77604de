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

//! Browser host: `requestAnimationFrame` and `performance.now()`.

use cadence_core::{Clock, FrameCallback, FrameScheduler, FrameToken};
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Errors raised while binding to the browser environment.
#[derive(Debug, Error)]
pub enum WebHostError {
    /// Not running in a context with a `window` (e.g. a worker).
    #[error("no global `window` object")]
    NoWindow,
    /// `window.performance` is unavailable.
    #[error("no `window.performance` object")]
    NoPerformance,
}

/// Schedules frame callbacks with `window.requestAnimationFrame`.
///
/// An error returned by a callback is thrown as a JS exception, so it lands in
/// the browser's uncaught-error reporting like any other script failure.
#[derive(Debug)]
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
}

impl AnimationFrameScheduler {
    /// Binds to the global `window`.
    pub fn new() -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::NoWindow)?;
        Ok(Self { window })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let handler = Closure::once_into_js(move |_timestamp: f64| {
            if let Err(err) = callback() {
                wasm_bindgen::throw_str(&err.to_string());
            }
        });

        accept_frame_request(
            self.window
                .request_animation_frame(handler.unchecked_ref::<js_sys::Function>()),
        )
    }
}

/// Turns the browser's answer into a token. A refused request would end the
/// loop without a trace, so the refusal is thrown like a failing tick.
fn accept_frame_request(request: Result<i32, JsValue>) -> FrameToken {
    match request {
        Ok(id) => FrameToken::new(id as u64),
        Err(err) => {
            log::error!("requestAnimationFrame refused the frame callback: {err:?}");
            wasm_bindgen::throw_val(err)
        }
    }
}

/// A clock reading `performance.now()`.
#[derive(Debug)]
pub struct PerformanceClock {
    performance: web_sys::Performance,
}

impl PerformanceClock {
    /// Binds to `window.performance`.
    pub fn new() -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::NoWindow)?;
        let performance = window.performance().ok_or(WebHostError::NoPerformance)?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(self.performance.now().max(0.0) / 1000.0)
    }
}

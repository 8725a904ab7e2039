use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::{describe_js, DomError};

/// Something that can call a refresh callback on a fixed period.
pub trait RefreshScheduler {
    type Handle;

    fn schedule(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, DomError>;

    fn cancel(&self, handle: Self::Handle);
}

/// Schedules through the page's `window.setInterval`.
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn from_window() -> Result<Self, DomError> {
        web_sys::window().map(Self::new).ok_or(DomError::NoWindow)
    }
}

impl RefreshScheduler for WindowScheduler {
    type Handle = RefreshTimer;

    fn schedule(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<RefreshTimer, DomError> {
        RefreshTimer::start(&self.window, interval, callback)
    }

    fn cancel(&self, mut handle: RefreshTimer) {
        handle.stop();
    }
}

/// A `setInterval` registration that can be cancelled.
///
/// The callback closure is owned here so it stays alive while the browser
/// may still call it. Dropping the timer clears the interval.
pub struct RefreshTimer {
    window: Window,
    handle: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl RefreshTimer {
    pub fn start<F>(window: &Window, interval: Duration, callback: F) -> Result<Self, DomError>
    where
        F: FnMut() + 'static,
    {
        let millis = i32::try_from(interval.as_millis()).map_err(|_| DomError::Timer {
            message: format!("interval of {}ms is out of range", interval.as_millis()),
        })?;

        let callback = Closure::<dyn FnMut()>::new(callback);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref::<js_sys::Function>(),
                millis,
            )
            .map_err(|e| DomError::Timer {
                message: describe_js(&e),
            })?;

        log::debug!("interval {} registered every {}ms", handle, millis);
        Ok(Self {
            window: window.clone(),
            handle: Some(handle),
            _callback: callback,
        })
    }

    /// Clears the interval. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_interval_with_handle(handle);
            log::debug!("interval {} cleared", handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

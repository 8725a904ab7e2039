pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod parser;
pub mod timer;
pub mod updater;

#[cfg(test)]
pub(crate) mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use config::{parse_level, UpdaterConfig};
pub use document::{refresh_all, refresh_document, RefreshReport, TimeDisplayHost, TimedElement};
pub use error::{ConfigError, DomError, TimestampError};
pub use format::{compute_display, describe_elapsed, RelativeTime};
pub use parser::parse_timestamp;
pub use updater::RelativeTimeUpdater;

use logging::{init_logging, LoggingConfig};

thread_local! {
    // The updater started on page load; lives until the page goes away.
    static PAGE_UPDATER: RefCell<Option<RelativeTimeUpdater>> = const { RefCell::new(None) };
}

fn start_page_updater(config: UpdaterConfig) -> Result<(), DomError> {
    let mut updater = RelativeTimeUpdater::new(config);
    updater.try_start()?;
    PAGE_UPDATER.with(|slot| *slot.borrow_mut() = Some(updater));
    Ok(())
}

// `document.readyState` is "loading" until the parser finishes.
fn document_is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    let config = UpdaterConfig::default();
    init_logging(LoggingConfig {
        level: config.level_filter()?,
    });

    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;

    if document_is_loading(&document.ready_state()) {
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = start_page_updater(config) {
                log::error!("failed to start relative times: {} ({})", e, e.error_code());
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        start_page_updater(config)?;
    }
    Ok(())
}

/// Refreshes every `.relative-time` element once; returns how many changed.
#[wasm_bindgen(js_name = refreshRelativeTimes)]
pub fn refresh_relative_times() -> Result<u32, JsValue> {
    let report = refresh_document(&UpdaterConfig::default())?;
    Ok(report.updated as u32)
}

/// Stops the updater started on page load.
#[wasm_bindgen(js_name = stopRelativeTimes)]
pub fn stop_relative_times() {
    PAGE_UPDATER.with(|slot| {
        if let Some(mut updater) = slot.borrow_mut().take() {
            updater.stop();
        }
    });
}

/// Adjusts console verbosity at runtime (`"debug"`, `"warn"`, ...).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    init_logging(LoggingConfig {
        level: parse_level(level)?,
    });
    Ok(())
}

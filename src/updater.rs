use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use wasm_bindgen::prelude::*;

use crate::config::UpdaterConfig;
use crate::document::{refresh_all, RefreshReport, TimeDisplayHost, WebDocument};
use crate::error::DomError;
use crate::timer::{RefreshScheduler, WindowScheduler};

/// Refreshes a host once on start and then on every scheduler tick.
///
/// Starting while running is a no-op. Stopping, or dropping the updater,
/// cancels the scheduled refresh.
pub struct Updater<H, S: RefreshScheduler> {
    host: Rc<H>,
    scheduler: S,
    interval: Duration,
    handle: Option<S::Handle>,
}

impl<H, S> Updater<H, S>
where
    H: TimeDisplayHost + 'static,
    S: RefreshScheduler,
{
    pub fn new(host: H, scheduler: S, interval: Duration) -> Self {
        Self {
            host: Rc::new(host),
            scheduler,
            interval,
            handle: None,
        }
    }

    pub fn start(&mut self) -> Result<(), DomError> {
        if self.is_running() {
            log::debug!("relative time updater already running");
            return Ok(());
        }

        refresh_all(&*self.host, Utc::now())?;

        let host = Rc::clone(&self.host);
        let handle = self.scheduler.schedule(
            self.interval,
            Box::new(move || {
                if let Err(e) = refresh_all(&*host, Utc::now()) {
                    log::error!("relative time refresh failed: {} ({})", e, e.error_code());
                }
            }),
        )?;
        self.handle = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Runs a single refresh cycle without touching the schedule.
    pub fn refresh(&self) -> Result<RefreshReport, DomError> {
        refresh_all(&*self.host, Utc::now())
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl<H, S: RefreshScheduler> Drop for Updater<H, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Keeps a page's relative times current.
///
/// The JavaScript-facing updater: binds to `window.document` and
/// `window.setInterval` when started.
#[wasm_bindgen]
pub struct RelativeTimeUpdater {
    config: UpdaterConfig,
    page: Option<Updater<WebDocument, WindowScheduler>>,
}

impl RelativeTimeUpdater {
    pub fn new(config: UpdaterConfig) -> Self {
        Self { config, page: None }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    pub fn try_start(&mut self) -> Result<(), DomError> {
        if self.is_running() {
            log::debug!("relative time updater already running");
            return Ok(());
        }

        let document = WebDocument::from_window(&self.config)?;
        let scheduler = WindowScheduler::from_window()?;
        let mut page = Updater::new(document, scheduler, self.config.interval());
        page.start()?;
        self.page = Some(page);

        log::info!(
            "relative time updater started for '{}' every {}ms",
            self.config.selector,
            self.config.interval_ms
        );
        Ok(())
    }

    /// Runs a single refresh cycle without touching the timer.
    pub fn refresh_now(&self) -> Result<RefreshReport, DomError> {
        match &self.page {
            Some(page) => page.refresh(),
            None => {
                let document = WebDocument::from_window(&self.config)?;
                refresh_all(&document, Utc::now())
            }
        }
    }
}

#[wasm_bindgen]
impl RelativeTimeUpdater {
    #[wasm_bindgen(constructor)]
    pub fn from_options(options: JsValue) -> Result<RelativeTimeUpdater, JsValue> {
        Ok(Self::new(UpdaterConfig::from_js(options)?))
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.try_start().map_err(JsValue::from)
    }

    pub fn stop(&mut self) {
        if let Some(mut page) = self.page.take() {
            page.stop();
            log::info!("relative time updater stopped");
        }
    }

    /// Returns the number of elements rewritten.
    pub fn refresh(&self) -> Result<u32, JsValue> {
        let report = self.refresh_now()?;
        Ok(report.updated as u32)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.page.as_ref().is_some_and(Updater::is_running)
    }
}

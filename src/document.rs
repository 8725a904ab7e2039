//! Finding timed elements in a page and rewriting their text.

use chrono::{DateTime, Utc};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::config::UpdaterConfig;
use crate::error::{describe_js, DomError, TimestampError};
use crate::format::compute_display;

/// A page node that shows a relative time.
pub trait TimedElement {
    /// The stored absolute timestamp, if the attribute is present.
    fn timestamp(&self) -> Option<String>;

    /// Replaces all of the element's content with `text`.
    fn set_text(&self, text: &str);
}

/// Anything that can list the timed elements currently on a page.
pub trait TimeDisplayHost {
    type Element: TimedElement;

    fn timed_elements(&self) -> Result<Vec<Self::Element>, DomError>;
}

/// Outcome of one refresh cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: usize,
    pub skipped: usize,
}

/// Rewrites every timed element on `host` as seen at `now`.
///
/// Elements with a missing or unparseable timestamp keep their current text
/// and are counted as skipped; they never stop the rest of the cycle.
pub fn refresh_all<H: TimeDisplayHost>(
    host: &H,
    now: DateTime<Utc>,
) -> Result<RefreshReport, DomError> {
    let elements = host.timed_elements()?;
    let mut report = RefreshReport::default();

    for element in &elements {
        let raw = element.timestamp().unwrap_or_default();
        match compute_display(&raw, now) {
            Ok(text) => {
                element.set_text(&text);
                report.updated += 1;
            }
            Err(err @ TimestampError::UnparseableTimestamp { .. }) => {
                log::warn!("skipping timed element: {} ({})", err, err.error_code());
                report.skipped += 1;
            }
        }
    }

    log::debug!(
        "refreshed relative times: {} updated, {} skipped",
        report.updated,
        report.skipped
    );
    Ok(report)
}

/// The live page, queried through `web_sys`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
    selector: String,
    timestamp_attribute: String,
}

impl WebDocument {
    pub fn new(document: Document, config: &UpdaterConfig) -> Self {
        Self {
            document,
            selector: config.selector.clone(),
            timestamp_attribute: config.timestamp_attribute.clone(),
        }
    }

    /// Binds to `window.document`.
    pub fn from_window(config: &UpdaterConfig) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        Ok(Self::new(document, config))
    }
}

#[derive(Debug, Clone)]
pub struct WebTimedElement {
    element: Element,
    timestamp_attribute: String,
}

impl TimedElement for WebTimedElement {
    fn timestamp(&self) -> Option<String> {
        self.element.get_attribute(&self.timestamp_attribute)
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

impl TimeDisplayHost for WebDocument {
    type Element = WebTimedElement;

    fn timed_elements(&self) -> Result<Vec<WebTimedElement>, DomError> {
        let nodes = self
            .document
            .query_selector_all(&self.selector)
            .map_err(|e| DomError::Selector {
                selector: self.selector.clone(),
                message: describe_js(&e),
            })?;

        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(node) = nodes.get(index) else {
                continue;
            };
            if let Ok(element) = node.dyn_into::<Element>() {
                elements.push(WebTimedElement {
                    element,
                    timestamp_attribute: self.timestamp_attribute.clone(),
                });
            }
        }
        Ok(elements)
    }
}

/// One refresh of `window.document` at the current time.
pub fn refresh_document(config: &UpdaterConfig) -> Result<RefreshReport, DomError> {
    let document = WebDocument::from_window(config)?;
    refresh_all(&document, Utc::now())
}

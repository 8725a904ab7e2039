//! In-memory page and scheduler shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::document::{TimeDisplayHost, TimedElement};
use crate::error::DomError;
use crate::timer::RefreshScheduler;

pub struct MemoryElement {
    timestamp: Option<String>,
    text: RefCell<String>,
}

impl MemoryElement {
    pub fn new(timestamp: Option<&str>, text: &str) -> Rc<Self> {
        Rc::new(Self {
            timestamp: timestamp.map(str::to_string),
            text: RefCell::new(text.to_string()),
        })
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn overwrite(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

impl TimedElement for Rc<MemoryElement> {
    fn timestamp(&self) -> Option<String> {
        self.timestamp.clone()
    }

    fn set_text(&self, text: &str) {
        self.overwrite(text);
    }
}

pub struct MemoryPage {
    pub elements: Vec<Rc<MemoryElement>>,
}

impl TimeDisplayHost for MemoryPage {
    type Element = Rc<MemoryElement>;

    fn timed_elements(&self) -> Result<Vec<Rc<MemoryElement>>, DomError> {
        Ok(self.elements.clone())
    }
}

pub struct BrokenPage;

impl TimeDisplayHost for BrokenPage {
    type Element = Rc<MemoryElement>;

    fn timed_elements(&self) -> Result<Vec<Rc<MemoryElement>>, DomError> {
        Err(DomError::NoDocument)
    }
}

#[derive(Default)]
struct ManualState {
    next_handle: u32,
    scheduled: Vec<(u32, Duration, Box<dyn FnMut()>)>,
    cancelled: Vec<u32>,
}

/// Scheduler whose callbacks only run when a test calls [`fire`](Self::fire).
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    /// Runs every live callback once.
    pub fn fire(&self) {
        let mut state = self.state.borrow_mut();
        for (_, _, callback) in state.scheduled.iter_mut() {
            callback();
        }
    }

    pub fn live_intervals(&self) -> Vec<Duration> {
        self.state
            .borrow()
            .scheduled
            .iter()
            .map(|(_, interval, _)| *interval)
            .collect()
    }

    pub fn cancelled(&self) -> Vec<u32> {
        self.state.borrow().cancelled.clone()
    }
}

impl RefreshScheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<u32, DomError> {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = state.next_handle;
        state.scheduled.push((handle, interval, callback));
        Ok(handle)
    }

    fn cancel(&self, handle: u32) {
        let mut state = self.state.borrow_mut();
        state.scheduled.retain(|(live, _, _)| *live != handle);
        state.cancelled.push(handle);
    }
}

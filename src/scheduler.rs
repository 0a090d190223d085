//! Frame scheduling and redraw coalescing.
//!
//! The engine never talks to `requestAnimationFrame` directly; it goes through
//! a [`FrameScheduler`], so tests can fire frames by hand with
//! [`ManualScheduler`]. [`RedrawScheduler`] holds the only redraw state: a
//! pending flag that collapses any burst of requests into one scheduled frame.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::trace;

/// Runs a callback once, at the next display refresh.
pub trait FrameScheduler {
    fn schedule_once(&self, callback: Box<dyn FnOnce()>);
}

/// Coalesces redraw requests into at most one paint per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: bool,
    /// True while every request since the last frame was hover-only.
    hover_only: bool,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark a redraw as pending.
    ///
    /// Returns `true` when the caller must schedule a frame; `false` when one
    /// is already on its way. `hover_only` says whether just the hovered item
    /// changed; it survives coalescing only if every merged request agrees.
    pub fn request(&mut self, hover_only: bool) -> bool {
        if self.pending {
            self.hover_only &= hover_only;
            trace!("redraw: coalesced into pending frame");
            return false;
        }
        self.pending = true;
        self.hover_only = hover_only;
        true
    }

    /// Clear the pending flag at frame time.
    ///
    /// Returns the aggregated hover-only flag, or `None` if nothing was pending.
    pub fn take(&mut self) -> Option<bool> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(std::mem::take(&mut self.hover_only))
    }
}

type FrameCallback = Box<dyn FnOnce()>;

/// [`FrameScheduler`] that queues callbacks until [`ManualScheduler::fire`].
///
/// Clones share the queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Vec<FrameCallback>>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run one frame: every callback queued before this call. Callbacks
    /// scheduled while firing wait for the next frame.
    ///
    /// Returns the number of callbacks run.
    pub fn fire(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_once(&self, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push(callback);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler").field("queued", &self.queued()).finish()
    }
}

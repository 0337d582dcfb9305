// "Run this before the next repaint" and its cancellation counterpart.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use wasm_bindgen::JsValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, JsValue>;

    /// Cancelling a handle that already fired is a no-op.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Scheduler that only fires frames when told to. Used to step the loop a
/// fixed number of times without a display.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<i32>,
    pending: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fires the oldest pending callback. Returns false if nothing was queued.
    pub fn run_frame(&self) -> bool {
        // Release the queue before running: callbacks schedule their successor.
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn run_frames(&self, frames: usize) -> usize {
        let mut ran = 0;
        while ran < frames && self.run_frame() {
            ran += 1;
        }
        ran
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, JsValue> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push_back((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

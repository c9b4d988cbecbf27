//! Single-threaded stand-in for the platform's animation-frame queue and the
//! global resize event target.
//!
//! Everything runs on the UI thread, so the registry is shared through
//! `Rc<RefCell<_>>` rather than a lock. Handles are never reused.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Inner {
    next_frame: u64,
    next_listener: u64,
    pending: VecDeque<FrameHandle>,
    listeners: Vec<ListenerId>,
}

#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&self) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_frame += 1;
        let handle = FrameHandle(inner.next_frame);
        inner.pending.push_back(handle);
        handle
    }

    /// Unknown, already fired, or already cancelled handles are ignored.
    pub fn cancel_frame(&self, handle: FrameHandle) {
        self.inner.borrow_mut().pending.retain(|h| *h != handle);
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.inner.borrow().pending.contains(&handle)
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Drains the frames pending right now, oldest first. Frames requested
    /// while the returned ones run are due on the next call.
    pub fn take_due(&self) -> Vec<FrameHandle> {
        self.inner.borrow_mut().pending.drain(..).collect()
    }

    pub fn add_resize_listener(&self) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push(id);
        id
    }

    pub fn remove_resize_listener(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|l| *l != id);
    }

    pub fn resize_listeners(&self) -> Vec<ListenerId> {
        self.inner.borrow().listeners.clone()
    }
}

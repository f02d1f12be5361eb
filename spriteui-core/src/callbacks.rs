// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred callbacks.
//!
//! Any thread may hold a [CallbackQueue] and push work that has to touch the
//! control tree. The queue is drained on the next update pass of its owner.

use std::sync::{Arc, Mutex, PoisonError};

use crate::window_manager::WindowManager;

/// A deferred action run on the update thread.
pub type Callback = Box<dyn FnOnce(&mut WindowManager) + Send>;

/// A cloneable, thread-safe queue of [Callback]s.
#[derive(Clone, Default)]
pub struct CallbackQueue {
    callbacks: Arc<Mutex<Vec<Callback>>>,
}

impl CallbackQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for the next update pass.
    pub fn push<F>(&self, callback: F)
    where
        F: FnOnce(&mut WindowManager) + Send + 'static,
    {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    /// Number of waiting callbacks.
    pub fn len(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// If no callback is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every callback queued so far. Callbacks pushed afterwards wait
    /// for the next drain.
    pub(crate) fn take_all(&self) -> Vec<Callback> {
        std::mem::take(&mut *self.callbacks.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Run the callbacks present at the start of the call.
    pub(crate) fn drain(&self, wm: &mut WindowManager) {
        for callback in self.take_all() {
            callback(wm);
        }
    }
}

impl std::fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackQueue")
            .field("len", &self.len())
            .finish()
    }
}

//! RAII scope management for `Frame`.
//!
//! [`ScopedFrame`] swaps a fresh environment into a frame and puts the old
//! one back when dropped, so the restore happens on every exit path: normal
//! completion, `return`/`break` completions and `?`-propagated errors.

use std::mem;
use std::ops::{Deref, DerefMut};

use super::Frame;
use crate::Environment;

/// A frame running inside a child scope. Derefs to the frame.
pub(crate) struct ScopedFrame<'f> {
    frame: &'f mut Frame,
    saved: Option<Environment>,
}

impl Drop for ScopedFrame<'_> {
    fn drop(&mut self) {
        self.frame.env = self.saved.take();
    }
}

impl Deref for ScopedFrame<'_> {
    type Target = Frame;

    fn deref(&self) -> &Frame {
        self.frame
    }
}

impl DerefMut for ScopedFrame<'_> {
    fn deref_mut(&mut self) -> &mut Frame {
        self.frame
    }
}

impl Frame {
    /// Enter a new scope chained to the current one.
    pub(crate) fn scoped(&mut self) -> ScopedFrame<'_> {
        let child = Environment::new(self.env.clone());
        let saved = mem::replace(&mut self.env, Some(child));
        ScopedFrame { frame: self, saved }
    }
}

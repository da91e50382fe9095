// glhandles/src/framebuffer.rs
//
//! Handles to framebuffer objects registered in a context's framebuffer table.

use crate::context::{Context, ContextID};
use crate::table::ObjectRef;

/// Either a framebuffer id the caller has already populated, or a native framebuffer object
/// that needs one.
///
/// `FramebufferRef::Id(0)` names the default framebuffer.
pub type FramebufferRef<F> = ObjectRef<F>;

/// A (context, id) pair naming one entry in a context's framebuffer table.
///
/// A handle is only a name. Dropping it does nothing; pass it to
/// `ContextRegistry::release()` to free the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FramebufferHandle {
    pub(crate) context: Context,
    pub(crate) id: u32,
}

impl FramebufferHandle {
    /// The context whose table this handle indexes.
    #[inline]
    pub fn context(&self) -> Context {
        self.context
    }

    #[inline]
    pub fn context_id(&self) -> ContextID {
        self.context.id()
    }

    /// The id of the framebuffer within its context's table.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns true if this handle names the default framebuffer.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.id == 0
    }
}

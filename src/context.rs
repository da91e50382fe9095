// glhandles/src/context.rs
//
//! Context wrappers and the ways callers may name a context.

use std::fmt::{self, Display, Formatter};

/// The registry-assigned id of a context.
///
/// Ids start at 1 and are never reissued by the registry that handed them out, even after the
/// context is removed. `ContextID(0)` never names a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextID(pub u32);

impl Display for ContextID {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", *self)
    }
}

/// A wrapper representing one native context known to a `ContextRegistry`.
///
/// Two wrappers compare equal exactly when they refer to the same registered context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context {
    pub(crate) id: ContextID,
}

impl Context {
    #[inline]
    pub(crate) fn new(id: ContextID) -> Context {
        Context { id }
    }

    #[inline]
    pub fn id(&self) -> ContextID {
        self.id
    }
}

/// Either form a caller may use to name a context.
#[derive(Clone, Copy, Debug)]
pub enum ContextRef<'a, N> {
    /// An id previously handed out by the registry.
    Id(ContextID),
    /// A native context. Unknown native contexts are registered on first use.
    Native(&'a N),
}

impl<'a, N> From<ContextID> for ContextRef<'a, N> {
    #[inline]
    fn from(id: ContextID) -> ContextRef<'a, N> {
        ContextRef::Id(id)
    }
}

impl<'a, N> From<Context> for ContextRef<'a, N> {
    #[inline]
    fn from(context: Context) -> ContextRef<'a, N> {
        ContextRef::Id(context.id)
    }
}

// glhandles/src/texture.rs
//
//! Handles to textures registered in a context's texture table.

use crate::context::Context;
use crate::table::ObjectRef;

use euclid::default::Size2D;

/// Either a texture id the caller has already populated, or a native texture object that needs
/// one.
pub type TextureRef<T> = ObjectRef<T>;

/// A (context, id) pair naming one entry in a context's texture table, along with the size the
/// texture was registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub(crate) context: Context,
    pub(crate) id: u32,
    pub(crate) size: Size2D<i32>,
}

impl TextureHandle {
    #[inline]
    pub fn context(&self) -> Context {
        self.context
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The texture's size, in device pixels.
    #[inline]
    pub fn size(&self) -> Size2D<i32> {
        self.size
    }
}

// glhandles/src/lib.rs
//
//! Lightweight handles for GL objects that live in per-context object tables.
//!
//! Bindings that sit between a host GL context and an engine usually refer to framebuffers and
//! textures by small integer ids. This crate keeps those ids honest: a [`ContextRegistry`] owns
//! one [`ObjectTable`] per context, and resolving either a raw object or an already-known id
//! produces a [`FramebufferHandle`] (or [`TextureHandle`]) that can later be released, making
//! the id available again.
//!
//! The registry never deletes native objects on its own. Releasing a handle only clears its
//! slot; `delete_framebuffer()` is there for callers who want both.

pub mod error;
pub use crate::error::Error;

mod context;
pub use crate::context::{Context, ContextID, ContextRef};

mod table;
pub use crate::table::{AllocationPolicy, ObjectRef, ObjectTable};

mod framebuffer;
pub use crate::framebuffer::{FramebufferHandle, FramebufferRef};

mod texture;
pub use crate::texture::{TextureHandle, TextureRef};

mod registry;
pub use crate::registry::{ContextRegistry, GlContextRegistry, RegistryOptions};

mod gl_utils;

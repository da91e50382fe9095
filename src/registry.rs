// glhandles/src/registry.rs
//
//! The context registry, which owns every context's object tables and resolves handles into
//! them.

use crate::context::{Context, ContextID, ContextRef};
use crate::error::Error;
use crate::framebuffer::{FramebufferHandle, FramebufferRef};
use crate::gl_utils;
use crate::table::{AllocationPolicy, ObjectTable};
use crate::texture::{TextureHandle, TextureRef};

use euclid::default::Size2D;
use fnv::FnvHashMap;
use glow as gl;
use glow::HasContext;
use log::{debug, warn};
use std::fmt::Debug;
use std::hash::Hash;

/// Options controlling how a registry's tables allocate ids.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RegistryOptions {
    /// The allocation policy of every context's framebuffer table.
    pub framebuffer_policy: AllocationPolicy,
    /// The allocation policy of every context's texture table.
    pub texture_policy: AllocationPolicy,
}

// The data stored for each registered context.
struct ContextData<N, F, T> {
    // The native context this entry wraps.
    native: N,
    framebuffers: ObjectTable<F>,
    textures: ObjectTable<T>,
}

/// A registry of contexts, each with its own framebuffer and texture tables.
///
/// `N` is the raw context type (a platform context pointer, a host-side context id, and so on);
/// it only needs to be cheap to copy and hashable, since the registry keys on its identity.
/// `F` and `T` are the native framebuffer and texture types.
///
/// The registry is single-threaded: every mutating call takes `&mut self`, and calls that touch
/// GL must happen with the matching context current on the calling thread.
pub struct ContextRegistry<N, F, T = F> {
    options: RegistryOptions,
    // The id the next registered context receives.
    next_context_id: ContextID,
    // Context ids, indexed by native context.
    ids: FnvHashMap<N, ContextID>,
    // The contexts, indexed by context id.
    contexts: FnvHashMap<ContextID, ContextData<N, F, T>>,
}

/// A registry whose tables hold the object types of the GL implementation `G`.
pub type GlContextRegistry<N, G> =
    ContextRegistry<N, <G as HasContext>::Framebuffer, <G as HasContext>::Texture>;

impl<N, F, T> Default for ContextRegistry<N, F, T>
where
    N: Copy + Eq + Hash + Debug,
{
    fn default() -> ContextRegistry<N, F, T> {
        ContextRegistry::new()
    }
}

impl<N, F, T> ContextRegistry<N, F, T>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Creates an empty registry with default options.
    pub fn new() -> ContextRegistry<N, F, T> {
        ContextRegistry::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> ContextRegistry<N, F, T> {
        ContextRegistry {
            options,
            next_context_id: ContextID(1),
            ids: FnvHashMap::default(),
            contexts: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Returns the wrapper for `native`, registering it with fresh tables if it's new.
    pub fn register_context(&mut self, native: N) -> Context {
        if let Some(&id) = self.ids.get(&native) {
            return Context::new(id);
        }

        let id = self.next_context_id;
        self.next_context_id.0 += 1;
        debug!("Registering native context {:?} as {:?}", native, id);
        self.ids.insert(native, id);
        self.contexts.insert(
            id,
            ContextData {
                native,
                framebuffers: ObjectTable::new(self.options.framebuffer_policy),
                textures: ObjectTable::new(self.options.texture_policy),
            },
        );
        Context::new(id)
    }

    /// Looks up a registered context by id.
    pub fn context(&self, id: ContextID) -> Option<Context> {
        if self.contexts.contains_key(&id) {
            Some(Context::new(id))
        } else {
            None
        }
    }

    /// Looks up the wrapper of a native context without registering it.
    pub fn context_for_native(&self, native: &N) -> Option<Context> {
        self.ids.get(native).map(|&id| Context::new(id))
    }

    /// Returns the native context behind `context`, if it's still registered.
    pub fn native_context(&self, context: Context) -> Option<&N> {
        self.contexts.get(&context.id).map(|data| &data.native)
    }

    /// Removes a context and its tables. The native context and any native objects in its
    /// tables are left for the caller to destroy.
    ///
    /// Returns false if the context wasn't registered.
    pub fn remove_context(&mut self, context: Context) -> bool {
        match self.contexts.remove(&context.id) {
            Some(data) => {
                debug!(
                    "Removing context {:?} ({} framebuffers, {} textures still registered)",
                    context.id,
                    data.framebuffers.len(),
                    data.textures.len()
                );
                self.ids.remove(&data.native);
                true
            }
            None => false,
        }
    }

    /// Returns the number of registered contexts.
    #[inline]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    fn lookup(&mut self, context: ContextRef<'_, N>) -> Result<ContextID, Error> {
        match context {
            ContextRef::Id(id) if self.contexts.contains_key(&id) => Ok(id),
            ContextRef::Id(id) => {
                debug!("No context registered as {:?}", id);
                Err(Error::InvalidContext)
            }
            ContextRef::Native(native) => Ok(self.register_context(*native).id),
        }
    }

    fn data(&self, context: Context) -> Option<&ContextData<N, F, T>> {
        self.contexts.get(&context.id)
    }

    /// Resolves a context and a framebuffer into a handle.
    ///
    /// A native framebuffer is stored in a freshly allocated slot of the context's framebuffer
    /// table. A numeric id is taken as already populated and passes through without touching
    /// the table.
    pub fn resolve(
        &mut self,
        context: ContextRef<'_, N>,
        framebuffer: FramebufferRef<F>,
    ) -> Result<FramebufferHandle, Error> {
        let context_id = self.lookup(context)?;
        let data = self
            .contexts
            .get_mut(&context_id)
            .ok_or(Error::InvalidContext)?;
        let id = framebuffer.resolve_in(&mut data.framebuffers, Error::InvalidFramebuffer)?;
        debug!("Resolved framebuffer {} in context {:?}", id, context_id);
        Ok(FramebufferHandle {
            context: Context::new(context_id),
            id,
        })
    }

    /// Clears the handle's slot so its id may be reused, returning the native framebuffer it
    /// held. The native framebuffer is not deleted.
    pub fn release(&mut self, handle: FramebufferHandle) -> Option<F> {
        match self.contexts.get_mut(&handle.context.id) {
            Some(data) => {
                debug!(
                    "Releasing framebuffer {} in context {:?}",
                    handle.id, handle.context.id
                );
                data.framebuffers.clear(handle.id)
            }
            None => {
                warn!(
                    "Releasing framebuffer {} of removed context {:?}",
                    handle.id, handle.context.id
                );
                None
            }
        }
    }

    /// Returns the native framebuffer stored in the handle's slot.
    pub fn framebuffer(&self, handle: FramebufferHandle) -> Option<&F> {
        self.data(handle.context)?.framebuffers.get(handle.id)
    }

    /// Returns the framebuffer table of `context`.
    pub fn framebuffers(&self, context: Context) -> Option<&ObjectTable<F>> {
        self.data(context).map(|data| &data.framebuffers)
    }

    /// Resolves a context and a texture of the given size into a handle.
    ///
    /// Works like `resolve()`, against the context's texture table.
    pub fn resolve_texture(
        &mut self,
        context: ContextRef<'_, N>,
        texture: TextureRef<T>,
        size: Size2D<i32>,
    ) -> Result<TextureHandle, Error> {
        let context_id = self.lookup(context)?;
        let data = self
            .contexts
            .get_mut(&context_id)
            .ok_or(Error::InvalidContext)?;
        let id = texture.resolve_in(&mut data.textures, Error::InvalidTexture)?;
        debug!(
            "Resolved texture {} ({:?}) in context {:?}",
            id, size, context_id
        );
        Ok(TextureHandle {
            context: Context::new(context_id),
            id,
            size,
        })
    }

    /// Clears the handle's texture slot, returning the native texture it held.
    pub fn release_texture(&mut self, handle: TextureHandle) -> Option<T> {
        match self.contexts.get_mut(&handle.context.id) {
            Some(data) => data.textures.clear(handle.id),
            None => {
                warn!(
                    "Releasing texture {} of removed context {:?}",
                    handle.id, handle.context.id
                );
                None
            }
        }
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&T> {
        self.data(handle.context)?.textures.get(handle.id)
    }

    pub fn textures(&self, context: Context) -> Option<&ObjectTable<T>> {
        self.data(context).map(|data| &data.textures)
    }
}

impl<N, F, T> ContextRegistry<N, F, T>
where
    N: Copy + Eq + Hash + Debug,
    F: Copy + PartialEq,
    T: Copy,
{
    /// Creates a framebuffer object through `gl` and registers it in the context's table.
    ///
    /// The context is resolved first, so an invalid context doesn't leak a GL object.
    pub fn create_framebuffer<G>(
        &mut self,
        gl: &G,
        context: ContextRef<'_, N>,
    ) -> Result<FramebufferHandle, Error>
    where
        G: HasContext<Framebuffer = F, Texture = T>,
    {
        let context_id = self.lookup(context)?;
        let framebuffer = gl_utils::create_framebuffer(gl)?;
        self.register_created_framebuffer(gl, context_id, framebuffer)
    }

    /// Creates a framebuffer with the texture behind `texture` as its color attachment and
    /// registers it in the texture's context.
    ///
    /// The new framebuffer is left bound to `GL_FRAMEBUFFER`.
    pub fn create_texture_framebuffer<G>(
        &mut self,
        gl: &G,
        texture: TextureHandle,
    ) -> Result<FramebufferHandle, Error>
    where
        G: HasContext<Framebuffer = F, Texture = T>,
    {
        let texture_object = *self.texture(texture).ok_or(Error::InvalidTexture)?;
        let framebuffer =
            gl_utils::create_and_bind_framebuffer(gl, gl::TEXTURE_2D, Some(texture_object))?;
        self.register_created_framebuffer(gl, texture.context.id, framebuffer)
    }

    // Registers a framebuffer just created through `gl`, deleting it again if its table is full.
    fn register_created_framebuffer<G>(
        &mut self,
        gl: &G,
        context_id: ContextID,
        framebuffer: F,
    ) -> Result<FramebufferHandle, Error>
    where
        G: HasContext<Framebuffer = F, Texture = T>,
    {
        self.resolve(ContextRef::Id(context_id), FramebufferRef::Native(framebuffer))
            .map_err(|err| {
                gl_utils::destroy_framebuffer(gl, framebuffer);
                err
            })
    }

    /// Releases the handle's slot and deletes the native framebuffer it held, unbinding it
    /// first if it's bound for drawing or reading.
    ///
    /// Returns false if the slot was already empty.
    pub fn delete_framebuffer<G>(&mut self, gl: &G, handle: FramebufferHandle) -> bool
    where
        G: HasContext<Framebuffer = F, Texture = T>,
    {
        match self.release(handle) {
            Some(framebuffer) => {
                gl_utils::destroy_framebuffer(gl, framebuffer);
                true
            }
            None => false,
        }
    }
}

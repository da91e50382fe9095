// glhandles/src/gl_utils.rs
//
//! OpenGL helpers for creating and destroying the framebuffers that land in object tables.

use crate::error::Error;

use glow as gl;
use glow::HasContext;

pub(crate) fn create_framebuffer<G: HasContext>(gl: &G) -> Result<G::Framebuffer, Error> {
    unsafe {
        gl.create_framebuffer()
            .map_err(Error::FramebufferCreationFailed)
    }
}

pub(crate) fn create_and_bind_framebuffer<G: HasContext>(
    gl: &G,
    texture_target: u32,
    texture_object: Option<G::Texture>,
) -> Result<G::Framebuffer, Error> {
    let framebuffer_object = create_framebuffer(gl)?;
    unsafe {
        gl.bind_framebuffer(gl::FRAMEBUFFER, Some(framebuffer_object));
        gl.framebuffer_texture_2d(
            gl::FRAMEBUFFER,
            gl::COLOR_ATTACHMENT0,
            texture_target,
            texture_object,
            0,
        );
    }
    Ok(framebuffer_object)
}

pub(crate) fn unbind_framebuffer_if_necessary<G: HasContext>(
    gl: &G,
    framebuffer_object: G::Framebuffer,
) {
    unsafe {
        // Neither binding point may be left naming the framebuffer.
        let current_draw_framebuffer = gl.get_parameter_framebuffer(gl::DRAW_FRAMEBUFFER_BINDING);
        let current_read_framebuffer = gl.get_parameter_framebuffer(gl::READ_FRAMEBUFFER_BINDING);
        if current_draw_framebuffer == Some(framebuffer_object) {
            gl.bind_framebuffer(gl::DRAW_FRAMEBUFFER, None);
        }
        if current_read_framebuffer == Some(framebuffer_object) {
            gl.bind_framebuffer(gl::READ_FRAMEBUFFER, None);
        }
    }
}

pub(crate) fn destroy_framebuffer<G: HasContext>(gl: &G, framebuffer_object: G::Framebuffer) {
    unbind_framebuffer_if_necessary(gl, framebuffer_object);
    unsafe {
        gl.delete_framebuffer(framebuffer_object);
    }
}

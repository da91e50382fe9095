// glhandles/src/error.rs
//
//! Various errors that methods can produce.

use std::fmt::{self, Display, Formatter};

/// Various errors that methods can produce.
#[derive(Debug)]
pub enum Error {
    /// The context argument named neither a registered context id nor a native context.
    InvalidContext,
    /// The framebuffer argument produced no usable table id.
    InvalidFramebuffer,
    /// The texture argument produced no usable table id.
    InvalidTexture,
    /// An object id was past `ObjectTable::MAX_ID`.
    IdOutOfRange(u32),
    /// Every id of an object table is in use.
    TableFull,
    /// GL couldn't create a framebuffer object.
    FramebufferCreationFailed(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::InvalidContext => f.write_str("invalid context argument"),
            Error::InvalidFramebuffer => f.write_str("invalid framebuffer argument"),
            Error::InvalidTexture => f.write_str("invalid texture argument"),
            Error::IdOutOfRange(id) => write!(f, "object id {} is out of range", id),
            Error::TableFull => f.write_str("object table is full"),
            Error::FramebufferCreationFailed(ref message) => {
                write!(f, "framebuffer creation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

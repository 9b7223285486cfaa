//! Message framing between game clients and a chunk-streaming server.
//!
//! A frame is one type byte followed by a payload whose length is implied
//! by the type (or, for text, by a `u16` prefix). All integers and floats
//! are little-endian.
#![forbid(unsafe_code)]

#[cfg(not(target_endian = "little"))]
compile_error!("cairn-net copies Pod payloads byte-for-byte and assumes a little-endian host");

mod frame;
mod message;

pub use frame::{FrameBuffer, MAX_BUFFER_SIZE, decode, encode};
pub use message::{AvatarState, FrameError, Message, MessageType};

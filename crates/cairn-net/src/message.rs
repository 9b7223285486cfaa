use bytemuck::{Pod, Zeroable};
use cairn_chunk::Chunk;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Text = 0,
    AvatarState = 1,
    ChunkState = 2,
}

impl TryFrom<u8> for MessageType {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageType::Text),
            1 => Ok(MessageType::AvatarState),
            2 => Ok(MessageType::ChunkState),
            other => Err(FrameError::UnknownType(other)),
        }
    }
}

/// Packed player pose, copied verbatim onto the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct AvatarState {
    pub id: u32,
    pub pos: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
}

const _: () = assert!(std::mem::size_of::<AvatarState>() == 24);

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Text(String),
    Avatar(AvatarState),
    /// Full block contents of one chunk, tagged by its coordinate.
    Chunk(Chunk),
}

impl Message {
    pub fn kind(&self) -> MessageType {
        match self {
            Message::Text(_) => MessageType::Text,
            Message::Avatar(_) => MessageType::AvatarState,
            Message::Chunk(_) => MessageType::ChunkState,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame buffer would grow to {needed} bytes (cap {cap})")]
    BufferOverflow { needed: usize, cap: usize },
    #[error("unknown message type {0}")]
    UnknownType(u8),
    #[error("text payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("chunk payload holds unknown block ordinal {0}")]
    InvalidBlock(u8),
    #[error("text of {0} bytes does not fit a u16 length prefix")]
    TextTooLong(usize),
}

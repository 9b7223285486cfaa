use bytemuck::{bytes_of, pod_read_unaligned};
use cairn_blocks::Block;
use cairn_chunk::{CHUNK_VOLUME, Chunk};
use cairn_world::ChunkCoord;

use crate::message::{AvatarState, FrameError, Message, MessageType};

/// Upper bound on buffered, not yet decoded bytes per connection.
pub const MAX_BUFFER_SIZE: usize = 1 << 20;

const AVATAR_LEN: usize = std::mem::size_of::<AvatarState>();
const CHUNK_HEADER_LEN: usize = 12;

/// Append the frame for `msg` to `out`.
pub fn encode(msg: &Message, out: &mut Vec<u8>) -> Result<(), FrameError> {
    match msg {
        Message::Text(text) => {
            let len = u16::try_from(text.len()).map_err(|_| FrameError::TextTooLong(text.len()))?;
            out.reserve(3 + text.len());
            out.push(MessageType::Text as u8);
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(text.as_bytes());
        }
        Message::Avatar(state) => {
            out.push(MessageType::AvatarState as u8);
            out.extend_from_slice(bytes_of(state));
        }
        Message::Chunk(chunk) => {
            out.reserve(1 + CHUNK_HEADER_LEN + CHUNK_VOLUME);
            out.push(MessageType::ChunkState as u8);
            let c = chunk.coord;
            for v in [c.cx, c.cy, c.cz] {
                out.extend_from_slice(&v.to_le_bytes());
            }
            out.extend(chunk.blocks().iter().map(|b| b.id()));
        }
    }
    Ok(())
}

/// Decode one frame from the front of `buf`. `Ok(None)` means the frame is
/// not complete yet; otherwise returns the message and bytes consumed.
pub fn decode(buf: &[u8]) -> Result<Option<(Message, usize)>, FrameError> {
    let Some((&tag, body)) = buf.split_first() else {
        return Ok(None);
    };
    match MessageType::try_from(tag)? {
        MessageType::Text => {
            let Some(prefix) = body.get(..2) else {
                return Ok(None);
            };
            let len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
            let Some(bytes) = body.get(2..2 + len) else {
                return Ok(None);
            };
            let text = std::str::from_utf8(bytes).map_err(|_| FrameError::InvalidUtf8)?;
            Ok(Some((Message::Text(text.to_owned()), 3 + len)))
        }
        MessageType::AvatarState => {
            let Some(bytes) = body.get(..AVATAR_LEN) else {
                return Ok(None);
            };
            let state: AvatarState = pod_read_unaligned(bytes);
            Ok(Some((Message::Avatar(state), 1 + AVATAR_LEN)))
        }
        MessageType::ChunkState => {
            let Some(bytes) = body.get(..CHUNK_HEADER_LEN + CHUNK_VOLUME) else {
                return Ok(None);
            };
            let (header, cells) = bytes.split_at(CHUNK_HEADER_LEN);
            let axis = |i: usize| i32::from_le_bytes([header[i], header[i + 1], header[i + 2], header[i + 3]]);
            let coord = ChunkCoord::new(axis(0), axis(4), axis(8));
            let blocks = cells
                .iter()
                .map(|&id| Block::from_u8(id).ok_or(FrameError::InvalidBlock(id)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some((
                Message::Chunk(Chunk::from_blocks(coord, blocks)),
                1 + CHUNK_HEADER_LEN + CHUNK_VOLUME,
            )))
        }
    }
}

/// Accumulates stream bytes and yields whole messages.
pub struct FrameBuffer {
    buf: Vec<u8>,
    cap: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_BUFFER_SIZE)
    }

    pub fn with_capacity_limit(cap: usize) -> Self {
        Self {
            buf: Vec::new(),
            cap,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append received bytes. Exceeding the cap is an error and leaves the
    /// buffer unchanged; the connection should be dropped.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        let needed = self.buf.len() + bytes.len();
        if needed > self.cap {
            log::warn!("frame buffer overflow: {needed} > {}", self.cap);
            return Err(FrameError::BufferOverflow {
                needed,
                cap: self.cap,
            });
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Pop the next complete message, if any.
    pub fn next_message(&mut self) -> Result<Option<Message>, FrameError> {
        match decode(&self.buf)? {
            Some((msg, used)) => {
                self.buf.drain(..used);
                Ok(Some(msg))
            }
            None => Ok(None),
        }
    }
}

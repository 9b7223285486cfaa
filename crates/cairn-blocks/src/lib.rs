//! Block, face, and texture tables.
#![forbid(unsafe_code)]

pub mod face;
pub mod table;
pub mod texture;
pub mod types;

pub use face::Face;
pub use table::{BLOCK_TABLE, BlockDef, FaceTextures};
pub use texture::{BlockTexture, TextureError, get_block_texture, try_block_texture};
pub use types::{Block, BlockCategory, UnknownBlock, WaterLevel};

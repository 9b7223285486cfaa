use cairn_blocks::Block;
use cairn_chunk::{CHUNK_VOLUME, Chunk};
use cairn_geom::IVec3;
use cairn_net::{AvatarState, FrameBuffer, FrameError, Message, decode, encode};
use cairn_world::ChunkCoord;

fn frame(msg: &Message) -> Vec<u8> {
    let mut out = Vec::new();
    encode(msg, &mut out).unwrap();
    out
}

#[test]
fn text_wire_layout() {
    let bytes = frame(&Message::Text("hi".into()));
    assert_eq!(bytes, vec![0, 2, 0, b'h', b'i']);
}

#[test]
fn avatar_wire_layout() {
    let state = AvatarState {
        id: 7,
        pos: [1.0, -2.0, 64.5],
        yaw: 0.25,
        pitch: -0.5,
    };
    let bytes = frame(&Message::Avatar(state));
    assert_eq!(bytes.len(), 25);
    assert_eq!(bytes[0], 1);
    assert_eq!(&bytes[1..5], &7u32.to_le_bytes());
    assert_eq!(&bytes[9..13], &(-2.0f32).to_le_bytes());
    assert_eq!(&bytes[21..25], &(-0.5f32).to_le_bytes());
    assert_eq!(decode(&bytes).unwrap(), Some((Message::Avatar(state), 25)));
}

#[test]
fn chunk_state_carries_coord_and_blocks() {
    let coord = ChunkCoord::new(-3, 4, 1);
    let mut chunk = Chunk::new(coord);
    chunk.set_world(coord.origin() + IVec3::new(1, 2, 3), Block::DIAMOND_ORE);
    let bytes = frame(&Message::Chunk(chunk.clone()));
    assert_eq!(bytes.len(), 1 + 12 + CHUNK_VOLUME);
    assert_eq!(bytes[0], 2);
    assert_eq!(&bytes[1..5], &(-3i32).to_le_bytes());
    assert_eq!(decode(&bytes).unwrap(), Some((Message::Chunk(chunk), bytes.len())));
}

#[test]
fn partial_frames_wait_for_more_bytes() {
    let bytes = frame(&Message::Text("hello".into()));
    for cut in 0..bytes.len() {
        assert_eq!(decode(&bytes[..cut]).unwrap(), None, "cut at {cut}");
    }
}

#[test]
fn malformed_frames_are_rejected() {
    assert_eq!(decode(&[9]), Err(FrameError::UnknownType(9)));
    assert_eq!(decode(&[0, 2, 0, 0xff, 0xfe]), Err(FrameError::InvalidUtf8));
    let mut bad_chunk = vec![2u8; 1 + 12 + CHUNK_VOLUME];
    bad_chunk[20] = 200;
    assert_eq!(decode(&bad_chunk), Err(FrameError::InvalidBlock(200)));

    let long = "x".repeat(u16::MAX as usize + 1);
    let mut out = Vec::new();
    assert_eq!(
        encode(&Message::Text(long), &mut out),
        Err(FrameError::TextTooLong(u16::MAX as usize + 1))
    );
    assert!(out.is_empty());
}

#[test]
fn frame_buffer_splits_a_stream() {
    let mut stream = frame(&Message::Text("a".into()));
    stream.extend(frame(&Message::Avatar(AvatarState::default())));
    stream.extend(frame(&Message::Text(String::new())));

    let mut fb = FrameBuffer::new();
    let mut got = Vec::new();
    for piece in stream.chunks(4) {
        fb.push(piece).unwrap();
        while let Some(msg) = fb.next_message().unwrap() {
            got.push(msg);
        }
    }
    assert_eq!(
        got,
        vec![
            Message::Text("a".into()),
            Message::Avatar(AvatarState::default()),
            Message::Text(String::new()),
        ]
    );
    assert!(fb.is_empty());
}

#[test]
fn frame_buffer_enforces_its_cap() {
    let mut fb = FrameBuffer::with_capacity_limit(8);
    fb.push(&[0, 10, 0]).unwrap();
    assert_eq!(
        fb.push(&[b'x'; 6]),
        Err(FrameError::BufferOverflow { needed: 9, cap: 8 })
    );
    assert_eq!(fb.len(), 3);
    assert_eq!(fb.next_message().unwrap(), None);
}

use cairn_net::{AvatarState, FrameBuffer, Message, encode};
use proptest::prelude::*;

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![
        ".{0,64}".prop_map(Message::Text),
        (any::<u32>(), -1e6f32..1e6, -1e6f32..1e6, -1e6f32..1e6, -3.2f32..3.2, -1.6f32..1.6).prop_map(
            |(id, x, y, z, yaw, pitch)| Message::Avatar(AvatarState {
                id,
                pos: [x, y, z],
                yaw,
                pitch,
            })
        ),
    ]
}

proptest! {
    // However the stream is cut, the same messages come out in order.
    #[test]
    fn any_split_yields_the_same_messages(msgs in prop::collection::vec(message(), 1..12), step in 1usize..40) {
        let mut stream = Vec::new();
        for m in &msgs {
            encode(m, &mut stream).unwrap();
        }
        let mut fb = FrameBuffer::new();
        let mut got = Vec::new();
        for piece in stream.chunks(step) {
            fb.push(piece).unwrap();
            while let Some(m) = fb.next_message().unwrap() {
                got.push(m);
            }
        }
        prop_assert_eq!(got, msgs);
        prop_assert!(fb.is_empty());
    }
}

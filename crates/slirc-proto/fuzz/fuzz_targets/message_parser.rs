//! Fuzz target for line framing and message parsing
//!
//! Feeds arbitrary bytes through the line codec and parses every line it
//! yields. Neither stage may panic on hostile input.

#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use slirc_proto::{LineCodec, Message};
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut codec = LineCodec::with_max_len(512);
    let mut buf = BytesMut::from(data);

    while let Ok(Some(line)) = codec.decode(&mut buf) {
        if let Ok(msg) = line.parse::<Message>() {
            let _ = msg.source_nick();
            let _ = msg.response();
        }
    }
    let _ = codec.decode_eof(&mut buf);
});

//! Fuzz target for CTCP message parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_proto::ctcp::Ctcp;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 512 {
            return;
        }

        if let Some(ctcp) = Ctcp::parse(input) {
            let _ = ctcp.to_string();
        }
        let _ = Ctcp::is_ctcp(input);
    }
});

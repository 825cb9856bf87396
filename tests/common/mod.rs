//! Integration test common infrastructure.
//!
//! The tests play the server: [`FakeServer`] listens on an ephemeral port and
//! hands out a [`Peer`] per accepted client. [`Recorder`] is a frontend that
//! remembers what it was asked to show.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{Recorder, pump_until, test_client};
#[allow(unused_imports)]
pub use server::{FakeServer, Peer};

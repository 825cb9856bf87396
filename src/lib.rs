//! slirc - Straylight IRC Client
//!
//! A single-session terminal IRC client. One connection, at most one room.
//!
//! The crate splits into a sans-IO core and the pieces around it:
//!
//! - [`state`] holds the session (identity, lifecycle, room, roster).
//! - [`handlers`] turns parsed server messages into replies and [`event::Event`]s.
//! - [`network`] owns the socket and the frame reader task.
//! - [`client`] is the processing loop tying them together.
//! - [`ui`] renders events; [`history`] records raw traffic.

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod handlers;
pub mod history;
pub mod input;
pub mod network;
pub mod state;
pub mod telemetry;
pub mod ui;

pub use client::{Client, Flow};
pub use config::Config;
pub use error::ClientError;
pub use event::Event;

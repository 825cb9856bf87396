//! Session state.
//!
//! Contains the [`Session`] owned by the processing loop and the room
//! [`Roster`] it tracks.

mod roster;
mod session;

pub use roster::{Roster, strip_mode_prefix};
pub use session::{ConnectionState, Endpoint, Identity, Session};

//! Adapters implementing the port traits.
//!
//! - `live`: real disk I/O.
//! - `recording`: wraps another adapter and captures every call to a cassette.
//! - `replaying`: serves results back from a recorded cassette.
//! - `memory`: in-process filesystem for unit tests.

mod fs_input;
pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;

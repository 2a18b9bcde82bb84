//! Port traits defining external boundaries.
//!
//! The repository engine only talks to the outside world through the
//! filesystem. Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::FileSystem;

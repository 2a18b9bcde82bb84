//! Cassette format for recording and replaying filesystem interactions.
//!
//! A cassette is a YAML file holding every port call made during one `gvt`
//! run, in order. Setting `GVT_RECORD=<file>` captures one; tests replay it.

pub mod format;
pub mod recorder;
pub mod replayer;

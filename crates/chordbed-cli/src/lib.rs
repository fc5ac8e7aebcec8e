//! chordbed CLI library.
//!
//! Command implementations for the `chordbed` binary, exposed as a library so
//! integration tests can drive them without spawning a process.

pub mod commands;

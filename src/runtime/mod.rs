//! Single-writer runtime that serializes every store call.

/// Handle and command loop implementation.
pub mod handle;

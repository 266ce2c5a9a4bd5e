//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `edge_cases.rs` - Unusual positions the codec, editor and rules must tolerate
//! - `proptest.rs` - Property-based tests over random edits and random games

mod proptest;

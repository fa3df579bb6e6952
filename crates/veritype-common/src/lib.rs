//! Common types and utilities for the veritype engine.
//!
//! This crate provides foundational types used across the veritype crates:
//! - String interning (`Atom`, `Interner`)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

//! # ps-core
//!
//! Core types and error types for pspublisher.
//!
//! This crate provides the foundational types shared across all pspublisher crates:
//! - Publish status and edit lifecycle enums (with state machine transitions)
//! - Wire model for the Android Publisher API v3 (edits, listings, APKs, tracks)
//! - Length-bounded release notes
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod model;
pub mod notes;

pub use enums::{EditState, PublishStatus};
pub use errors::CoreError;
pub use notes::{MAX_RELEASE_NOTES_CHARS, ReleaseNotes};

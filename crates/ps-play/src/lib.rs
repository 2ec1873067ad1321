//! # ps-play
//!
//! Android Publisher API v3 client for pspublisher.
//!
//! Covers the edit-scoped calls needed to publish an APK: insert/delete
//! edits, list listings and tracks, upload APKs and deobfuscation files,
//! update a track, and validate/commit the edit. Every call is a single
//! request/response; nothing is retried.

mod api;
mod client;
mod error;
mod http;
mod media;

pub use api::{EditsApi, PROGUARD_FILE_TYPE};
pub use client::PublisherClient;
pub use error::PlayError;
pub use media::{APK_CONTENT_TYPE, MAPPING_CONTENT_TYPE, UploadFile};

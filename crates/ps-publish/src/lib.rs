//! # ps-publish
//!
//! The upload workflow of pspublisher.
//!
//! - [`validate()`] checks raw input and opens the files to upload
//! - [`EditSession`] drives one edit through its lifecycle
//! - [`upload()`] and [`publish()`] run the transaction, deleting the edit
//!   if any step fails
//!
//! The workflow is generic over [`ps_play::EditsApi`], so it runs the same
//! against Google and against an in-memory stub.

mod edit;
mod error;
mod validate;
mod workflow;

pub use edit::EditSession;
pub use error::{PublishError, RollbackOutcome, Step, StepFailure, ValidationError};
pub use validate::{Field, FileKind, RawUploadConfig, UploadRequest, validate};
pub use workflow::{PublishOptions, PublishReceipt, publish, upload};

//! Turns raw command-line input into a typed [`UploadRequest`].
//!
//! Checks run in a fixed order and stop at the first problem, so the user
//! always sees the same message for the same input. Nothing here talks to
//! the network.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use ps_core::{CoreError, PublishStatus, ReleaseNotes};
use ps_play::UploadFile;

use crate::error::ValidationError;

/// Upload parameters as they arrive from the command line and config
/// defaults. Empty strings are treated like absent values.
#[derive(Debug, Clone, Default)]
pub struct RawUploadConfig {
    pub package_id: Option<String>,
    pub key_file: Option<PathBuf>,
    pub apk: Option<PathBuf>,
    pub track: Option<String>,
    pub mapping: Option<PathBuf>,
    pub release_notes: String,
    /// Takes precedence over `release_notes` when set.
    pub release_notes_file: Option<PathBuf>,
    pub status: String,
}

/// A required parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PackageId,
    KeyFile,
    Track,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PackageId => "Package id",
            Self::KeyFile => "Key file",
            Self::Track => "Publish track",
        })
    }
}

/// A local file the upload depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Artifact,
    Mapping,
    KeyFile,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Artifact => "apk",
            Self::Mapping => "mapping",
            Self::KeyFile => "key",
        })
    }
}

/// Everything the workflow needs, checked and typed.
#[derive(Debug)]
pub struct UploadRequest {
    pub package_id: String,
    pub key_file: PathBuf,
    pub track: String,
    pub apk: UploadFile,
    pub mapping: Option<UploadFile>,
    pub release_notes: ReleaseNotes,
    pub status: PublishStatus,
}

/// Validate `raw` and open the files it names.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in this order: package id, key
/// path, track, apk, mapping, key readability, release notes, status.
pub fn validate(raw: RawUploadConfig) -> Result<UploadRequest, ValidationError> {
    let package_id = required(raw.package_id, Field::PackageId)?;
    let key_file = required_path(raw.key_file)?;
    let track = required(raw.track, Field::Track)?;

    let apk = open_upload(raw.apk.as_deref(), FileKind::Artifact)?;
    let mapping = match non_empty_path(raw.mapping) {
        Some(path) => Some(open_upload(Some(&path), FileKind::Mapping)?),
        None => None,
    };

    // Authentication reads the key again later; this only proves it is readable.
    File::open(&key_file).map_err(|source| ValidationError::UnreadableFile {
        kind: FileKind::KeyFile,
        path: key_file.clone(),
        source,
    })?;

    let text = match non_empty_path(raw.release_notes_file) {
        Some(path) => read_notes_file(path)?,
        None => raw.release_notes,
    };
    let release_notes = ReleaseNotes::new(text).map_err(|err| match err {
        CoreError::ReleaseNotesTooLong { length, max } => {
            ValidationError::ReleaseNotesTooLong { length, max }
        }
        other => ValidationError::Core(other),
    })?;

    let status = raw
        .status
        .parse::<PublishStatus>()
        .map_err(|_| ValidationError::UnknownStatus(raw.status.clone()))?;

    tracing::debug!(
        package = %package_id,
        track = %track,
        %status,
        apk = %apk.display_name(),
        apk_bytes = apk.len(),
        mapping = mapping.is_some(),
        "upload parameters OK"
    );

    Ok(UploadRequest {
        package_id,
        key_file,
        track,
        apk,
        mapping,
        release_notes,
        status,
    })
}

fn required(value: Option<String>, field: Field) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn required_path(value: Option<PathBuf>) -> Result<PathBuf, ValidationError> {
    non_empty_path(value).ok_or(ValidationError::MissingField(Field::KeyFile))
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

fn read_notes_file(path: PathBuf) -> Result<String, ValidationError> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) => return Err(ValidationError::ReleaseNotesFile { path, source }),
    };
    String::from_utf8(bytes).map_err(|_| ValidationError::ReleaseNotesNotUtf8 { path })
}

fn open_upload(path: Option<&Path>, kind: FileKind) -> Result<UploadFile, ValidationError> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Err(ValidationError::UnreadableFile {
            kind,
            path: PathBuf::new(),
            source: io::Error::new(io::ErrorKind::NotFound, "no file given"),
        });
    };
    UploadFile::open(path).map_err(|source| ValidationError::UnreadableFile {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

//! Local files headed for a media upload.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";
pub const MAPPING_CONTENT_TYPE: &str = "application/octet-stream";

/// An open file handle together with its path and size.
///
/// The handle is acquired once, when the inputs are validated, and is moved
/// into the upload request that streams it.
#[derive(Debug)]
pub struct UploadFile {
    path: PathBuf,
    file: File,
    len: u64,
}

impl UploadFile {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened or its metadata
    /// cannot be read, and [`io::ErrorKind::InvalidInput`] for a directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if metadata.is_dir() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "is a directory"));
        }
        Ok(Self {
            path: path.to_path_buf(),
            file,
            len: metadata.len(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for log messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Turn the handle into a streaming request body.
    pub(crate) fn into_body(self) -> reqwest::Body {
        reqwest::Body::from(tokio::fs::File::from_std(self.file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_reads_size_and_name() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("app-release.apk");
        std::fs::write(&path, b"PK\x03\x04fake").expect("write");

        let file = UploadFile::open(&path).unwrap();
        assert_eq!(file.len(), 8);
        assert!(!file.is_empty());
        assert_eq!(file.display_name(), "app-release.apk");
        assert_eq!(file.path(), path);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let err = UploadFile::open(&tmp.path().join("nope.apk")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_is_rejected() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let err = UploadFile::open(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}

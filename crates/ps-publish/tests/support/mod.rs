//! Call-recording `EditsApi` stub and on-disk fixtures shared by the
//! integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ps_core::model::{
    ApkBinary, ApkUpload, AppEdit, DeobfuscationFile, DeobfuscationFilesUploadResponse, Listing,
    ListingsListResponse, Track, TracksListResponse,
};
use ps_play::{EditsApi, PROGUARD_FILE_TYPE, PlayError, UploadFile};
use ps_publish::RawUploadConfig;
use tempfile::TempDir;

pub const EDIT_ID: &str = "edit-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    InsertEdit,
    DeleteEdit,
    ListListings,
    ListTracks,
    UploadApk,
    UploadMapping,
    UpdateTrack,
    Validate,
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InsertEdit,
    DeleteEdit(String),
    ListListings(String),
    ListTracks(String),
    UploadApk { edit_id: String, bytes: u64 },
    UploadMapping { edit_id: String, version_code: i64 },
    UpdateTrack { edit_id: String, track: Track },
    Validate(String),
    Commit(String),
}

impl Call {
    pub const fn op(&self) -> Op {
        match self {
            Self::InsertEdit => Op::InsertEdit,
            Self::DeleteEdit(_) => Op::DeleteEdit,
            Self::ListListings(_) => Op::ListListings,
            Self::ListTracks(_) => Op::ListTracks,
            Self::UploadApk { .. } => Op::UploadApk,
            Self::UploadMapping { .. } => Op::UploadMapping,
            Self::UpdateTrack { .. } => Op::UpdateTrack,
            Self::Validate(_) => Op::Validate,
            Self::Commit(_) => Op::Commit,
        }
    }
}

/// Records every call and fails the operations it is told to fail.
///
/// Clones share one call log, so a test can keep a handle while the
/// workflow owns the stub.
#[derive(Clone)]
pub struct StubApi {
    calls: Arc<Mutex<Vec<Call>>>,
    failing: HashSet<Op>,
    listings: Vec<Listing>,
    upload: ApkUpload,
}

impl StubApi {
    /// One `en-US` listing; uploads come back as version code 42, sha1 `abc123`.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: HashSet::new(),
            listings: vec![Listing {
                language: "en-US".into(),
                title: Some("Example".into()),
            }],
            upload: ApkUpload {
                version_code: 42,
                binary: ApkBinary {
                    sha1: "abc123".into(),
                    sha256: None,
                },
            },
        }
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.insert(op);
        self
    }

    pub fn with_listings(mut self, listings: Vec<Listing>) -> Self {
        self.listings = listings;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.calls().iter().map(Call::op).collect()
    }

    pub fn count(&self, op: Op) -> usize {
        self.ops().into_iter().filter(|o| *o == op).count()
    }

    fn record(&self, call: Call) -> Result<(), PlayError> {
        let op = call.op();
        self.calls.lock().expect("calls lock").push(call);
        if self.failing.contains(&op) {
            return Err(PlayError::Api {
                status: 500,
                message: format!("{op:?} rejected by stub"),
            });
        }
        Ok(())
    }
}

impl EditsApi for StubApi {
    fn package_id(&self) -> &str {
        "com.example.app"
    }

    async fn insert_edit(&self) -> Result<AppEdit, PlayError> {
        self.record(Call::InsertEdit)?;
        Ok(AppEdit {
            id: EDIT_ID.into(),
            expiry_time_seconds: Some("1700003600".into()),
        })
    }

    async fn delete_edit(&self, edit_id: &str) -> Result<(), PlayError> {
        self.record(Call::DeleteEdit(edit_id.into()))
    }

    async fn list_listings(&self, edit_id: &str) -> Result<ListingsListResponse, PlayError> {
        self.record(Call::ListListings(edit_id.into()))?;
        Ok(ListingsListResponse {
            listings: self.listings.clone(),
        })
    }

    async fn list_tracks(&self, edit_id: &str) -> Result<TracksListResponse, PlayError> {
        self.record(Call::ListTracks(edit_id.into()))?;
        Ok(TracksListResponse::default())
    }

    async fn upload_apk(&self, edit_id: &str, apk: UploadFile) -> Result<ApkUpload, PlayError> {
        self.record(Call::UploadApk {
            edit_id: edit_id.into(),
            bytes: apk.len(),
        })?;
        Ok(self.upload.clone())
    }

    async fn upload_deobfuscation_file(
        &self,
        edit_id: &str,
        version_code: i64,
        _mapping: UploadFile,
    ) -> Result<DeobfuscationFilesUploadResponse, PlayError> {
        self.record(Call::UploadMapping {
            edit_id: edit_id.into(),
            version_code,
        })?;
        Ok(DeobfuscationFilesUploadResponse {
            deobfuscation_file: Some(DeobfuscationFile {
                symbol_type: PROGUARD_FILE_TYPE.into(),
            }),
        })
    }

    async fn update_track(&self, edit_id: &str, track: &Track) -> Result<Track, PlayError> {
        self.record(Call::UpdateTrack {
            edit_id: edit_id.into(),
            track: track.clone(),
        })?;
        Ok(track.clone())
    }

    async fn validate_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError> {
        self.record(Call::Validate(edit_id.into()))?;
        Ok(AppEdit {
            id: edit_id.into(),
            expiry_time_seconds: None,
        })
    }

    async fn commit_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError> {
        self.record(Call::Commit(edit_id.into()))?;
        Ok(AppEdit {
            id: edit_id.into(),
            expiry_time_seconds: None,
        })
    }
}

/// Temporary apk, key, and mapping files.
pub struct Files {
    dir: TempDir,
}

impl Files {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tmp dir");
        std::fs::write(dir.path().join("app-release.apk"), b"PK\x03\x04apk-bytes").expect("apk");
        std::fs::write(dir.path().join("key.json"), b"{\"type\":\"service_account\"}")
            .expect("key");
        std::fs::write(dir.path().join("mapping.txt"), b"com.example.A -> a:").expect("mapping");
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    /// A complete, valid set of upload parameters without a mapping file.
    pub fn raw(&self) -> RawUploadConfig {
        RawUploadConfig {
            package_id: Some("com.example.app".into()),
            key_file: Some(self.path("key.json")),
            apk: Some(self.path("app-release.apk")),
            track: Some("internal".into()),
            mapping: None,
            release_notes: "Bug fixes and improvements".into(),
            release_notes_file: None,
            status: "completed".into(),
        }
    }
}

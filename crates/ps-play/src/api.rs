//! The edit-scoped operations of the publisher API.

use ps_core::model::{
    ApkUpload, AppEdit, DeobfuscationFilesUploadResponse, ListingsListResponse, Track,
    TracksListResponse,
};

use crate::error::PlayError;
use crate::media::UploadFile;

/// Deobfuscation file type for ProGuard/R8 mapping files.
pub const PROGUARD_FILE_TYPE: &str = "proguard";

/// Operations on edits of a single package.
///
/// [`crate::PublisherClient`] talks to Google; the publish workflow is written
/// against this trait so it can be driven by a recording stub in tests.
#[allow(async_fn_in_trait)]
pub trait EditsApi {
    /// The package every call is scoped to.
    fn package_id(&self) -> &str;

    async fn insert_edit(&self) -> Result<AppEdit, PlayError>;

    async fn delete_edit(&self, edit_id: &str) -> Result<(), PlayError>;

    async fn list_listings(&self, edit_id: &str) -> Result<ListingsListResponse, PlayError>;

    async fn list_tracks(&self, edit_id: &str) -> Result<TracksListResponse, PlayError>;

    async fn upload_apk(&self, edit_id: &str, apk: UploadFile) -> Result<ApkUpload, PlayError>;

    async fn upload_deobfuscation_file(
        &self,
        edit_id: &str,
        version_code: i64,
        mapping: UploadFile,
    ) -> Result<DeobfuscationFilesUploadResponse, PlayError>;

    async fn update_track(&self, edit_id: &str, track: &Track) -> Result<Track, PlayError>;

    async fn validate_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError>;

    async fn commit_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError>;
}

//! HTTP implementation of [`EditsApi`].

use std::path::Path;
use std::time::Duration;

use ps_auth::{AccessToken, ServiceAccountKey, TokenProvider};
use ps_config::ApiConfig;
use ps_core::model::{
    ApkUpload, AppEdit, DeobfuscationFilesUploadResponse, ListingsListResponse, Track,
    TracksListResponse,
};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::api::{EditsApi, PROGUARD_FILE_TYPE};
use crate::error::PlayError;
use crate::http::check_response;
use crate::media::{APK_CONTENT_TYPE, MAPPING_CONTENT_TYPE, UploadFile};

const API_PATH: &str = "androidpublisher/v3/applications";

/// Authenticated client bound to one package.
pub struct PublisherClient {
    http: reqwest::Client,
    token: AccessToken,
    package_id: String,
    base_url: String,
    upload_base_url: String,
}

impl PublisherClient {
    /// Authenticate with the service-account key at `key_path` and bind the
    /// client to `package_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Http`] if the HTTP client cannot be built and
    /// [`PlayError::Auth`] if the key is unusable or the token request fails.
    pub async fn connect(
        config: &ApiConfig,
        key_path: &Path,
        package_id: &str,
    ) -> Result<Self, PlayError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let key = ServiceAccountKey::from_file(key_path)?;
        tracing::debug!(
            key = %key.path().display(),
            client_email = %key.client_email,
            "service account key loaded"
        );
        let provider = TokenProvider::new(key, http.clone(), config.token_url_override());
        let token = provider.fetch_token().await?;
        tracing::debug!(expires_at = %token.expires_at, "access token acquired");

        Ok(Self::with_token(config, http, token, package_id))
    }

    /// Build a client around an already acquired token.
    #[must_use]
    pub fn with_token(
        config: &ApiConfig,
        http: reqwest::Client,
        token: AccessToken,
        package_id: &str,
    ) -> Self {
        Self {
            http,
            token,
            package_id: package_id.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_base_url: config.upload_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn edits_url(&self) -> String {
        format!(
            "{}/{API_PATH}/{}/edits",
            self.base_url,
            urlencoding::encode(&self.package_id)
        )
    }

    fn edit_url(&self, edit_id: &str) -> String {
        format!("{}/{}", self.edits_url(), urlencoding::encode(edit_id))
    }

    fn upload_edit_url(&self, edit_id: &str) -> String {
        format!(
            "{}/upload/{API_PATH}/{}/edits/{}",
            self.upload_base_url,
            urlencoding::encode(&self.package_id),
            urlencoding::encode(edit_id)
        )
    }

    fn apk_upload_url(&self, edit_id: &str) -> String {
        format!("{}/apks?uploadType=media", self.upload_edit_url(edit_id))
    }

    fn deobfuscation_upload_url(&self, edit_id: &str, version_code: i64) -> String {
        format!(
            "{}/apks/{version_code}/deobfuscationFiles/{PROGUARD_FILE_TYPE}?uploadType=media",
            self.upload_edit_url(edit_id)
        )
    }

    fn track_url(&self, edit_id: &str, track: &str) -> String {
        format!(
            "{}/tracks/{}",
            self.edit_url(edit_id),
            urlencoding::encode(track)
        )
    }

    /// Send an authenticated request and parse the JSON response.
    async fn send_json<T>(&self, request: reqwest::RequestBuilder) -> Result<T, PlayError>
    where
        T: DeserializeOwned + std::fmt::Debug,
    {
        let resp = self.send(request).await?;
        let body = resp.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| {
            PlayError::Parse(format!("{e} in response body: {}", truncate(&body, 200)))
        })?;
        tracing::trace!("<-- {value:?}");
        Ok(value)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, PlayError> {
        let resp = request
            .header(AUTHORIZATION, self.token.authorization())
            .send()
            .await?;
        check_response(resp).await
    }

    /// Google rejects body-less POSTs without an explicit `Content-Length`.
    fn empty_post(&self, url: String) -> reqwest::RequestBuilder {
        self.http.post(url).header(CONTENT_LENGTH, 0)
    }

    fn media_request(
        &self,
        url: String,
        file: UploadFile,
        content_type: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, file.len())
            .body(file.into_body())
    }
}

impl EditsApi for PublisherClient {
    fn package_id(&self) -> &str {
        &self.package_id
    }

    async fn insert_edit(&self) -> Result<AppEdit, PlayError> {
        tracing::debug!(package = %self.package_id, "inserting edit");
        self.send_json(self.http.post(self.edits_url()).json(&AppEdit::default()))
            .await
    }

    async fn delete_edit(&self, edit_id: &str) -> Result<(), PlayError> {
        tracing::debug!(edit_id, "deleting edit");
        self.send(self.http.delete(self.edit_url(edit_id))).await?;
        Ok(())
    }

    async fn list_listings(&self, edit_id: &str) -> Result<ListingsListResponse, PlayError> {
        tracing::debug!(edit_id, "fetching listings");
        self.send_json(self.http.get(format!("{}/listings", self.edit_url(edit_id))))
            .await
    }

    async fn list_tracks(&self, edit_id: &str) -> Result<TracksListResponse, PlayError> {
        tracing::debug!(edit_id, "fetching tracks");
        self.send_json(self.http.get(format!("{}/tracks", self.edit_url(edit_id))))
            .await
    }

    async fn upload_apk(&self, edit_id: &str, apk: UploadFile) -> Result<ApkUpload, PlayError> {
        tracing::debug!(file = %apk.display_name(), bytes = apk.len(), "uploading apk file");
        let request = self.media_request(self.apk_upload_url(edit_id), apk, APK_CONTENT_TYPE);
        self.send_json(request).await
    }

    async fn upload_deobfuscation_file(
        &self,
        edit_id: &str,
        version_code: i64,
        mapping: UploadFile,
    ) -> Result<DeobfuscationFilesUploadResponse, PlayError> {
        tracing::debug!(
            file = %mapping.display_name(),
            version_code,
            "uploading deobfuscation file"
        );
        let request = self.media_request(
            self.deobfuscation_upload_url(edit_id, version_code),
            mapping,
            MAPPING_CONTENT_TYPE,
        );
        self.send_json(request).await
    }

    async fn update_track(&self, edit_id: &str, track: &Track) -> Result<Track, PlayError> {
        tracing::debug!(edit_id, track = %track.track, "updating track");
        tracing::trace!("--> {track:?}");
        self.send_json(self.http.put(self.track_url(edit_id, &track.track)).json(track))
            .await
    }

    async fn validate_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError> {
        tracing::debug!(edit_id, "validating edit");
        self.send_json(self.empty_post(format!("{}:validate", self.edit_url(edit_id))))
            .await
    }

    async fn commit_edit(&self, edit_id: &str) -> Result<AppEdit, PlayError> {
        tracing::debug!(edit_id, "committing edit");
        self.send_json(self.empty_post(format!("{}:commit", self.edit_url(edit_id))))
            .await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

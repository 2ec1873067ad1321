//! Wire model for the Android Publisher API v3.
//!
//! Only the fields pspublisher reads or writes are modelled. Unknown fields in
//! responses are ignored by serde.

use serde::{Deserialize, Serialize};

use crate::enums::PublishStatus;
use crate::notes::ReleaseNotes;

// ── Edits ──────────────────────────────────────────────────────────

/// An edit as returned by `edits.insert`, `edits.validate` and `edits.commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time_seconds: Option<String>,
}

// ── Listings ───────────────────────────────────────────────────────

/// A localized store listing. Only the language matters to the upload flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingsListResponse {
    /// Absent when the package has no listings yet.
    #[serde(default)]
    pub listings: Vec<Listing>,
}

// ── APKs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApkBinary {
    #[serde(default)]
    pub sha1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Result of `edits.apks.upload`. The version code is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkUpload {
    pub version_code: i64,
    #[serde(default)]
    pub binary: ApkBinary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeobfuscationFile {
    pub symbol_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeobfuscationFilesUploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deobfuscation_file: Option<DeobfuscationFile>,
}

// ── Tracks ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub language: String,
    pub text: String,
}

impl LocalizedText {
    #[must_use]
    pub fn new(language: impl Into<String>, notes: &ReleaseNotes) -> Self {
        Self {
            language: language.into(),
            text: notes.as_str().to_string(),
        }
    }
}

/// One release on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: PublishStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub release_notes: Vec<LocalizedText>,
    #[serde(default, with = "int64_strings")]
    pub version_codes: Vec<i64>,
}

impl TrackRelease {
    /// A release of a single version code with notes in a single language.
    #[must_use]
    pub fn single(version_code: i64, status: PublishStatus, notes: LocalizedText) -> Self {
        Self {
            name: None,
            status,
            release_notes: vec![notes],
            version_codes: vec![version_code],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub track: String,
    #[serde(default)]
    pub releases: Vec<TrackRelease>,
}

impl Track {
    /// A track whose release list is replaced by exactly `release`.
    #[must_use]
    pub fn with_release(track: impl Into<String>, release: TrackRelease) -> Self {
        Self {
            track: track.into(),
            releases: vec![release],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracksListResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// The API encodes `int64` arrays as JSON strings (`["42"]`). Numbers are
/// accepted on input as well.
mod int64_strings {
    use serde::{Deserialize, Deserializer, Serializer, de, ser::SerializeSeq};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64Repr {
        Number(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(values: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
        Vec::<Int64Repr>::deserialize(deserializer)?
            .into_iter()
            .map(|repr| match repr {
                Int64Repr::Number(value) => Ok(value),
                Int64Repr::Text(text) => text
                    .parse()
                    .map_err(|_| de::Error::custom(format!("invalid int64 string: {text}"))),
            })
            .collect()
    }
}

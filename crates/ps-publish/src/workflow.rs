//! The publish transaction: create an edit, run every step in order, and
//! either commit it or delete it.

use std::future::Future;
use std::path::PathBuf;

use ps_core::PublishStatus;
use ps_core::model::{LocalizedText, Track, TrackRelease};
use ps_play::{EditsApi, PlayError};
use serde::Serialize;

use crate::edit::EditSession;
use crate::error::{PublishError, Step, StepFailure};
use crate::validate::{RawUploadConfig, UploadRequest, validate};

/// Settings that come from configuration rather than the command line.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Release notes language used when the package has no store listings.
    pub fallback_language: Option<String>,
}

/// Summary of a committed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReceipt {
    pub package_id: String,
    pub edit_id: String,
    pub track: String,
    pub version_code: i64,
    pub sha1: String,
    pub status: PublishStatus,
    pub language: String,
    pub mapping_uploaded: bool,
}

/// Validate `raw`, open a session with `connect`, and publish.
///
/// `connect` receives the package id and key path and is only called once
/// validation has passed.
///
/// # Errors
///
/// [`PublishError::Validation`] before any remote call,
/// [`PublishError::Session`] when `connect` fails, and whatever
/// [`publish`] returns after that.
pub async fn upload<A, F, Fut>(
    raw: RawUploadConfig,
    options: &PublishOptions,
    connect: F,
) -> Result<PublishReceipt, PublishError>
where
    A: EditsApi,
    F: FnOnce(String, PathBuf) -> Fut,
    Fut: Future<Output = Result<A, PlayError>>,
{
    let request = validate(raw)?;

    tracing::info!("Creating new service...");
    let api = connect(request.package_id.clone(), request.key_file.clone())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to create publisher service");
            PublishError::Session(err)
        })?;
    tracing::info!("Service OK");

    publish(&api, request, options).await
}

/// Run the edit transaction for a validated request.
///
/// Any failure after the edit exists triggers exactly one delete of that
/// edit; the delete result is carried in [`PublishError::Aborted`].
///
/// # Errors
///
/// [`PublishError::CreateEdit`] if no edit could be opened, otherwise
/// [`PublishError::Aborted`] naming the failed step.
pub async fn publish<A: EditsApi>(
    api: &A,
    request: UploadRequest,
    options: &PublishOptions,
) -> Result<PublishReceipt, PublishError> {
    tracing::info!("Creating new edit...");
    tracing::debug!(package = api.package_id(), track = %request.track, "publishing");
    let mut session = EditSession::open(api).await.map_err(|err| {
        tracing::error!(error = %err, "failed to insert edit");
        PublishError::CreateEdit(err)
    })?;
    tracing::info!("Edit {} OK", session.id());

    match run_steps(&mut session, request, options).await {
        Ok(receipt) => Ok(receipt),
        Err((step, failure)) => {
            tracing::error!(error = %failure, "Failed to {step}");
            let rollback = session.rollback().await;
            Err(PublishError::Aborted {
                edit_id: session.id().to_string(),
                step,
                failure,
                rollback,
            })
        }
    }
}

async fn run_steps<A: EditsApi>(
    session: &mut EditSession<'_, A>,
    request: UploadRequest,
    options: &PublishOptions,
) -> Result<PublishReceipt, (Step, StepFailure)> {
    let UploadRequest {
        package_id,
        track,
        apk,
        mapping,
        release_notes,
        status,
        ..
    } = request;

    tracing::info!("Getting app listings...");
    let language = session
        .fetch_language(options.fallback_language.as_deref())
        .await
        .map_err(|f| (Step::FetchListings, f))?;
    tracing::debug!(%language, "release notes language");

    tracing::info!("Uploading APK...");
    let uploaded = session
        .upload_apk(apk)
        .await
        .map_err(|f| (Step::UploadArtifact, f))?;
    tracing::info!("APK upload {} OK", uploaded.binary.sha1);
    tracing::debug!(version_code = uploaded.version_code, "version code assigned");

    let mapping_uploaded = mapping.is_some();
    if let Some(mapping) = mapping {
        tracing::info!("Uploading mapping file...");
        session
            .upload_mapping(uploaded.version_code, mapping)
            .await
            .map_err(|f| (Step::UploadMapping, f))?;
        tracing::info!("Mapping upload OK");
    }

    tracing::info!("Update track...");
    let release = TrackRelease::single(
        uploaded.version_code,
        status,
        LocalizedText::new(language.as_str(), &release_notes),
    );
    let updated = session
        .update_track(&Track::with_release(track.as_str(), release))
        .await
        .map_err(|f| (Step::UpdateTrack, f))?;
    tracing::info!("Track {} update OK", updated.track);

    tracing::info!("Validate changes...");
    session
        .validate()
        .await
        .map_err(|f| (Step::Validate, f))?;
    tracing::info!("Validation OK");

    tracing::info!("Committing changes...");
    session.commit().await.map_err(|f| (Step::Commit, f))?;
    tracing::info!("Commit OK");

    Ok(PublishReceipt {
        package_id,
        edit_id: session.id().to_string(),
        track,
        version_code: uploaded.version_code,
        sha1: uploaded.binary.sha1,
        status,
        language,
        mapping_uploaded,
    })
}

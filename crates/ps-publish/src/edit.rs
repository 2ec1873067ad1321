//! One edit transaction and its lifecycle.

use ps_core::model::{ApkUpload, AppEdit, Track};
use ps_core::{CoreError, EditState};
use ps_play::{EditsApi, PlayError, UploadFile};

use crate::error::{RollbackOutcome, StepFailure};

/// An open edit plus the state it has reached.
///
/// Every remote step advances the state only after the call succeeds, and
/// checks the transition first, so a committed or deleted edit is never
/// sent another request.
pub struct EditSession<'a, A: EditsApi> {
    api: &'a A,
    id: String,
    state: EditState,
}

impl<'a, A: EditsApi> EditSession<'a, A> {
    /// Insert a new edit for the api's package.
    ///
    /// # Errors
    ///
    /// Returns the [`PlayError`] from `edits.insert`, or a parse error when
    /// the server answers without an edit id.
    pub async fn open(api: &'a A) -> Result<Self, PlayError> {
        let edit = api.insert_edit().await?;
        if edit.id.is_empty() {
            return Err(PlayError::Parse("edit created without an id".into()));
        }
        Ok(Self {
            api,
            id: edit.id,
            state: EditState::Created,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn state(&self) -> EditState {
        self.state
    }

    fn check(&self, next: EditState) -> Result<(), CoreError> {
        if self.state.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                edit_id: self.id.clone(),
                from: self.state.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Language of the first store listing, or `fallback` when there are none.
    ///
    /// # Errors
    ///
    /// [`StepFailure::NoListings`] when the package has no listings and no
    /// fallback is configured.
    pub async fn fetch_language(&mut self, fallback: Option<&str>) -> Result<String, StepFailure> {
        self.check(EditState::ListingsFetched)?;
        let response = self.api.list_listings(&self.id).await?;
        tracing::debug!(count = response.listings.len(), "listings fetched");
        let language = match response.listings.into_iter().next() {
            Some(listing) => listing.language,
            None => {
                let fallback = fallback.ok_or(StepFailure::NoListings)?;
                tracing::debug!(language = fallback, "no listings, using fallback language");
                fallback.to_string()
            }
        };
        self.state = EditState::ListingsFetched;
        Ok(language)
    }

    /// # Errors
    ///
    /// Returns the remote failure or an invalid transition.
    pub async fn upload_apk(&mut self, apk: UploadFile) -> Result<ApkUpload, StepFailure> {
        self.check(EditState::ArtifactUploaded)?;
        let upload = self.api.upload_apk(&self.id, apk).await?;
        self.state = EditState::ArtifactUploaded;
        Ok(upload)
    }

    /// Attach a ProGuard/R8 mapping to `version_code`.
    ///
    /// # Errors
    ///
    /// Returns the remote failure or an invalid transition.
    pub async fn upload_mapping(
        &mut self,
        version_code: i64,
        mapping: UploadFile,
    ) -> Result<(), StepFailure> {
        self.check(EditState::MappingUploaded)?;
        self.api
            .upload_deobfuscation_file(&self.id, version_code, mapping)
            .await?;
        self.state = EditState::MappingUploaded;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the remote failure or an invalid transition.
    pub async fn update_track(&mut self, track: &Track) -> Result<Track, StepFailure> {
        self.check(EditState::TrackUpdated)?;
        let updated = self.api.update_track(&self.id, track).await?;
        self.state = EditState::TrackUpdated;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the remote failure or an invalid transition.
    pub async fn validate(&mut self) -> Result<AppEdit, StepFailure> {
        self.check(EditState::Validated)?;
        let edit = self.api.validate_edit(&self.id).await?;
        self.state = EditState::Validated;
        Ok(edit)
    }

    /// # Errors
    ///
    /// Returns the remote failure or an invalid transition.
    pub async fn commit(&mut self) -> Result<AppEdit, StepFailure> {
        self.check(EditState::Committed)?;
        let edit = self.api.commit_edit(&self.id).await?;
        self.state = EditState::Committed;
        Ok(edit)
    }

    /// Delete the edit. Sends at most one delete; the session is rolled back
    /// afterwards whether or not the server accepted it.
    pub async fn rollback(&mut self) -> RollbackOutcome {
        if self.state.is_terminal() {
            return RollbackOutcome::Skipped(self.state);
        }
        tracing::info!("Deleting edit {}...", self.id);
        let result = self.api.delete_edit(&self.id).await;
        self.state = EditState::RolledBack;
        match result {
            Ok(()) => {
                tracing::info!("Delete {} OK", self.id);
                RollbackOutcome::Deleted
            }
            Err(err) => {
                tracing::error!(error = %err, edit_id = %self.id, "failed to delete edit");
                RollbackOutcome::Failed(err)
            }
        }
    }
}

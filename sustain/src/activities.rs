//! In-memory activity log synchronized with the backend.

use crate::types::{Activity, ActivityDraft};
use crate::{Error, SustainClient};
use std::sync::Arc;

/// Whether the user approved an irreversible remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Denied,
}

/// Maintains the signed-in user's activities, in backend order
/// (freshest first, never re-sorted client-side).
pub struct ActivityLog {
    client: Arc<SustainClient>,
    activities: Vec<Activity>,
}

impl ActivityLog {
    #[must_use]
    pub fn new(client: Arc<SustainClient>) -> Self {
        Self {
            client,
            activities: Vec::new(),
        }
    }

    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Replaces the list wholesale with the backend's current one, so it
    /// reflects exactly what the backend has persisted. On failure the
    /// previous list is left untouched and no retry is attempted.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.activities = self.client.activities().await?;
        Ok(())
    }

    /// Validates the draft and logs it. A draft failing local validation is
    /// rejected before any backend call is made. The in-memory list is not
    /// touched here; mutation handlers follow a successful create with an
    /// explicit [`refresh`](Self::refresh).
    ///
    /// # Errors
    /// Returns a validation error for an incomplete draft, or the backend's
    /// error for a rejected create.
    pub async fn create(&self, draft: &ActivityDraft) -> Result<Activity, Error> {
        let request = draft.validate()?;
        self.client.create_activity(&request).await
    }

    /// Deletes an activity, but only with the user's confirmation; `Denied`
    /// returns `false` without issuing any backend call. On success the item
    /// is removed from the in-memory list by id, with no refetch since
    /// deletion is a pure subtraction. On failure the list is unchanged.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the delete.
    pub async fn delete(&mut self, id: i64, confirmation: Confirmation) -> Result<bool, Error> {
        if confirmation == Confirmation::Denied {
            return Ok(false);
        }
        self.client.delete_activity(id).await?;
        self.activities.retain(|activity| activity.id != id);
        Ok(true)
    }
}

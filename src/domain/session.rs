// SPDX-License-Identifier: MPL-2.0
//! Session and saved-viewer value types.

use std::fmt;

/// The signed-in user as seen by the application.
///
/// The editor only observes whether an identity exists; the fields are for
/// the gateway that owns the session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    user_id: String,
    email: Option<String>,
    access_token: String,
}

impl SessionIdentity {
    #[must_use]
    pub fn new(user_id: String, email: Option<String>, access_token: String) -> Self {
        Self {
            user_id,
            email,
            access_token,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}

// Keeps the bearer token out of logs.
impl fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Notification sent to session listeners whenever the session changes.
///
/// A sign-in that fails after the browser was opened is reported here too,
/// with `login_error` set and the session left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub identity: Option<SessionIdentity>,
    pub login_error: Option<String>,
}

impl SessionChange {
    #[must_use]
    pub fn new(identity: Option<SessionIdentity>) -> Self {
        Self {
            identity,
            login_error: None,
        }
    }

    #[must_use]
    pub fn login_failed(identity: Option<SessionIdentity>, reason: impl Into<String>) -> Self {
        Self {
            identity,
            login_error: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

/// Viewer state handed to the gateway by the editor on save.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    /// Image encoded as a `data:` URL.
    pub image_data: String,
    pub scale: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub enhancement_level: u8,
}

impl ViewerSnapshot {
    /// Attaches the owning user to produce the persisted record.
    #[must_use]
    pub fn into_record(self, user_id: &str) -> SavedViewerRecord {
        SavedViewerRecord {
            user_id: user_id.to_owned(),
            image_data: self.image_data,
            scale: self.scale,
            position_x: self.position_x,
            position_y: self.position_y,
            enhancement_level: self.enhancement_level,
        }
    }
}

/// One row of the saved-images collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedViewerRecord {
    pub user_id: String,
    pub image_data: String,
    pub scale: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub enhancement_level: u8,
}

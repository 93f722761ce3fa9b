use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Persisted user record.
///
/// Deliberately not `Serialize`: the digest must never leave the service.
/// Convert to [`ProfileView`] for anything outward.
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub goal: String,
    pub profile_img: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("goal", &self.goal)
            .field("profile_img", &self.profile_img)
            .field("password_digest", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// Fields for a record about to be created; the store assigns id and timestamps
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub goal: String,
    pub profile_img: String,
    pub password_digest: String,
}

/// Partial update applied by `update_by_id`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub goal: Option<String>,
    pub profile_img: Option<String>,
    pub password_digest: Option<String>,
}

impl UserUpdate {
    pub fn password(digest: String) -> Self {
        Self {
            password_digest: Some(digest),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.goal.is_none()
            && self.profile_img.is_none()
            && self.password_digest.is_none()
    }
}

/// Profile fields a caller may change. The password is not one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub goal: Option<String>,
    pub profile_img: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.goal.is_none() && self.profile_img.is_none()
    }
}

impl From<ProfileChanges> for UserUpdate {
    fn from(changes: ProfileChanges) -> Self {
        Self {
            email: changes.email,
            name: changes.name,
            goal: changes.goal,
            profile_img: changes.profile_img,
            password_digest: None,
        }
    }
}

/// The subset of a user record that may be returned to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub email: String,
    pub name: String,
    pub goal: String,
    pub profile_img: String,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            goal: user.goal.clone(),
            profile_img: user.profile_img.clone(),
        }
    }
}

// Request bodies. None of these derive `Debug`, they all carry secrets.

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub goal: String,
    pub profile_img: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub token: String,
    #[serde(flatten)]
    pub changes: ProfileChanges,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub token: String,
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Success payload of register, login and profile update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthPayload {
    pub profile: ProfileView,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    pub message: String,
}

impl MessagePayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo::User;

/// Input for registration. Callers trim and validate first (see
/// [`super::SignupForm`]); `register` stores these verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for login.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Input for a profile update. Only the display name is mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
}

/// Public part of a user record, without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

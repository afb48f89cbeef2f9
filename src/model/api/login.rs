use serde::{Deserialize, Serialize};

use crate::model::{
    db::profile::{Profile, Role},
    mongodb::Id,
};

/// Raw login credentials, received from a user. Never stored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Profile data returned to the client after login or session restore. The
/// client routes on `role` and renders the voting state from `has_voted`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub uid: Id,
    pub name: String,
    pub nim: String,
    pub username: String,
    pub role: Role,
    pub has_voted: bool,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            uid: profile.id,
            name: profile.profile.name,
            nim: profile.profile.nim,
            username: profile.profile.username,
            role: profile.profile.role,
            has_voted: profile.profile.has_voted,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl LoginRequest {
        /// Matches [`crate::model::db::account::AccountCore::example_admin`].
        pub fn example_admin() -> Self {
            Self {
                username: "koordinator".to_string(),
                password: "rahasia-panitia".to_string(),
            }
        }

        /// Matches [`crate::model::db::account::AccountCore::example_voter`].
        pub fn example_voter() -> Self {
            Self {
                username: "alice".to_string(),
                password: "pilih-socrates".to_string(),
            }
        }
    }
}

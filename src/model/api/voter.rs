use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Body of `POST /api/admin/create-voter`.
///
/// Missing fields deserialize as empty and fail validation, so the endpoint
/// answers 400 rather than a generic parse failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateVoterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nim: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CreateVoterRequest {
    /// All four fields are required.
    pub fn is_complete(&self) -> bool {
        !(self.name.is_empty()
            || self.nim.is_empty()
            || self.username.is_empty()
            || self.password.is_empty())
    }
}

/// Body of `POST /api/admin/update-voter`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateVoterRequest {
    #[serde(default)]
    pub uid: Option<Id>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nim: String,
    #[serde(default)]
    pub username: String,
}

impl UpdateVoterRequest {
    /// All three profile fields are required; `uid` is checked separately.
    pub fn is_complete(&self) -> bool {
        !(self.name.is_empty() || self.nim.is_empty() || self.username.is_empty())
    }
}

/// Body of `POST /api/admin/delete-voter`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteVoterRequest {
    #[serde(default)]
    pub uid: Option<Id>,
}

/// The `{"ok": true}` acknowledgement the admin endpoints answer with.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledge {
    pub ok: bool,
}

impl Acknowledge {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CreateVoterRequest {
        pub fn example() -> Self {
            Self {
                name: "Bob".to_string(),
                nim: "123".to_string(),
                username: "bob".to_string(),
                password: "x".to_string(),
            }
        }
    }
}

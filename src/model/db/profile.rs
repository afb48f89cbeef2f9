use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// The role stored on a profile. Fixed at creation; there is no promotion
/// flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Voter,
}

/// Core profile data, as stored in the `users` collection.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCore {
    /// Display name.
    pub name: String,
    /// Institution ID number.
    pub nim: String,
    /// Human-chosen username. The login identifier is derived from this at
    /// account creation and does not follow later edits.
    pub username: String,
    pub role: Role,
    /// The sole voting-state flag.
    pub has_voted: bool,
}

impl ProfileCore {
    /// A fresh voter profile.
    pub fn voter(name: String, nim: String, username: String) -> Self {
        Self {
            name,
            nim,
            username,
            role: Role::Voter,
            has_voted: false,
        }
    }

    /// A fresh admin profile.
    pub fn admin(name: String, nim: String, username: String) -> Self {
        Self {
            name,
            nim,
            username,
            role: Role::Admin,
            has_voted: false,
        }
    }
}

/// A profile record from the database. Its ID equals the owning identity
/// account's ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub profile: ProfileCore,
}

impl Deref for Profile {
    type Target = ProfileCore;

    fn deref(&self) -> &Self::Target {
        &self.profile
    }
}

impl DerefMut for Profile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.profile
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ProfileCore {
        pub fn example_admin() -> Self {
            Self::admin(
                "Koordinator KPU".to_string(),
                "0001".to_string(),
                "koordinator".to_string(),
            )
        }

        pub fn example_voter() -> Self {
            Self::voter(
                "Alice Wijaya".to_string(),
                "2101234567".to_string(),
                "alice".to_string(),
            )
        }
    }
}

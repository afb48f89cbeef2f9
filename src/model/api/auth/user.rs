use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::model::db::profile::Role;

/// A marker for the access level a route requires. Uninhabited: these types
/// only ever appear as the parameter of [`super::AuthToken`].
pub trait User: Send {
    /// The rights a token must carry to act as this user type.
    const RIGHTS: Rights;
}

/// Admin-level access.
pub enum Admin {}

/// Voter-level access.
pub enum Voter {}

impl User for Admin {
    const RIGHTS: Rights = Rights::Admin;
}

impl User for Voter {
    const RIGHTS: Rights = Rights::Voter;
}

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Voter = 0,
    Admin = 1,
}

impl From<Role> for Rights {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Voter => Self::Voter,
        }
    }
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Admin => "admin",
            }
        )
    }
}

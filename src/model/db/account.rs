use std::ops::{Deref, DerefMut};

use mongodb::{bson::doc, error::Error as DbError, Database};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::model::{
    db::profile::{Profile, ProfileCore},
    mongodb::{Coll, Id},
};

/// Domain suffix appended to usernames to form login identifiers.
/// Not a routable mailbox; the account store just wants an email shape.
pub const LOGIN_SUFFIX: &str = "@evote.local";

/// The synthetic login identifier for a username.
pub fn login_email(username: &str) -> String {
    format!("{username}{LOGIN_SUFFIX}")
}

/// Core identity account data: the credential side of a user, stored apart
/// from their profile record.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCore {
    /// Synthetic login identifier, unique across accounts.
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

impl AccountCore {
    /// Create an account for the given username, hashing the password.
    pub fn new(username: &str, display_name: String, password: &str) -> Self {
        Self {
            email: login_email(username),
            display_name,
            password_hash: hash_password(password),
        }
    }

    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> bool {
        // Unwrap safe: accounts are only created through `hash_password`,
        // so the stored hash is always well-formed.
        argon2::verify_encoded(&self.password_hash, password.as_ref()).unwrap()
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> String {
    // 16 bytes is the recommended salt size for argon2:
    //  https://en.wikipedia.org/wiki/Argon2
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill(&mut salt);
    argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default()).unwrap() // The default `Config` is valid.
}

/// An account without an ID.
pub type NewAccount = AccountCore;

/// An identity account from the database, with its unique ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub account: AccountCore,
}

impl Deref for Account {
    type Target = AccountCore;

    fn deref(&self) -> &Self::Target {
        &self.account
    }
}

impl DerefMut for Account {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.account
    }
}

/// Ensure there is at least one admin, creating one from the configured
/// default credentials if the `users` collection holds no admin profile.
///
/// This operation is idempotent.
pub async fn ensure_admin_exists(db: &Database, config: &Config) -> Result<(), DbError> {
    let profiles = Coll::<Profile>::from_db(db);
    if profiles
        .find_one(doc! { "role": "admin" }, None)
        .await?
        .is_some()
    {
        return Ok(());
    }

    info!("No admin profile found, creating the default admin");
    let username = config.default_admin_username();
    let account = NewAccount::new(
        username,
        username.to_string(),
        config.default_admin_password(),
    );
    let account_id: Id = Coll::<NewAccount>::from_db(db)
        .insert_one(&account, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    let profile = Profile {
        id: account_id,
        profile: ProfileCore::admin(
            username.to_string(),
            String::new(),
            username.to_string(),
        ),
    };
    profiles.insert_one(&profile, None).await?;

    Ok(())
}

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core candidate data, as stored in the database. The statement fields
/// keep the stored document names the admin tooling already uses.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCore {
    pub name: String,
    /// Institution ID number.
    pub nim: String,
    /// Vision statement.
    #[serde(rename = "visi")]
    pub vision: String,
    /// Mission statement.
    #[serde(rename = "misi")]
    pub mission: String,
    /// Flagship programme text.
    #[serde(rename = "programUnggulan")]
    pub platform: String,
    /// Optional photo URL, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A candidate without an ID.
pub type NewCandidate = CandidateCore;

/// A candidate from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateCore {
        pub fn example1() -> Self {
            Self {
                name: "Budi Santoso".to_string(),
                nim: "2101111111".to_string(),
                vision: "Himpunan yang terbuka".to_string(),
                mission: "Membuka forum bulanan".to_string(),
                platform: "Mentoring lintas angkatan".to_string(),
                photo_url: Some("https://example.org/budi.jpg".to_string()),
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Citra Lestari".to_string(),
                nim: "2102222222".to_string(),
                vision: "Organisasi berbasis data".to_string(),
                mission: "Transparansi anggaran".to_string(),
                platform: "Dashboard kegiatan terbuka".to_string(),
                photo_url: None,
            }
        }
    }
}

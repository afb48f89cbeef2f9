use serde::{Deserialize, Serialize};

use crate::model::{
    db::candidate::{Candidate, NewCandidate},
    mongodb::Id,
};

/// A candidate profile as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nim: String,
    #[serde(default, rename = "visi")]
    pub vision: String,
    #[serde(default, rename = "misi")]
    pub mission: String,
    #[serde(default, rename = "programUnggulan")]
    pub platform: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl CandidateSpec {
    /// Everything except the photo is required.
    pub fn is_complete(&self) -> bool {
        !(self.name.is_empty()
            || self.nim.is_empty()
            || self.vision.is_empty()
            || self.mission.is_empty()
            || self.platform.is_empty())
    }
}

impl From<CandidateSpec> for NewCandidate {
    fn from(spec: CandidateSpec) -> Self {
        Self {
            name: spec.name,
            nim: spec.nim,
            vision: spec.vision,
            mission: spec.mission,
            platform: spec.platform,
            photo_url: spec.photo_url,
        }
    }
}

/// A candidate as returned to clients.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDescription {
    pub id: Id,
    pub name: String,
    pub nim: String,
    #[serde(rename = "visi")]
    pub vision: String,
    #[serde(rename = "misi")]
    pub mission: String,
    #[serde(rename = "programUnggulan")]
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<Candidate> for CandidateDescription {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.candidate.name,
            nim: candidate.candidate.nim,
            vision: candidate.candidate.vision,
            mission: candidate.candidate.mission,
            platform: candidate.candidate.platform,
            photo_url: candidate.candidate.photo_url,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;
    use crate::model::db::candidate::CandidateCore;

    impl CandidateSpec {
        pub fn example1() -> Self {
            CandidateCore::example1().into()
        }

        pub fn example2() -> Self {
            CandidateCore::example2().into()
        }
    }

    impl From<CandidateCore> for CandidateSpec {
        fn from(core: CandidateCore) -> Self {
            Self {
                name: core.name,
                nim: core.nim,
                vision: core.vision,
                mission: core.mission,
                platform: core.platform,
                photo_url: core.photo_url,
            }
        }
    }
}

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core vote data, as stored in the database. Created once by the voter
/// flow; never updated, only cascade-deleted with its voter.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteCore {
    /// The voter who cast this vote. Unique-indexed: the database enforces
    /// at most one vote per voter.
    pub voter_id: Id,
    /// The chosen candidate. May dangle if the candidate is later deleted.
    pub candidate_id: Id,
    pub created_at: DateTime<Utc>,
}

impl VoteCore {
    /// A vote cast now.
    pub fn new(voter_id: Id, candidate_id: Id) -> Self {
        Self {
            voter_id,
            candidate_id,
            created_at: Utc::now(),
        }
    }
}

/// A vote without an ID.
pub type NewVote = VoteCore;

/// A vote record from the database, with its unique ID.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub vote: VoteCore,
}

impl Deref for Vote {
    type Target = VoteCore;

    fn deref(&self) -> &Self::Target {
        &self.vote
    }
}

impl DerefMut for Vote {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vote
    }
}

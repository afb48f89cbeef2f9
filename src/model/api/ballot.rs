use serde::{Deserialize, Serialize};

/// Outcome of a cast request.
///
/// "Already voted" is an informational status, not an error: the client
/// shows it as a message next to the disabled vote button.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVoteResponse {
    pub status: CastVoteStatus,
}

impl CastVoteResponse {
    pub const fn recorded() -> Self {
        Self {
            status: CastVoteStatus::Recorded,
        }
    }

    pub const fn already_voted() -> Self {
        Self {
            status: CastVoteStatus::AlreadyVoted,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CastVoteStatus {
    /// The vote was written and the voter's flag set.
    Recorded,
    /// A vote for this voter already exists; nothing was written.
    AlreadyVoted,
}

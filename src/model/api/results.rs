use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    db::{candidate::Candidate, vote::Vote},
    mongodb::Id,
};

/// The fixed CSV header of the results export.
pub const CSV_HEADER: &str = "Nama Kandidat,Suara";

/// One tally table row.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyRow {
    pub candidate_id: Id,
    pub name: String,
    pub votes: u64,
}

/// Complete election results: one row per candidate, in candidate order.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    pub rows: Vec<TallyRow>,
    /// Sum of the per-candidate counts. Votes whose candidate no longer
    /// exists are not represented here.
    pub total_votes: u64,
}

impl ElectionResults {
    /// Tally votes per candidate with a frequency map. Rows are keyed off
    /// the candidate list, so votes for deleted candidates count nowhere.
    pub fn tally(candidates: Vec<Candidate>, votes: &[Vote]) -> Self {
        let mut counts: HashMap<Id, u64> = HashMap::new();
        for vote in votes {
            *counts.entry(vote.candidate_id).or_insert(0) += 1;
        }

        let rows = candidates
            .into_iter()
            .map(|candidate| TallyRow {
                votes: counts.get(&candidate.id).copied().unwrap_or(0),
                candidate_id: candidate.id,
                name: candidate.candidate.name,
            })
            .collect::<Vec<_>>();
        let total_votes = rows.iter().map(|row| row.votes).sum();

        Self { rows, total_votes }
    }

    /// Render the download CSV: the fixed header, then one `name,count`
    /// line per candidate. The format is what the existing export
    /// consumers expect; fields are not quoted.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&row.name);
            csv.push(',');
            csv.push_str(&row.votes.to_string());
            csv.push('\n');
        }
        csv
    }
}

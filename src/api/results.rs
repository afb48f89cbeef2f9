use rocket::{futures::TryStreamExt, http::Header, serde::json::Json, Route};

use crate::{
    error::Result,
    model::{
        api::{
            auth::{Admin, AuthToken},
            results::ElectionResults,
        },
        db::{candidate::Candidate, vote::Vote},
        mongodb::Coll,
    },
};

pub fn routes() -> Vec<Route> {
    routes![get_results, export_results_csv]
}

#[get("/api/admin/results")]
async fn get_results(
    _token: AuthToken<Admin>,
    candidates: Coll<Candidate>,
    votes: Coll<Vote>,
) -> Result<Json<ElectionResults>> {
    Ok(Json(load_results(&candidates, &votes).await?))
}

#[get("/api/admin/results/csv")]
async fn export_results_csv(
    _token: AuthToken<Admin>,
    candidates: Coll<Candidate>,
    votes: Coll<Vote>,
) -> Result<CsvDownload> {
    let results = load_results(&candidates, &votes).await?;
    Ok(CsvDownload::new(results.to_csv()))
}

/// Snapshot both collections and tally in memory. Results are per-request
/// snapshots; there is no live updating.
async fn load_results(
    candidates: &Coll<Candidate>,
    votes: &Coll<Vote>,
) -> Result<ElectionResults> {
    let candidates: Vec<Candidate> = candidates.find(None, None).await?.try_collect().await?;
    let votes: Vec<Vote> = votes.find(None, None).await?.try_collect().await?;
    Ok(ElectionResults::tally(candidates, &votes))
}

/// The tally as a CSV attachment.
#[derive(Responder)]
#[response(content_type = "text/csv")]
pub struct CsvDownload {
    csv: String,
    disposition: Header<'static>,
}

impl CsvDownload {
    fn new(csv: String) -> Self {
        Self {
            csv,
            disposition: Header::new(
                "Content-Disposition",
                "attachment; filename=\"hasil-voting.csv\"",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::Database;
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json,
    };

    use crate::model::{
        api::results::CSV_HEADER,
        db::{
            candidate::NewCandidate,
            vote::NewVote,
        },
        mongodb::Id,
    };

    use super::*;

    #[backend_test(admin)]
    async fn results_count_per_candidate_including_zero(client: Client, db: Database) {
        let (first, second) = insert_candidates(&db).await;
        insert_votes(&db, first, 3).await;

        let results = fetch_results(&client).await;

        assert_eq!(2, results.rows.len());
        assert_eq!(first, results.rows[0].candidate_id);
        assert_eq!(3, results.rows[0].votes);
        assert_eq!(second, results.rows[1].candidate_id);
        assert_eq!(0, results.rows[1].votes);
        assert_eq!(3, results.total_votes);
    }

    #[backend_test(admin)]
    async fn deleted_candidate_disappears_from_tally(client: Client, db: Database) {
        let (first, second) = insert_candidates(&db).await;
        insert_votes(&db, first, 3).await;
        insert_votes(&db, second, 1).await;

        // Delete the candidate with three votes.
        Coll::<Candidate>::from_db(&db)
            .delete_one(first.as_doc(), None)
            .await
            .unwrap();

        let results = fetch_results(&client).await;

        // Its row is gone entirely; the votes are unattributed, not
        // redistributed and not an error.
        assert_eq!(1, results.rows.len());
        assert_eq!(second, results.rows[0].candidate_id);
        assert_eq!(1, results.rows[0].votes);
        assert_eq!(1, results.total_votes);
    }

    #[backend_test(admin)]
    async fn csv_matches_tally(client: Client, db: Database) {
        let (first, _) = insert_candidates(&db).await;
        insert_votes(&db, first, 2).await;

        let results = fetch_results(&client).await;

        let response = client.get(uri!(export_results_csv)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        assert_eq!(Some(ContentType::CSV), response.content_type());
        assert_eq!(
            Some("attachment; filename=\"hasil-voting.csv\""),
            response.headers().get_one("Content-Disposition")
        );

        let body = response.into_string().await.unwrap();
        let lines = body.lines().collect::<Vec<_>>();
        assert_eq!(CSV_HEADER, lines[0]);
        assert_eq!(1 + results.rows.len(), lines.len());
        for (row, line) in results.rows.iter().zip(&lines[1..]) {
            assert_eq!(format!("{},{}", row.name, row.votes), *line);
        }
    }

    async fn insert_candidates(db: &Database) -> (Id, Id) {
        let candidates = Coll::<NewCandidate>::from_db(db);
        let result = candidates
            .insert_many(
                vec![NewCandidate::example1(), NewCandidate::example2()],
                None,
            )
            .await
            .unwrap();
        let id = |index: usize| -> Id {
            result
                .inserted_ids
                .get(&index)
                .unwrap()
                .as_object_id()
                .unwrap()
                .into()
        };
        (id(0), id(1))
    }

    async fn insert_votes(db: &Database, candidate_id: Id, count: usize) {
        let votes = (0..count)
            .map(|_| NewVote::new(Id::new(), candidate_id))
            .collect::<Vec<_>>();
        Coll::<NewVote>::from_db(db)
            .insert_many(votes, None)
            .await
            .unwrap();
    }

    async fn fetch_results(client: &Client) -> ElectionResults {
        let response = client.get(uri!(get_results)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }
}

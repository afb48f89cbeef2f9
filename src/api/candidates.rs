use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{Admin, AuthToken},
            candidate::{CandidateDescription, CandidateSpec},
            voter::Acknowledge,
        },
        db::candidate::{Candidate, NewCandidate},
        mongodb::{Coll, Id},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        list_candidates,
        create_candidate,
        update_candidate,
        delete_candidate,
    ]
}

#[get("/api/admin/candidates")]
async fn list_candidates(
    _token: AuthToken<Admin>,
    candidates: Coll<Candidate>,
) -> Result<Json<Vec<CandidateDescription>>> {
    let candidates: Vec<Candidate> = candidates.find(None, None).await?.try_collect().await?;
    Ok(Json(candidates.into_iter().map(Into::into).collect()))
}

#[post("/api/admin/candidates", data = "<spec>", format = "json")]
async fn create_candidate(
    _token: AuthToken<Admin>,
    spec: Json<CandidateSpec>,
    new_candidates: Coll<NewCandidate>,
) -> Result<Json<CandidateDescription>> {
    let spec = spec.into_inner();
    if !spec.is_complete() {
        return Err(Error::bad_request(
            "All candidate fields except the photo are required",
        ));
    }

    let candidate: NewCandidate = spec.into();
    let new_id: Id = new_candidates
        .insert_one(&candidate, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    Ok(Json(
        Candidate {
            id: new_id,
            candidate,
        }
        .into(),
    ))
}

#[put("/api/admin/candidates/<candidate_id>", data = "<spec>", format = "json")]
async fn update_candidate(
    _token: AuthToken<Admin>,
    candidate_id: Id,
    spec: Json<CandidateSpec>,
    new_candidates: Coll<NewCandidate>,
) -> Result<Json<Acknowledge>> {
    let spec = spec.into_inner();
    if !spec.is_complete() {
        return Err(Error::bad_request(
            "All candidate fields except the photo are required",
        ));
    }

    let replacement: NewCandidate = spec.into();
    let result = new_candidates
        .replace_one(candidate_id.as_doc(), &replacement, None)
        .await?;
    if result.matched_count == 0 {
        return Err(Error::not_found(format!("Candidate {candidate_id}")));
    }

    Ok(Json(Acknowledge::ok()))
}

#[delete("/api/admin/candidates/<candidate_id>")]
async fn delete_candidate(
    _token: AuthToken<Admin>,
    candidate_id: Id,
    candidates: Coll<Candidate>,
) -> Result<Json<Acknowledge>> {
    // Votes for this candidate stay behind; the tally keys off the
    // candidate list and no longer counts them.
    let result = candidates.delete_one(candidate_id.as_doc(), None).await?;
    if result.deleted_count == 0 {
        return Err(Error::not_found(format!("Candidate {candidate_id}")));
    }

    Ok(Json(Acknowledge::ok()))
}

#[cfg(test)]
mod tests {
    use mongodb::{bson::doc, Database};
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::{serde_json, serde_json::json},
    };

    use crate::model::db::vote::{NewVote, Vote};
    use crate::model::mongodb::Coll;

    use super::*;

    #[backend_test(admin)]
    async fn create_and_list(client: Client) {
        let first = create(&client, &CandidateSpec::example1()).await;
        let second = create(&client, &CandidateSpec::example2()).await;

        // The photo is optional.
        assert!(first.photo_url.is_some());
        assert!(second.photo_url.is_none());

        let response = client.get(uri!(list_candidates)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let listed: Vec<CandidateDescription> =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(vec![first, second], listed);
    }

    #[backend_test(admin)]
    async fn create_rejects_missing_fields(client: Client, candidates: Coll<Candidate>) {
        let mut spec = CandidateSpec::example1();
        spec.vision = String::new();

        let response = client
            .post(uri!(create_candidate))
            .header(ContentType::JSON)
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::BadRequest, response.status());

        let count = candidates.count_documents(None, None).await.unwrap();
        assert_eq!(0, count);
    }

    #[backend_test(admin)]
    async fn update_replaces_fields(client: Client, candidates: Coll<Candidate>) {
        let created = create(&client, &CandidateSpec::example1()).await;

        let mut spec = CandidateSpec::example1();
        spec.platform = "Beasiswa internal".to_string();
        spec.photo_url = None;
        let response = client
            .put(uri!(update_candidate(created.id)))
            .header(ContentType::JSON)
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let stored = candidates
            .find_one(created.id.as_doc(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!("Beasiswa internal", stored.platform);
        assert_eq!(None, stored.photo_url);
    }

    #[backend_test(admin)]
    async fn update_unknown_candidate(client: Client) {
        let response = client
            .put(uri!(update_candidate(Id::new())))
            .header(ContentType::JSON)
            .body(json!(CandidateSpec::example1()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test(admin)]
    async fn delete_leaves_votes_behind(client: Client, db: Database) {
        let created = create(&client, &CandidateSpec::example1()).await;

        // Some votes already point at the candidate.
        let votes = Coll::<NewVote>::from_db(&db);
        for _ in 0..3 {
            votes
                .insert_one(NewVote::new(Id::new(), created.id), None)
                .await
                .unwrap();
        }

        let response = client
            .delete(uri!(delete_candidate(created.id)))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        // The candidate is gone; its votes are orphaned, not erased.
        let remaining = Coll::<Candidate>::from_db(&db)
            .count_documents(created.id.as_doc(), None)
            .await
            .unwrap();
        assert_eq!(0, remaining);
        let orphaned = Coll::<Vote>::from_db(&db)
            .count_documents(doc! { "candidateId": created.id }, None)
            .await
            .unwrap();
        assert_eq!(3, orphaned);

        // Deleting again is a 404, not a silent success.
        let response = client
            .delete(uri!(delete_candidate(created.id)))
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());
    }

    async fn create(client: &Client, spec: &CandidateSpec) -> CandidateDescription {
        let response = client
            .post(uri!(create_candidate))
            .header(ContentType::JSON)
            .body(json!(spec).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }
}

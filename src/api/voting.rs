use mongodb::{bson::doc, Client};
use rocket::{futures::TryStreamExt, serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{AuthToken, Voter},
            ballot::CastVoteResponse,
            candidate::CandidateDescription,
        },
        db::{
            candidate::Candidate,
            profile::Profile,
            vote::NewVote,
        },
        mongodb::{is_duplicate_key_error, Coll, Id},
    },
};

pub fn routes() -> Vec<Route> {
    routes![get_candidates, get_candidate, cast_vote]
}

#[get("/candidates")]
async fn get_candidates(
    _token: AuthToken<Voter>,
    candidates: Coll<Candidate>,
) -> Result<Json<Vec<CandidateDescription>>> {
    let candidates: Vec<Candidate> = candidates.find(None, None).await?.try_collect().await?;
    Ok(Json(candidates.into_iter().map(Into::into).collect()))
}

#[get("/candidates/<candidate_id>")]
async fn get_candidate(
    _token: AuthToken<Voter>,
    candidate_id: Id,
    candidates: Coll<Candidate>,
) -> Result<Json<CandidateDescription>> {
    let candidate = candidates
        .find_one(candidate_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Candidate {candidate_id}")))?;
    Ok(Json(candidate.into()))
}

#[post("/candidates/<candidate_id>/vote")]
async fn cast_vote(
    token: AuthToken<Voter>,
    candidate_id: Id,
    candidates: Coll<Candidate>,
    profiles: Coll<Profile>,
    new_votes: Coll<NewVote>,
    db_client: &State<Client>,
) -> Result<Json<CastVoteResponse>> {
    // The ballot must name a candidate that still exists; votes for
    // since-deleted candidates are rejected rather than recorded.
    if candidates
        .find_one(candidate_id.as_doc(), None)
        .await?
        .is_none()
    {
        return Err(Error::not_found(format!("Candidate {candidate_id}")));
    }

    let voter = profiles
        .find_one(token.id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Profile {}", token.id)))?;

    // Cheap short-circuit only; the unique index on `voterId` is what
    // actually enforces one vote per voter.
    if voter.has_voted {
        return Ok(Json(CastVoteResponse::already_voted()));
    }

    let vote = NewVote::new(token.id, candidate_id);

    // Vote record and flag land together or not at all.
    let mut session = db_client.start_session(None).await?;
    session.start_transaction(None).await?;

    if let Err(err) = new_votes
        .insert_one_with_session(&vote, None, &mut session)
        .await
    {
        return if is_duplicate_key_error(&err) {
            // A concurrent cast from the same voter won the race.
            Ok(Json(CastVoteResponse::already_voted()))
        } else {
            Err(err.into())
        };
    }

    let update = doc! {
        "$set": { "hasVoted": true }
    };
    profiles
        .update_one_with_session(token.id.as_doc(), update, None, &mut session)
        .await?;

    session.commit_transaction().await?;

    Ok(Json(CastVoteResponse::recorded()))
}

use mongodb::{bson::doc, Client};
use rocket::{futures::TryStreamExt, serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::{Admin, AuthToken},
            login::ProfileResponse,
            voter::{Acknowledge, CreateVoterRequest, DeleteVoterRequest, UpdateVoterRequest},
        },
        db::{
            account::{Account, NewAccount},
            profile::{Profile, ProfileCore, Role},
            vote::Vote,
        },
        mongodb::{is_duplicate_key_error, Coll, Id},
    },
};

pub fn routes() -> Vec<Route> {
    routes![list_voters, create_voter, update_voter, delete_voter]
}

#[get("/api/admin/voters")]
async fn list_voters(
    _token: AuthToken<Admin>,
    profiles: Coll<Profile>,
) -> Result<Json<Vec<ProfileResponse>>> {
    let voters: Vec<Profile> = profiles
        .find(doc! { "role": "voter" }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(voters.into_iter().map(Into::into).collect()))
}

#[post("/api/admin/create-voter", data = "<request>", format = "json")]
async fn create_voter(
    _token: AuthToken<Admin>,
    request: Json<CreateVoterRequest>,
    new_accounts: Coll<NewAccount>,
    profiles: Coll<Profile>,
    db_client: &State<Client>,
) -> Result<Json<Acknowledge>> {
    let request = request.into_inner();
    if !request.is_complete() {
        return Err(Error::bad_request(
            "All of name, nim, username, and password are required",
        ));
    }

    let account = NewAccount::new(&request.username, request.name.clone(), &request.password);

    // Account and profile land together or not at all.
    let mut session = db_client.start_session(None).await?;
    session.start_transaction(None).await?;

    let insert = new_accounts
        .insert_one_with_session(&account, None, &mut session)
        .await;
    let account_id: Id = match insert {
        Ok(result) => result
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the ID comes directly from the DB.
            .into(),
        Err(err) if is_duplicate_key_error(&err) => {
            return Err(Error::bad_request(format!(
                "Username already in use: {}",
                request.username
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let profile = Profile {
        id: account_id,
        profile: ProfileCore::voter(request.name, request.nim, request.username),
    };
    profiles
        .insert_one_with_session(&profile, None, &mut session)
        .await?;

    session.commit_transaction().await?;

    Ok(Json(Acknowledge::ok()))
}

#[post("/api/admin/update-voter", data = "<request>", format = "json")]
async fn update_voter(
    _token: AuthToken<Admin>,
    request: Json<UpdateVoterRequest>,
    profiles: Coll<Profile>,
) -> Result<Json<Acknowledge>> {
    let request = request.into_inner();
    if !request.is_complete() {
        return Err(Error::bad_request(
            "All of uid, name, nim, and username are required",
        ));
    }
    let uid = request
        .uid
        .ok_or_else(|| Error::bad_request("All of uid, name, nim, and username are required"))?;

    // Only the profile changes: the login identifier keeps the username the
    // account was created with.
    let filter = doc! {
        "_id": uid,
        "role": "voter",
    };
    let update = doc! {
        "$set": {
            "name": &request.name,
            "nim": &request.nim,
            "username": &request.username,
        }
    };
    let result = profiles.update_one(filter, update, None).await?;
    if result.matched_count == 0 {
        return Err(Error::not_found(format!("Voter {uid}")));
    }

    Ok(Json(Acknowledge::ok()))
}

#[post("/api/admin/delete-voter", data = "<request>", format = "json")]
async fn delete_voter(
    _token: AuthToken<Admin>,
    request: Json<DeleteVoterRequest>,
    votes: Coll<Vote>,
    profiles: Coll<Profile>,
    accounts: Coll<Account>,
    db_client: &State<Client>,
) -> Result<Json<Acknowledge>> {
    let uid = request
        .uid
        .ok_or_else(|| Error::bad_request("uid is required"))?;

    // Admins cannot be removed through the voter endpoint.
    if let Some(profile) = profiles.find_one(uid.as_doc(), None).await? {
        if profile.role == Role::Admin {
            return Err(Error::bad_request(format!("User {uid} is not a voter")));
        }
    }

    // Votes, then profile, then account, all in one transaction. Every step
    // tolerates documents that are already gone, so a retry of a partial
    // delete converges instead of failing.
    let mut session = db_client.start_session(None).await?;
    session.start_transaction(None).await?;

    votes
        .delete_many_with_session(doc! { "voterId": uid }, None, &mut session)
        .await?;
    profiles
        .delete_one_with_session(uid.as_doc(), None, &mut session)
        .await?;
    accounts
        .delete_one_with_session(uid.as_doc(), None, &mut session)
        .await?;

    session.commit_transaction().await?;

    Ok(Json(Acknowledge::ok()))
}

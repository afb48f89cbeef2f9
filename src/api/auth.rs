use mongodb::bson::doc;
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    config::Config,
    error::{Error, Result},
    model::{
        api::{
            auth::{Admin, AuthToken, Voter, AUTH_TOKEN_COOKIE},
            login::{LoginRequest, ProfileResponse},
        },
        db::{
            account::{login_email, Account},
            profile::{Profile, Role},
        },
        mongodb::{Coll, Id},
    },
};

pub fn routes() -> Vec<Route> {
    routes![login, me_admin, me_voter, logout]
}

#[post("/auth/login", data = "<credentials>", format = "json")]
pub async fn login(
    cookies: &CookieJar<'_>,
    credentials: Json<LoginRequest>,
    accounts: Coll<Account>,
    profiles: Coll<Profile>,
    config: &State<Config>,
) -> Result<Json<ProfileResponse>> {
    let with_email = doc! {
        "email": login_email(&credentials.username),
    };

    // Unknown account, wrong password, and missing profile all fail the
    // same way; callers cannot tell which check tripped.
    let account = accounts
        .find_one(with_email, None)
        .await?
        .filter(|account| account.verify_password(&credentials.password))
        .ok_or_else(Error::unauthorized)?;

    let profile = profiles
        .find_one(account.id.as_doc(), None)
        .await?
        .ok_or_else(Error::unauthorized)?;

    let cookie = match profile.role {
        Role::Admin => AuthToken::<Admin>::new(&profile).into_cookie(config),
        Role::Voter => AuthToken::<Voter>::new(&profile).into_cookie(config),
    };
    cookies.add(cookie);

    Ok(Json(profile.into()))
}

#[get("/auth/me", rank = 1)]
async fn me_admin(
    token: AuthToken<Admin>,
    profiles: Coll<Profile>,
) -> Result<Json<ProfileResponse>> {
    profile_for_token(token.id, &profiles).await
}

#[get("/auth/me", rank = 2)]
async fn me_voter(
    token: AuthToken<Voter>,
    profiles: Coll<Profile>,
) -> Result<Json<ProfileResponse>> {
    profile_for_token(token.id, &profiles).await
}

async fn profile_for_token(id: Id, profiles: &Coll<Profile>) -> Result<Json<ProfileResponse>> {
    let profile = profiles
        .find_one(id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Profile {id}")))?;
    Ok(Json(profile.into()))
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::ContentType,
        local::asynchronous::Client,
        serde::json::{serde_json, serde_json::json},
    };

    use crate::model::db::{account::NewAccount, profile::ProfileCore};

    use super::*;

    #[backend_test]
    async fn login_valid_admin(client: Client, accounts: Coll<NewAccount>, profiles: Coll<Profile>) {
        let account_id = insert_pair(
            &accounts,
            &profiles,
            NewAccount::example_admin(),
            ProfileCore::example_admin(),
        )
        .await;

        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(LoginRequest::example_admin()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());

        let profile: ProfileResponse =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(account_id, profile.uid);
        assert_eq!(Role::Admin, profile.role);
        assert!(!profile.has_voted);
    }

    #[backend_test]
    async fn login_valid_voter(client: Client, accounts: Coll<NewAccount>, profiles: Coll<Profile>) {
        insert_pair(
            &accounts,
            &profiles,
            NewAccount::example_voter(),
            ProfileCore::example_voter(),
        )
        .await;

        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(LoginRequest::example_voter()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let profile: ProfileResponse =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(Role::Voter, profile.role);
    }

    #[backend_test]
    async fn login_failures_are_indistinguishable(
        client: Client,
        accounts: Coll<NewAccount>,
        profiles: Coll<Profile>,
    ) {
        // Unknown username.
        let unknown = login_expect_unauthorized(
            &client,
            &LoginRequest {
                username: "nonexistent".to_string(),
                password: "whatever".to_string(),
            },
        )
        .await;

        // Wrong password for an existing account.
        insert_pair(
            &accounts,
            &profiles,
            NewAccount::example_voter(),
            ProfileCore::example_voter(),
        )
        .await;
        let wrong_password = login_expect_unauthorized(
            &client,
            &LoginRequest {
                username: "alice".to_string(),
                password: "not-her-password".to_string(),
            },
        )
        .await;

        // Valid credentials but no profile record.
        accounts
            .insert_one(NewAccount::example_admin(), None)
            .await
            .unwrap();
        let no_profile =
            login_expect_unauthorized(&client, &LoginRequest::example_admin()).await;

        assert_eq!(unknown, wrong_password);
        assert_eq!(wrong_password, no_profile);
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_none());
    }

    #[backend_test(voter)]
    async fn me_returns_current_profile(client: Client) {
        let response = client.get(uri!(me_voter)).dispatch().await;

        assert_eq!(Status::Ok, response.status());
        let profile: ProfileResponse =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(ProfileCore::example_voter().username, profile.username);
        assert_eq!(Role::Voter, profile.role);
        assert!(!profile.has_voted);
    }

    #[backend_test]
    async fn me_requires_login(client: Client) {
        let response = client.get(uri!(me_voter)).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test(admin)]
    async fn logout_clears_session(client: Client) {
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());

        let response = client.delete(uri!(logout)).dispatch().await;

        assert_eq!(Status::Ok, response.status());
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_none());

        // The session is gone: authenticated routes forward away.
        let response = client.get(uri!(me_admin)).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    async fn insert_pair(
        accounts: &Coll<NewAccount>,
        profiles: &Coll<Profile>,
        account: NewAccount,
        profile: ProfileCore,
    ) -> Id {
        let account_id: Id = accounts
            .insert_one(account, None)
            .await
            .unwrap()
            .inserted_id
            .as_object_id()
            .unwrap()
            .into();
        profiles
            .insert_one(
                Profile {
                    id: account_id,
                    profile,
                },
                None,
            )
            .await
            .unwrap();
        account_id
    }

    async fn login_expect_unauthorized(client: &Client, request: &LoginRequest) -> Status {
        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(request).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
        response.status()
    }
}

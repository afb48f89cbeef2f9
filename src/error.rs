use rocket::{http::Status, response::Responder, Request};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Application-level errors, mapped onto HTTP statuses when returned from an
/// endpoint.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] mongodb::error::Error),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    /// A 400 with the given explanation.
    pub fn bad_request(what: impl Into<String>) -> Self {
        Self::Status(Status::BadRequest, what.into())
    }

    /// A 404 for the given missing thing.
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::Status(Status::NotFound, format!("{what} not found"))
    }

    /// A 401 that does not reveal which of the login checks failed.
    pub fn unauthorized() -> Self {
        Self::Status(
            Status::Unauthorized,
            "Invalid username or password".to_string(),
        )
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        match &self {
            Self::Db(err) => error!("Database error: {err}"),
            Self::Jwt(err) => warn!("Token error: {err}"),
            Self::Status(status, msg) => info!("{status}: {msg}"),
        }
        Err(match self {
            Self::Db(_) => Status::InternalServerError,
            Self::Jwt(err) => match err.into_kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::ImmatureSignature => Status::Unauthorized,
                _ => Status::BadRequest,
            },
            Self::Status(status, _) => status,
        })
    }
}

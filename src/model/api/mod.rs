//! API-level types: request and response bodies, and the session token.

pub mod auth;
pub mod ballot;
pub mod candidate;
pub mod login;
pub mod results;
pub mod voter;

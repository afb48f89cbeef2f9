use rocket::Route;

mod admin;
pub mod auth;
mod candidates;
mod results;
mod voting;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(admin::routes());
    routes.extend(candidates::routes());
    routes.extend(voting::routes());
    routes.extend(results::routes());
    routes
}

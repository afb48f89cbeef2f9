//! Backend server for the student association chair election: admins manage
//! voter accounts and candidate profiles, authenticated voters cast exactly
//! one vote each, and admins read the tally.

#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use config::{ConfigFairing, DatabaseFairing};
use logging::LoggerFairing;
use rocket::{Build, Rocket};

/// Construct the Rocket instance: all routes plus the config, database, and
/// logging fairings.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
        .attach(LoggerFairing)
}

/// Connect to the database configured via figment.
#[cfg(test)]
pub(crate) async fn db_client() -> mongodb::Client {
    let rocket = rocket::build();
    let db_uri = rocket
        .figment()
        .extract_inner::<String>("db_uri")
        .expect("`db_uri` not set");
    mongodb::Client::with_uri_str(&db_uri)
        .await
        .expect("Could not connect to database")
}

/// The per-test database name.
#[cfg(test)]
pub(crate) fn database() -> String {
    config::get_database_name()
}

/// A Rocket instance bound to an existing client and database, skipping the
/// connection fairing so tests control (and can drop) the database.
#[cfg(test)]
pub(crate) async fn rocket_for_db(client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = client.database(db_name);

    let rocket = rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(LoggerFairing);
    let app_config = rocket
        .figment()
        .extract::<config::Config>()
        .expect("invalid test config");
    config::setup_database(&db, &app_config)
        .await
        .expect("failed to set up test database");

    rocket.manage(client).manage(db)
}

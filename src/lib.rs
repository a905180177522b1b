#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

use config::{AuditFairing, ConfigFairing, LedgerFairing};
use logging::LoggerFairing;

/// Assemble the server from the default figment (`Rocket.toml` plus
/// `ROCKET_*` environment variables).
pub fn build() -> Rocket<Build> {
    custom(rocket::build())
}

/// Assemble the server on top of an existing `Rocket` instance: mount the
/// API and attach the fairings that load config, build the election ledger,
/// and open the audit channel.
pub fn custom(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(LedgerFairing)
        .attach(AuditFairing)
        .attach(LoggerFairing)
}

/// Test setup: a local client over a ledger configured with
/// [`Config::test_example`] values.
#[cfg(test)]
pub(crate) async fn test_client() -> rocket::local::asynchronous::Client {
    let figment = rocket::Config::figment()
        .merge(("election_name", config::tests::TEST_ELECTION_NAME))
        .merge(("admin_identity", config::tests::TEST_ADMIN_IDENTITY))
        .merge(("audit_backlog", 16));
    rocket::local::asynchronous::Client::tracked(custom(rocket::custom(figment)))
        .await
        .expect("test instance failed to ignite")
}

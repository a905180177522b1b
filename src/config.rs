use rocket::{
    fairing::{Fairing, Info, Kind},
    tokio::sync::RwLock,
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{audit::AuditLog, identity::Identity, ledger::ElectionLedger};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    election_name: String,
    admin_identity: String,
    audit_backlog: usize,
}

impl Config {
    /// Display name of the one election this server hosts.
    pub fn election_name(&self) -> &str {
        &self.election_name
    }

    /// The identity allowed to register candidates and toggle the voting
    /// window.
    pub fn admin_identity(&self) -> Identity {
        Identity::new(&self.admin_identity)
    }

    /// How many audit events a slow subscriber may lag behind.
    pub fn audit_backlog(&self) -> usize {
        self.audit_backlog
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the other fairings and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the election ledger itself.
#[derive(Deserialize)]
struct LedgerConfig {
    election_name: String,
    admin_identity: String,
}

/// A fairing that creates the election from its config and places the
/// ledger aggregate into managed state behind a single write lock.
pub struct LedgerFairing;

#[rocket::async_trait]
impl Fairing for LedgerFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election Ledger",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<LedgerConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load ledger config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Create the election.
        let admin = Identity::new(config.admin_identity);
        let ledger = match ElectionLedger::new(config.election_name, admin) {
            Ok(ledger) => ledger,
            Err(e) => {
                error!("Failed to create election: {e}");
                return Err(rocket);
            }
        };
        info!(
            "Created election \"{}\", voting closed",
            ledger.name()
        );

        // Manage the state.
        rocket = rocket.manage(RwLock::new(ledger));
        Ok(rocket)
    }
}

/// Configuration for the audit channel.
#[derive(Deserialize)]
struct AuditConfig {
    audit_backlog: usize,
}

/// A fairing that opens the audit event channel and places it into managed
/// state.
pub struct AuditFairing;

#[rocket::async_trait]
impl Fairing for AuditFairing {
    fn info(&self) -> Info {
        Info {
            name: "Audit Log",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<AuditConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load audit config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(AuditLog::new(config.audit_backlog));
        Ok(rocket)
    }
}

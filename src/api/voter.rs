use rocket::{serde::json::Json, tokio::sync::RwLock, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    audit::{AuditEvent, AuditLog},
    election::CandidateId,
    identity::Identity,
    ledger::ElectionLedger,
};

pub fn routes() -> Vec<Route> {
    routes![cast_vote, has_voted]
}

/// The vote the caller wishes to cast.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSpec {
    pub candidate: CandidateId,
}

#[post("/election/votes", data = "<spec>", format = "json")]
pub async fn cast_vote(
    identity: Identity,
    spec: Json<VoteSpec>,
    ledger: &State<RwLock<ElectionLedger>>,
    audit: &State<AuditLog>,
) -> Result<()> {
    let mut ledger = ledger.write().await;
    ledger.cast_vote(&identity, spec.candidate)?;
    audit.emit(AuditEvent::VoteCast {
        voter: identity,
        candidate: spec.candidate,
    });
    Ok(())
}

#[get("/voter/has-voted")]
pub async fn has_voted(identity: Identity, ledger: &State<RwLock<ElectionLedger>>) -> Json<bool> {
    Json(ledger.read().await.has_voted(&identity))
}

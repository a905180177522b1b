use rocket::{serde::json::Json, tokio::sync::RwLock, Route, State};

use crate::model::{
    election::{Candidate, ElectionDescription},
    ledger::ElectionLedger,
};

pub fn routes() -> Vec<Route> {
    routes![election, candidates]
}

#[get("/election")]
pub async fn election(ledger: &State<RwLock<ElectionLedger>>) -> Json<ElectionDescription> {
    Json(ledger.read().await.description())
}

#[get("/election/candidates")]
pub async fn candidates(ledger: &State<RwLock<ElectionLedger>>) -> Json<Vec<Candidate>> {
    Json(ledger.read().await.candidates().to_vec())
}

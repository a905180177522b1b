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
    routes![add_candidate, open_voting, close_voting]
}

/// A candidate the admin wishes to register.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub name: String,
}

#[post("/election/candidates", data = "<spec>", format = "json")]
pub async fn add_candidate(
    identity: Identity,
    spec: Json<CandidateSpec>,
    ledger: &State<RwLock<ElectionLedger>>,
    audit: &State<AuditLog>,
) -> Result<Json<CandidateId>> {
    let name = spec.0.name;

    let mut ledger = ledger.write().await;
    let id = ledger.add_candidate(&identity, name.clone())?;
    // Emit before releasing the write lock so event order matches commit
    // order.
    audit.emit(AuditEvent::CandidateAdded { id, name });

    Ok(Json(id))
}

#[post("/election/voting/open")]
pub async fn open_voting(
    identity: Identity,
    ledger: &State<RwLock<ElectionLedger>>,
    audit: &State<AuditLog>,
) -> Result<()> {
    let mut ledger = ledger.write().await;
    ledger.open_voting(&identity)?;
    audit.emit(AuditEvent::VotingStatusChanged { is_open: true });
    Ok(())
}

#[post("/election/voting/close")]
pub async fn close_voting(
    identity: Identity,
    ledger: &State<RwLock<ElectionLedger>>,
    audit: &State<AuditLog>,
) -> Result<()> {
    let mut ledger = ledger.write().await;
    ledger.close_voting(&identity)?;
    audit.emit(AuditEvent::VotingStatusChanged { is_open: false });
    Ok(())
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        serde::json::serde_json,
    };

    use crate::api::testing::as_identity;
    use crate::config::tests::TEST_ADMIN_IDENTITY;

    use super::*;

    #[rocket::async_test]
    async fn add_candidates_assigns_sequential_ids() {
        let client = crate::test_client().await;

        for (name, expected_id) in [("Alice", 1), ("Bob", 2)] {
            let response = client
                .post(uri!(add_candidate))
                .header(ContentType::JSON)
                .header(as_identity(TEST_ADMIN_IDENTITY))
                .body(
                    serde_json::to_string(&CandidateSpec {
                        name: name.to_string(),
                    })
                    .unwrap(),
                )
                .dispatch()
                .await;
            assert_eq!(Status::Ok, response.status());
            let id: CandidateId =
                serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
            assert_eq!(expected_id, id);
        }
    }

    #[rocket::async_test]
    async fn add_candidate_rejects_non_admin() {
        let client = crate::test_client().await;

        let response = client
            .post(uri!(add_candidate))
            .header(ContentType::JSON)
            .header(as_identity("voter1"))
            .body(
                serde_json::to_string(&CandidateSpec {
                    name: "Carol".to_string(),
                })
                .unwrap(),
            )
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());

        // Nothing was registered.
        let ledger = client
            .rocket()
            .state::<RwLock<ElectionLedger>>()
            .unwrap()
            .read()
            .await;
        assert_eq!(0, ledger.candidates_count());
    }

    #[rocket::async_test]
    async fn add_candidate_rejects_empty_name() {
        let client = crate::test_client().await;

        let response = client
            .post(uri!(add_candidate))
            .header(ContentType::JSON)
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .body(
                serde_json::to_string(&CandidateSpec {
                    name: String::new(),
                })
                .unwrap(),
            )
            .dispatch()
            .await;
        assert_eq!(Status::BadRequest, response.status());
    }

    #[rocket::async_test]
    async fn add_candidate_requires_identity_header() {
        let client = crate::test_client().await;

        let response = client
            .post(uri!(add_candidate))
            .header(ContentType::JSON)
            .body(
                serde_json::to_string(&CandidateSpec {
                    name: "Carol".to_string(),
                })
                .unwrap(),
            )
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
    }

    #[rocket::async_test]
    async fn voting_window_toggles_and_rejects_wrong_phase() {
        let client = crate::test_client().await;

        // Not open yet, cannot close.
        let response = client
            .post(uri!(close_voting))
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .dispatch()
            .await;
        assert_eq!(Status::Conflict, response.status());

        // Open.
        let response = client
            .post(uri!(open_voting))
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        // Cannot open again.
        let response = client
            .post(uri!(open_voting))
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .dispatch()
            .await;
        assert_eq!(Status::Conflict, response.status());

        // Close.
        let response = client
            .post(uri!(close_voting))
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
    }

    #[rocket::async_test]
    async fn phase_changes_reject_non_admin() {
        let client = crate::test_client().await;

        let response = client
            .post(uri!(open_voting))
            .header(as_identity("voter1"))
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());

        let ledger = client
            .rocket()
            .state::<RwLock<ElectionLedger>>()
            .unwrap()
            .read()
            .await;
        assert!(!ledger.is_open());
    }

    #[rocket::async_test]
    async fn admin_actions_emit_audit_events() {
        let client = crate::test_client().await;
        let mut events = client.rocket().state::<AuditLog>().unwrap().subscribe();

        let response = client
            .post(uri!(add_candidate))
            .header(ContentType::JSON)
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .body(
                serde_json::to_string(&CandidateSpec {
                    name: "Alice".to_string(),
                })
                .unwrap(),
            )
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        let response = client
            .post(uri!(open_voting))
            .header(as_identity(TEST_ADMIN_IDENTITY))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());

        assert_eq!(
            AuditEvent::CandidateAdded {
                id: 1,
                name: "Alice".to_string(),
            },
            events.try_recv().unwrap()
        );
        assert_eq!(
            AuditEvent::VotingStatusChanged { is_open: true },
            events.try_recv().unwrap()
        );
        assert!(events.try_recv().is_err());
    }

    #[rocket::async_test]
    async fn failed_actions_emit_no_audit_events() {
        let client = crate::test_client().await;
        let mut events = client.rocket().state::<AuditLog>().unwrap().subscribe();

        let response = client
            .post(uri!(open_voting))
            .header(as_identity("voter1"))
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());
        assert!(events.try_recv().is_err());
    }
}

use std::fmt::{self, Display, Formatter};

use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};
use serde::{Deserialize, Serialize};

/// Header carrying the caller's identity on every authenticated request.
pub const IDENTITY_HEADER: &str = "X-Caller-Identity";

/// The authenticated identity behind a call: a cryptographic address,
/// session principal, or similar opaque value. The ledger trusts it as
/// given; establishing it is the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allow the identity to be accessed via request guard. Requests without
/// the identity header are rejected outright.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Identity {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.headers().get_one(IDENTITY_HEADER) {
            Some(value) if !value.is_empty() => Outcome::Success(Identity::new(value)),
            _ => Outcome::Failure((Status::Unauthorized, ())),
        }
    }
}

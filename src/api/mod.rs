use rocket::Route;

mod admin;
mod public;
mod voter;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(admin::routes());
    routes.extend(voter::routes());
    routes.extend(public::routes());
    routes
}

#[cfg(test)]
pub(crate) mod testing {
    use rocket::http::Header;

    use crate::model::identity::IDENTITY_HEADER;

    /// Identity header for a request on behalf of `identity`.
    pub fn as_identity(identity: &str) -> Header<'static> {
        Header::new(IDENTITY_HEADER, identity.to_string())
    }
}

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Extract the Bearer token from the Authorization header if present
/// Returns:
/// - None: No Authorization header or not a Bearer token
/// - Some(Ok(token)): Bearer token present
/// - Some(Err(error)): Authorization header present but not valid ASCII
fn bearer_token(parts: &Parts) -> Option<Result<&str>> {
    let auth_header = match parts.headers.get(axum::http::header::AUTHORIZATION) {
        Some(header) => header,
        None => return None,
    };

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::InvalidInput {
                message: format!("Invalid authorization header: {e}"),
            }))
        }
    };

    auth_str.strip_prefix("Bearer ").map(Ok)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = match bearer_token(parts) {
            Some(Ok(token)) => token,
            Some(Err(e)) => {
                trace!("Malformed authorization header: {:?}", e);
                return Err(e);
            }
            None => {
                trace!("No authentication credentials found in request");
                return Err(Error::Unauthenticated { message: None });
            }
        };

        let claims = session::verify_session_token(token, &state.config)?;

        // The token subject must still resolve to a live user record; the
        // record is authoritative for the role, not the claims
        let mut users = state.store.users();
        let user = users
            .get_by_id(claims.sub)
            .await?
            .ok_or(Error::Unauthenticated { message: None })?;

        debug!("Found session authenticated user: {}", user.id);
        Ok(CurrentUser::from(user))
    }
}

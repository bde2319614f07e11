//! Session extraction and the allow-list gate.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use quill_core::auth::{AccessGate, AccessState};

use crate::state::AppState;

/// Header carrying the session email, forwarded by the identity-aware
/// proxy after it terminates the OAuth handshake. The handshake itself
/// never reaches this service.
pub const SESSION_EMAIL_HEADER: &str = "x-session-email";

/// Extractor for an authorized operator session.
///
/// Use this in handlers to gate the editing core:
/// ```ignore
/// async fn protected_route(session: AdminSession) -> impl Responder {
///     format!("Hello, {}!", session.email)
/// }
/// ```
/// Runs the allow-list transition on every request: no session email is
/// anonymous (401), any non-matching address is denied (403).
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
}

/// Error type for gate rejections.
#[derive(Debug)]
pub struct GateError(AccessState);

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            AccessState::Anonymous => write!(f, "no session"),
            AccessState::Denied => write!(f, "account not allowed"),
            _ => write!(f, "session not evaluated"),
        }
    }
}

impl actix_web::ResponseError for GateError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self.0 {
            AccessState::Denied => actix_web::http::StatusCode::FORBIDDEN,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use quill_shared::ErrorResponse;

        let error = match self.0 {
            AccessState::Denied => ErrorResponse::forbidden()
                .with_detail("This account is not on the operator allow-list."),
            _ => ErrorResponse::unauthorized()
                .with_detail("Sign in before using the admin API."),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for AdminSession {
    type Error = GateError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(GateError(AccessState::Unknown)));
        };

        let email = req
            .headers()
            .get(SESSION_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok());

        let mut gate = AccessGate::new(state.admin_email.as_str());
        match (gate.observe_session(email), email) {
            (AccessState::Authorized, Some(session)) => ready(Ok(AdminSession {
                email: session.to_string(),
            })),
            (rejected, _) => ready(Err(GateError(rejected))),
        }
    }
}

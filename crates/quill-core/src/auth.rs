//! Allow-list authorization gate.
//!
//! A single hardcoded address gates the editing core; this is not a
//! policy engine. The OAuth handshake itself belongs to the identity
//! provider, which hands us nothing more than the session email.

/// Authorization states derived from session observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// Session not yet checked.
    Unknown,
    /// No session present.
    Anonymous,
    /// Session email matches the allowed address.
    Authorized,
    /// Session email does not match the allowed address.
    Denied,
}

/// Single-address allow-list gate.
///
/// Starts in `Unknown` until the first session observation; every
/// session-change notification re-runs the same transition rule. Only
/// `Authorized` may reach `DocumentEditor` or `SyncCoordinator`.
#[derive(Debug, Clone)]
pub struct AccessGate {
    allowed_email: String,
    state: AccessState,
}

impl AccessGate {
    pub fn new(allowed_email: impl Into<String>) -> Self {
        Self {
            allowed_email: allowed_email.into(),
            state: AccessState::Unknown,
        }
    }

    /// Re-evaluate on a session observation; `None` means no session.
    pub fn observe_session(&mut self, email: Option<&str>) -> AccessState {
        self.state = match email {
            None => AccessState::Anonymous,
            Some(session) if session == self.allowed_email => AccessState::Authorized,
            Some(_) => AccessState::Denied,
        };
        self.state
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == AccessState::Authorized
    }
}

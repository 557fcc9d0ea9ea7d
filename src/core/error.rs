// src/core/error.rs
use crate::types::Role;

/// Client-side failures the CLI reacts to specifically. Everything else
/// travels as a plain `anyhow::Error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Not logged in. Run `ems-portal login` first.")]
    NotLoggedIn,

    #[error("Session expired or rejected by the server. Please log in again.")]
    Unauthorized,

    #[error("Unauthorized: this action requires the {required} role")]
    Forbidden { required: Role },
}

impl ClientError {
    /// Errors after which the stored session must be discarded
    pub fn invalidates_session(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// True when `error` carries a [`ClientError`] that invalidates the session.
pub fn is_session_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ClientError>()
        .is_some_and(ClientError::invalidates_session)
}

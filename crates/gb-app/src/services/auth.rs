use gb_core::{CellReader, ReactiveCell};
use serde::{Deserialize, Serialize};

/// Login handshake issued by the cloud API while the browser flow is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
    pub expires: String,
    pub url: String,
}

/// Tracks the in-flight login handshake.
///
/// The auth flow itself (opening the browser, polling the cloud) belongs to
/// the UI; this handle only keeps the pending token visible to every view.
#[derive(Debug, Default)]
pub struct AuthService {
    pending: ReactiveCell<LoginToken>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_login(&self, token: LoginToken) {
        tracing::debug!(expires = %token.expires, "Login handshake started");
        self.pending.set(token);
    }

    pub fn pending_login(&self) -> Option<LoginToken> {
        self.pending.get().into_option()
    }

    pub fn pending_login_reader(&self) -> CellReader<LoginToken> {
        self.pending.reader()
    }

    /// Drop the pending handshake, returning it if there was one.
    pub fn finish_login(&self) -> Option<LoginToken> {
        let token = self.pending_login();
        self.pending.clear();
        token
    }
}

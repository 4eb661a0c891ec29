use gb_core::{CellReader, ReactiveCell, User};
use tracing::info;

/// Session owner for the signed-in user.
///
/// Sole writer of two cells: the `user` itself and the GitHub `access_token`
/// derived from it. Other services get read-only [`CellReader`]s.
#[derive(Debug, Default)]
pub struct UserService {
    user: ReactiveCell<User>,
    access_token: ReactiveCell<String>,
}

impl UserService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> CellReader<User> {
        self.user.reader()
    }

    /// GitHub access token of the current user, `Unset` when signed out or
    /// when GitHub is not connected.
    pub fn access_token(&self) -> CellReader<String> {
        self.access_token.reader()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.get().into_option()
    }

    /// Replace the session. `None` signs the user out.
    pub fn set_user(&self, user: Option<User>) {
        match user {
            Some(user) => {
                info!(user_id = user.id, "User session updated");
                self.access_token.replace(user.github_access_token.clone());
                self.user.set(user);
            }
            None => self.logout(),
        }
    }

    pub fn logout(&self) {
        info!("User signed out");
        self.access_token.clear();
        self.user.clear();
    }
}

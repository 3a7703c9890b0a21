// Shared session cell
//
// The token is read by the client on every request and cleared by it on
// any 401, while the store sets it on login and persists it. Both hold a
// clone of the same `Session`, so a 401 anywhere logs out everywhere.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;

/// Handle to the current session token.
///
/// Cheaply cloneable; all clones observe the same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl Session {
    /// An empty (logged-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts out holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(Some(SecretString::from(token.into())));
        session
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<SecretString> {
        self.token.read().expect("session lock poisoned").clone()
    }

    /// Replace the current token.
    pub fn set_token(&self, token: Option<SecretString>) {
        *self.token.write().expect("session lock poisoned") = token;
    }

    /// Drop the current token.
    pub fn clear(&self) {
        self.set_token(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn clones_share_the_token() {
        let session = Session::new();
        let other = session.clone();
        assert!(!other.is_authenticated());

        session.set_token(Some(SecretString::from("abc".to_string())));
        let token = other.token().map(|t| t.expose_secret().to_owned());
        assert_eq!(token.as_deref(), Some("abc"));

        other.clear();
        assert!(!session.is_authenticated());
    }
}

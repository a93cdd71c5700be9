use leptos::*;

use crate::models::{User, UserId};

/// Session state shared by every screen.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub logged_in_user: RwSignal<Option<User>>,
}

impl AuthContext {
    pub fn sign_in(&self, user: User) {
        logging::log!("Signed in as {}", user.email);
        self.logged_in_user.set(Some(user));
    }

    pub fn sign_out(&self) {
        self.logged_in_user.set(None);
    }

    /// Id of the signed in user. Tracked.
    pub fn user_id(&self) -> Option<UserId> {
        self.logged_in_user.with(|user| user.as_ref().map(|u| u.id))
    }

    /// Session token of the signed in user. Untracked.
    pub fn token(&self) -> Option<String> {
        self.logged_in_user
            .with_untracked(|user| user.as_ref().and_then(|u| u.token.clone()))
    }
}

/// Provides an empty session to the current scope.
pub fn provide_auth() -> AuthContext {
    let auth = AuthContext {
        logged_in_user: create_rw_signal(None),
    };
    provide_context(auth);
    auth
}

/// Retrieves the session from the current scope.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext missing. Call provide_auth first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> User {
        User {
            id: UserId(1),
            first_name: "Owner".into(),
            email: "owner1@owner.com".into(),
            token: Some("secret".into()),
        }
    }

    #[test]
    fn sign_in_and_out() {
        let runtime = create_runtime();
        let auth = provide_auth();

        assert_eq!(auth.user_id(), None);

        auth.sign_in(owner());
        assert_eq!(use_auth().user_id(), Some(UserId(1)));
        assert_eq!(auth.token().as_deref(), Some("secret"));

        auth.sign_out();
        assert_eq!(auth.user_id(), None);
        assert_eq!(auth.token(), None);
        runtime.dispose();
    }
}

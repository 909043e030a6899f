//! Signed-in user as seen by the UI.

use crate::types::User;

/// Read-only view of the auth provider's current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Data hook filter selecting the user's own projects.
    #[must_use]
    pub fn owner_filter(&self) -> Option<String> {
        self.user.as_ref().map(|u| owner_filter(&u.id))
    }
}

/// `owner_id.eq.<id>` filter expression.
#[must_use]
pub fn owner_filter(user_id: &str) -> String {
    format!("owner_id.eq.{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_only_when_signed_in() {
        assert_eq!(AuthState::signed_out().owner_filter(), None);
        let auth = AuthState::signed_in(User { id: "u1".into(), email: "a@b.c".into() });
        assert!(auth.is_signed_in());
        assert_eq!(auth.owner_filter().as_deref(), Some("owner_id.eq.u1"));
    }
}

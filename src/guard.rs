//! Mount-time routing decisions driven by the session store. The check is
//! a single synchronous local read; it runs once per view mount and is
//! never revalidated while the view stays mounted.

use crate::models::AuthUser;
use crate::session::SessionProvider;

/// Top-level destinations the root entry chooses between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

/// Outcome of mounting a protected view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAccess {
    /// Render the view for this user.
    Render(AuthUser),
    /// Navigate to the login route and render nothing meanwhile.
    RedirectToLogin,
}

/// Root entry route: dashboard for a logged-in user, login otherwise.
pub fn entry_route(session: &dyn SessionProvider) -> Route {
    if session.is_logged_in() {
        Route::Dashboard
    } else {
        Route::Login
    }
}

/// Protected-view gate.
pub fn check_view_access(session: &dyn SessionProvider) -> ViewAccess {
    match session.get() {
        Some(user) => ViewAccess::Render(user),
        None => ViewAccess::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FileSessionStore, SESSION_FILE};

    #[test]
    fn test_no_session_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join(SESSION_FILE));

        assert_eq!(entry_route(&store), Route::Login);
        assert_eq!(check_view_access(&store), ViewAccess::RedirectToLogin);
    }

    #[test]
    fn test_session_renders_with_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join(SESSION_FILE));

        let user = AuthUser {
            id: "7".to_string(),
            name: "Mia Ortiz".to_string(),
            email: "mia@siteboard.dev".to_string(),
            role: Some("admin".to_string()),
        };
        store.set(Some(&user));

        assert_eq!(entry_route(&store), Route::Dashboard);
        assert_eq!(check_view_access(&store), ViewAccess::Render(user));
    }
}

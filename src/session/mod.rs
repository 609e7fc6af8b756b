// ==================== CLIENT-LOCAL SESSION ====================
// One JSON record in a well-known file stands in for "logged in". This is
// a capability flag, not a security boundary: any caller can forge a
// logged-in state by writing a well-formed record.

use crate::models::AuthUser;
use base64::Engine;
use std::fs;
use std::path::PathBuf;

/// Well-known session file under the user's home directory.
pub const SESSION_FILE: &str = ".siteboard_session.json";

/// Storage abstraction for the session record, so callers never touch the
/// file directly and the store can later be swapped for a server-verified
/// session without touching them.
pub trait SessionProvider {
    /// None when no record exists, the record is unparsable, or the
    /// environment has no persistent storage location.
    fn get(&self) -> Option<AuthUser>;

    /// Writes the record, or removes it when `user` is None.
    fn set(&self, user: Option<&AuthUser>);

    fn clear(&self) {
        self.set(None);
    }

    fn is_logged_in(&self) -> bool {
        self.get().is_some()
    }

    fn log_out(&self) {
        self.clear();
    }
}

/// File-backed store. `path` stays None when there is no home directory
/// to persist into; every read then reports "no session".
pub struct FileSessionStore {
    path: Option<PathBuf>,
}

impl FileSessionStore {
    pub fn new() -> Self {
        Self {
            path: dirs::home_dir().map(|home| home.join(SESSION_FILE)),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for FileSessionStore {
    fn get(&self) -> Option<AuthUser> {
        let path = self.path.as_ref()?;
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                // Recovered locally: a corrupt record means "logged out"
                log::warn!("⚠️ Unreadable session record, treating as logged out: {}", e);
                None
            }
        }
    }

    fn set(&self, user: Option<&AuthUser>) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        match user {
            Some(user) => match serde_json::to_string(user) {
                Ok(raw) => {
                    if let Err(e) = fs::write(path, raw) {
                        log::warn!("⚠️ Failed to persist session: {}", e);
                    }
                }
                Err(e) => log::warn!("⚠️ Failed to serialize session: {}", e),
            },
            None => {
                if let Err(e) = fs::remove_file(path) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        log::warn!("⚠️ Failed to clear session: {}", e);
                    }
                }
            }
        }
    }
}

/// Demo bearer token: the serialized session record, base64-encoded.
/// The policy middleware only checks that it decodes to a well-formed user.
pub fn to_bearer_token(user: &AuthUser) -> String {
    match serde_json::to_string(user) {
        Ok(raw) => base64::engine::general_purpose::STANDARD.encode(raw),
        Err(_) => String::new(),
    }
}

pub fn parse_bearer_token(token: &str) -> Option<AuthUser> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(token.trim())
        .ok()?;
    serde_json::from_slice(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            role: None,
        }
    }

    fn temp_store(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::at(dir.path().join(SESSION_FILE))
    }

    #[test]
    fn test_set_get_log_out_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);

        assert!(!store.is_logged_in());
        assert_eq!(store.get(), None);

        let user = sample_user();
        store.set(Some(&user));
        assert!(store.is_logged_in());
        assert_eq!(store.get(), Some(user));

        store.log_out();
        assert!(!store.is_logged_in());
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_garbage_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::at(path);
        assert_eq!(store.get(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_clear_without_record_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let store = temp_store(&dir);
        store.clear();
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_bearer_token_round_trip() {
        let user = AuthUser {
            role: Some("foreman".to_string()),
            ..sample_user()
        };
        let token = to_bearer_token(&user);
        assert!(!token.is_empty());
        assert_eq!(parse_bearer_token(&token), Some(user));

        assert_eq!(parse_bearer_token("%%% not base64 %%%"), None);
        // Valid base64, but not a user record
        let token = base64::engine::general_purpose::STANDARD.encode("[1,2,3]");
        assert_eq!(parse_bearer_token(&token), None);
    }
}

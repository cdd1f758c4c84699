//! Who is signed in.
//!
//! The identity is handed explicitly to whatever needs it (saving items,
//! editing the profile); nothing reads it from global state.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("not an email address: {0:?}")]
    InvalidEmail(String),
    #[error("session io: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

impl User {
    /// A user whose id is derived from the normalized email, so signing in
    /// again with the same address finds the same records.
    pub fn from_email(email: &str) -> Result<Self, SessionError> {
        let email = email.trim().to_lowercase();
        if !EMAIL.is_match(&email) {
            return Err(SessionError::InvalidEmail(email));
        }
        let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{}", email).as_bytes());
        Ok(Self { id, email })
    }
}

pub trait IdentityProvider {
    fn current_user(&self) -> Option<&User>;

    fn sign_in(&mut self, email: &str) -> Result<User, SessionError>;

    fn sign_out(&mut self) -> Result<(), SessionError>;

    /// The signed-in user, or `NotSignedIn`.
    fn require_user(&self) -> Result<&User, SessionError> {
        self.current_user().ok_or(SessionError::NotSignedIn)
    }
}

/// Session kept in a small JSON file so it outlives one command.
pub struct LocalIdentity {
    path: PathBuf,
    user: Option<User>,
}

impl LocalIdentity {
    /// Load the session stored at `path`; a missing file means signed out.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let user = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, user })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), SessionError> {
        match &self.user {
            Some(user) => {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, serde_json::to_vec_pretty(user)?)?;
            }
            None => match std::fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            },
        }
        Ok(())
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn sign_in(&mut self, email: &str) -> Result<User, SessionError> {
        let user = User::from_email(email)?;
        self.user = Some(user.clone());
        self.persist()?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "signed out");
        }
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session() -> PathBuf {
        std::env::temp_dir()
            .join(format!("toolbelt-test-{}", Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_user_id_stable_per_email() {
        let a = User::from_email("Ada@Example.com").unwrap();
        let b = User::from_email("  ada@example.com ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.email, "ada@example.com");
        assert_ne!(a.id, User::from_email("grace@example.com").unwrap().id);
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            User::from_email("not-an-email"),
            Err(SessionError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_session_persists_across_loads() {
        let path = temp_session();
        let mut identity = LocalIdentity::load(&path).unwrap();
        assert!(identity.current_user().is_none());
        assert!(matches!(
            identity.require_user(),
            Err(SessionError::NotSignedIn)
        ));

        let user = identity.sign_in("ada@example.com").unwrap();
        let reloaded = LocalIdentity::load(&path).unwrap();
        assert_eq!(reloaded.current_user(), Some(&user));

        identity.sign_out().unwrap();
        assert!(!path.exists());
        assert!(LocalIdentity::load(&path).unwrap().current_user().is_none());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

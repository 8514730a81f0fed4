//! Explicit session context for the surrounding page.
//!
//! # Responsibility
//! - Define the identity/sign-in contract the page composes around the
//!   task collection.
//! - Ship a dependency-injected mock backend in place of a real
//!   authentication service.
//!
//! # Invariants
//! - The task controller never calls session operations; session state is
//!   for display and redirect decisions only.

use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type UserId = Uuid;

/// Signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
}

/// Credential-shape failures surfaced before any backend would be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    EmptyEmail,
    EmptyPassword,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl Error for SessionError {}

/// Session contract consumed by page composition.
pub trait SessionContext {
    /// Currently signed-in user, if any.
    fn current_user(&self) -> Option<&User>;
    /// Establishes a session for the given credentials.
    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, SessionError>;
    /// Registers an account. Does not establish a session.
    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, SessionError>;
    /// Ends the current session. Signing out while signed out is a no-op.
    fn sign_out(&mut self);
}

/// In-process mock session accepting any well-formed credentials.
#[derive(Debug, Default)]
pub struct MockSession {
    user: Option<User>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionContext for MockSession {
    fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let user = validated_user(email, password)?;
        info!("event=sign_in module=session status=ok user_id={}", user.id);
        self.user = Some(user.clone());
        Ok(user)
    }

    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let user = validated_user(email, password)?;
        info!("event=sign_up module=session status=ok user_id={}", user.id);
        Ok(user)
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("event=sign_out module=session status=ok user_id={}", user.id);
        }
    }
}

fn validated_user(email: &str, password: &str) -> Result<User, SessionError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SessionError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(SessionError::EmptyPassword);
    }
    Ok(User {
        id: Uuid::new_v4(),
        email: email.to_string(),
    })
}

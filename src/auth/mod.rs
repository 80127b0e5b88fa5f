/// Identity provider boundary
///
/// Authentication is an external collaborator: the rest of the crate only
/// consumes "the current user or none", a subscription that observes
/// sign-in state changes, and the sign-in/sign-up/sign-out surface. Errors
/// carry user-readable messages; nothing retries automatically.

pub mod local;

pub use local::LocalIdentityProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::UserId;
use crate::store::StoreError;

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

/// Errors that can occur at the auth boundary
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {email}")]
    DuplicateAccount { email: String },

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Trait defining the identity provider interface
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in user, if any
    async fn current_user(&self) -> Option<User>;

    /// Subscribe to sign-in state changes
    ///
    /// The receiver starts at the current state and observes every
    /// subsequent sign-in and sign-out.
    async fn subscribe(&self) -> watch::Receiver<Option<User>>;

    /// Create an account and sign it in
    async fn sign_up(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<User, AuthError>;

    /// Sign in with existing credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Sign the current user out
    async fn sign_out(&self);
}

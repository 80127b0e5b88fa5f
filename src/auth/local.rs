/// Local SQLite-backed identity provider
///
/// A self-contained substitute for the managed identity backend. Accounts
/// live in the users table with salted SHA-256 password digests; the
/// signed-in state is broadcast over a watch channel so consumers observe
/// sign-in and sign-out the same way they observe store snapshots.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tokio::sync::{watch, Mutex};

use crate::auth::{AuthError, IdentityProvider, User};
use crate::domain::UserId;
use crate::store::migrations;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// SQLite-backed identity provider for local use
pub struct LocalIdentityProvider {
    conn: Mutex<Connection>,
    session: watch::Sender<Option<User>>,
}

impl LocalIdentityProvider {
    /// Open (or create) a provider backed by the given database path
    ///
    /// The users table is shared with the habit store's database; schema
    /// setup is idempotent, so either side may run it first.
    pub fn new(db_path: PathBuf) -> Result<Self, AuthError> {
        let conn = Connection::open(&db_path)?;
        migrations::initialize_database(&conn)?;

        tracing::info!("Local identity provider initialized at: {:?}", db_path);

        let (session, _) = watch::channel(None);
        Ok(Self {
            conn: Mutex::new(conn),
            session,
        })
    }

    /// Open an in-memory provider (useful for tests)
    pub fn in_memory() -> Result<Self, AuthError> {
        let conn = Connection::open_in_memory()?;
        migrations::initialize_database(&conn)?;

        let (session, _) = watch::channel(None);
        Ok(Self {
            conn: Mutex::new(conn),
            session,
        })
    }

    /// Hex digest of salt bytes followed by the password bytes
    fn digest(salt_hex: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt_hex.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    async fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }

    async fn sign_up(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let email = Self::normalize_email(email);
        let conn = self.conn.lock().await;

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(AuthError::DuplicateAccount { email });
        }

        let id = UserId::new();
        let salt = hex::encode(rand::random::<[u8; 16]>());
        let digest = Self::digest(&salt, password);

        conn.execute(
            "INSERT INTO users (id, email, display_name, password_salt, password_digest, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                email,
                display_name,
                salt,
                digest,
                Utc::now()
            ],
        )?;
        drop(conn);

        let user = User {
            id,
            display_name: display_name.to_string(),
            email,
        };
        tracing::debug!("Signed up {}", user.email);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Self::normalize_email(email);
        let conn = self.conn.lock().await;

        let row: Option<(String, String, String, String)> = conn
            .query_row(
                "SELECT id, display_name, password_salt, password_digest
                 FROM users WHERE email = ?1",
                params![email],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;
        drop(conn);

        let (id_str, display_name, salt, stored_digest) =
            row.ok_or(AuthError::InvalidCredentials)?;

        if Self::digest(&salt, password) != stored_digest {
            return Err(AuthError::InvalidCredentials);
        }

        let id = UserId::from_string(&id_str).map_err(|_| AuthError::InvalidCredentials)?;
        let user = User {
            id,
            display_name,
            email,
        };
        tracing::debug!("Signed in {}", user.email);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) {
        tracing::debug!("Signed out");
        self.session.send_replace(None);
    }
}

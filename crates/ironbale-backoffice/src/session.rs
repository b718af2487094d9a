//! Operator sessions
//!
//! A session is acquired when a dashboard route is entered and passed
//! explicitly to every operation that needs to know who is acting. It ends on
//! sign-out or when its TTL runs out.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BackofficeError, BackofficeResult};

/// An authenticated dashboard operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A dashboard account allowed to sign in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorAccount {
    pub email: String,
    pub api_key: String,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Exchanges operator credentials for a new session.
    async fn sign_in(&self, email: &str, api_key: &str) -> BackofficeResult<Session>;

    /// Resolves a token to its live session.
    async fn acquire(&self, token: &str) -> BackofficeResult<Session>;

    /// Invalidates a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str) -> BackofficeResult<()>;
}

/// Session provider holding operator accounts and live sessions in memory.
#[derive(Debug)]
pub struct InMemorySessionProvider {
    /// Lower-cased email -> API key
    operators: HashMap<String, String>,
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl InMemorySessionProvider {
    pub fn new(operators: impl IntoIterator<Item = OperatorAccount>, ttl: Duration) -> Self {
        let operators = operators
            .into_iter()
            .map(|account| (account.email.trim().to_lowercase(), account.api_key))
            .collect();
        Self { operators, sessions: DashMap::new(), ttl }
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn acquire_at(&self, token: &str, now: DateTime<Utc>) -> BackofficeResult<Session> {
        let session = self
            .sessions
            .get(token)
            .map(|entry| entry.value().clone())
            .ok_or(BackofficeError::SessionNotFound)?;

        if session.is_expired_at(now) {
            self.sessions.remove(token);
            debug!(user = %session.user_email, "Session expired");
            return Err(BackofficeError::SessionExpired { expired_at: session.expires_at });
        }
        Ok(session)
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn sign_in(&self, email: &str, api_key: &str) -> BackofficeResult<Session> {
        let email = email.trim().to_lowercase();
        match self.operators.get(&email) {
            Some(expected) if expected == api_key => {}
            _ => {
                warn!(user = %email, "Rejected dashboard sign-in");
                return Err(BackofficeError::InvalidCredentials { email });
            }
        }

        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(self.ttl).ok_or_else(|| {
            BackofficeError::SessionLifetime { ttl_minutes: self.ttl.num_minutes() }
        })?;
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_email: email,
            issued_at,
            expires_at,
        };
        self.sessions.insert(session.token.clone(), session.clone());
        info!(user = %session.user_email, expires_at = %session.expires_at, "Session issued");
        Ok(session)
    }

    async fn acquire(&self, token: &str) -> BackofficeResult<Session> {
        self.acquire_at(token, Utc::now())
    }

    async fn sign_out(&self, token: &str) -> BackofficeResult<()> {
        if let Some((_, session)) = self.sessions.remove(token) {
            info!(user = %session.user_email, "Session signed out");
        }
        Ok(())
    }
}

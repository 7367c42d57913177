//! Process-local accounts with salted password digests.

use crate::auth::{
    domain::{AuthErrorCode, AuthUser, EmailAddress, SignInRequest, SignUpRequest},
    ports::{AuthError, AuthProvider, AuthResult},
};
use crate::task::domain::UserId;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Consecutive failed sign-ins before an account is locked.
const DEFAULT_ATTEMPT_LIMIT: u32 = 5;

/// Thread-safe in-memory identity provider.
///
/// Accounts are keyed by lower-cased email. Passwords are kept only as a
/// SHA-256 digest salted with the account's user identifier.
#[derive(Clone)]
pub struct InMemoryAuthProvider {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    current: Arc<watch::Sender<Option<AuthUser>>>,
    attempt_limit: u32,
    sign_up_enabled: bool,
}

struct Account {
    user: AuthUser,
    digest: Vec<u8>,
    failed_attempts: u32,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no accounts and nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(current),
            attempt_limit: DEFAULT_ATTEMPT_LIMIT,
            sign_up_enabled: true,
        }
    }

    /// Locks an account after `limit` consecutive failed sign-ins.
    #[must_use]
    pub const fn with_attempt_limit(mut self, limit: u32) -> Self {
        self.attempt_limit = limit;
        self
    }

    /// Rejects every registration with `auth/operation-not-allowed`.
    #[must_use]
    pub const fn without_sign_up(mut self) -> Self {
        self.sign_up_enabled = false;
        self
    }

    /// The user currently signed in, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current.borrow().clone()
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, HashMap<String, Account>>> {
        self.accounts
            .write()
            .map_err(|err| AuthError::backend(std::io::Error::other(err.to_string())))
    }

    fn publish(&self, user: Option<AuthUser>) {
        self.current.send_replace(user);
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn password_digest(user_id: &UserId, password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_str().as_bytes());
    hasher.update([0_u8]);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn rejected(code: AuthErrorCode, email: &EmailAddress) -> AuthError {
    warn!(email = %email, code = %code, "authentication rejected");
    AuthError::Rejected(code)
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, request: &SignInRequest) -> AuthResult<AuthUser> {
        let user = {
            let mut accounts = self.write()?;
            let account = accounts
                .get_mut(&request.email().canonical())
                .ok_or_else(|| rejected(AuthErrorCode::UserNotFound, request.email()))?;
            if account.failed_attempts >= self.attempt_limit {
                return Err(rejected(AuthErrorCode::TooManyRequests, request.email()));
            }
            let digest = password_digest(account.user.user_id(), request.password());
            if digest != account.digest {
                account.failed_attempts = account.failed_attempts.saturating_add(1);
                return Err(rejected(AuthErrorCode::WrongPassword, request.email()));
            }
            account.failed_attempts = 0;
            account.user.clone()
        };
        info!(user = %user.user_id(), "signed in");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<AuthUser> {
        if !self.sign_up_enabled {
            return Err(rejected(
                AuthErrorCode::OperationNotAllowed,
                request.email(),
            ));
        }
        let user = {
            let mut accounts = self.write()?;
            let key = request.email().canonical();
            if accounts.contains_key(&key) {
                return Err(rejected(AuthErrorCode::EmailAlreadyInUse, request.email()));
            }
            let user_id =
                UserId::new(Uuid::new_v4().to_string()).map_err(AuthError::backend)?;
            let digest = password_digest(&user_id, request.password());
            let user = AuthUser::new(
                user_id,
                request.email().clone(),
                Some(request.display_name().to_owned()),
            );
            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    digest,
                    failed_attempts: 0,
                },
            );
            user
        };
        info!(user = %user.user_id(), "account created");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let signed_out = self.current.send_if_modified(|current| current.take().is_some());
        if signed_out {
            debug!("signed out");
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.current.subscribe()
    }
}

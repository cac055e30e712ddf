use crate::db::models::{NewUser, UserId};
use crate::db::sqlite::UsersStorage;
use crate::error::AitekenError;
use crate::service::password::PasswordHasher;
use crate::types::auth::{LoginRequest, RegisterRequest};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Registration and login against the `Users` table.
#[derive(Clone)]
pub struct CredentialService {
    storage: UsersStorage,
    hasher: PasswordHasher,
    deadline: Duration,
}

impl CredentialService {
    pub fn new(storage: UsersStorage, hasher: PasswordHasher, deadline: Duration) -> Self {
        Self {
            storage,
            hasher,
            deadline,
        }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &UsersStorage {
        &self.storage
    }

    /// Hash the password and persist a new user. Fields are stored as given.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserId, AitekenError> {
        self.with_deadline(async move {
            let password_hash = self.hasher.hash(req.password).await?;
            let user_id = self
                .storage
                .insert_user(NewUser {
                    username: req.username,
                    email: req.email,
                    password_hash,
                })
                .await?;
            info!(user_id, "user registered");
            Ok(user_id)
        })
        .await
    }

    /// Resolve the user id for a matching email/password pair. An unknown email
    /// and a wrong password both yield [`AitekenError::InvalidCredentials`].
    pub async fn login(&self, req: LoginRequest) -> Result<UserId, AitekenError> {
        self.with_deadline(async move {
            let Some(user) = self.storage.find_by_email(&req.email).await? else {
                self.hasher.verify_dummy(req.password).await?;
                debug!("login for unknown email");
                return Err(AitekenError::InvalidCredentials);
            };

            if !self.hasher.verify(req.password, user.password_hash).await? {
                debug!(user_id = user.user_id, "login with wrong password");
                return Err(AitekenError::InvalidCredentials);
            }

            info!(user_id = user.user_id, "user logged in");
            Ok(user.user_id)
        })
        .await
    }

    async fn with_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, AitekenError>>,
    ) -> Result<T, AitekenError> {
        tokio::time::timeout(self.deadline, fut)
            .await
            .map_err(|_| AitekenError::Timeout(self.deadline.as_secs()))?
    }
}

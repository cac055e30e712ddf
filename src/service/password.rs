use crate::error::AitekenError;
use std::sync::Arc;

/// bcrypt hashing that runs on tokio's blocking pool so a hash never stalls
/// the request executor.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Verified against when no user matches, so both login failures cost
    /// the same amount of work.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AitekenError> {
        let dummy_hash = bcrypt::hash("aiteken-dummy-password", cost)?;
        Ok(Self {
            cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Salted hash of `password`; every call draws a fresh salt.
    pub async fn hash(&self, password: String) -> Result<String, AitekenError> {
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    pub async fn verify(&self, password: String, hash: String) -> Result<bool, AitekenError> {
        let matched =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matched)
    }

    /// Burn one verification against the dummy hash. The result is discarded.
    pub async fn verify_dummy(&self, password: String) -> Result<(), AitekenError> {
        let hash = self.dummy_hash.to_string();
        self.verify(password, hash).await.map(|_| ())
    }
}

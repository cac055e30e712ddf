use figment::{
    Figment,
    providers::{Env, Serialized},
};
use crate::error::AitekenError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 2^10 rounds per hash.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Environment keys read by [`Config::figment`]. Matched case-insensitively.
const ENV_KEYS: &[&str] = &[
    "host",
    "port",
    "database_url",
    "db_max_connections",
    "db_acquire_timeout_secs",
    "request_timeout_secs",
    "bcrypt_cost",
    "loglevel",
];

/// Runtime configuration, built from defaults overlaid with the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// sqlx connection string; the file is created when missing.
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// bcrypt work factor, 2^cost rounds.
    pub bcrypt_cost: u32,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "sqlite:aiteken_db.sqlite".to_string(),
            db_max_connections: 5,
            db_acquire_timeout_secs: 5,
            request_timeout_secs: 10,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    pub fn load() -> Result<Self, AitekenError> {
        Ok(Self::figment().extract()?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_match_documented_values() {
        Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.port, 3000);
            assert_eq!(cfg.bcrypt_cost, 10);
            assert_eq!(cfg.database_url, "sqlite:aiteken_db.sqlite");
            assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "8080");
            jail.set_env("DATABASE_URL", "sqlite::memory:");
            jail.set_env("BCRYPT_COST", "4");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.port, 8080);
            assert_eq!(cfg.database_url, "sqlite::memory:");
            assert_eq!(cfg.bcrypt_cost, 4);
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("HOSTNAME", "box");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn invalid_port_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "not-a-port");
            assert!(matches!(Config::load(), Err(AitekenError::Config(_))));
            Ok(())
        });
    }
}

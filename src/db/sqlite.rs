use crate::config::Config;
use crate::db::models::{DbUser, NewUser, UserId};
use crate::db::schema::{SCHEMA, TableDef};
use crate::error::AitekenError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{error, info, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Open the pool described by `cfg`, creating the database file when missing.
/// Foreign key enforcement is switched on for every connection.
pub async fn connect(cfg: &Config) -> Result<SqlitePool, AitekenError> {
    let connect_opts = SqliteConnectOptions::from_str(cfg.database_url.as_str())?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.db_max_connections.max(1))
        .acquire_timeout(cfg.acquire_timeout())
        .connect_with(connect_opts)
        .await?;
    info!(database_url = %cfg.database_url, "connected to database");
    Ok(pool)
}

/// Outcome of a schema initialization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// Tables whose DDL ran cleanly. Includes tables that already existed.
    pub created: Vec<&'static str>,
    pub failed: Vec<&'static str>,
    /// Tables not attempted because a table they reference failed.
    pub skipped: Vec<&'static str>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ensure every finance table exists.
    pub async fn init_schema(&self) -> SchemaReport {
        self.init_tables(SCHEMA).await
    }

    /// Run the DDL for `tables` in order. A failing table is logged and every
    /// later table referencing it (directly or through another skipped table)
    /// is skipped; independent tables still run.
    pub async fn init_tables(&self, tables: &[TableDef]) -> SchemaReport {
        let mut report = SchemaReport::default();

        for table in tables {
            let blocked_by = table.depends_on.iter().find(|dep| {
                report.failed.contains(*dep) || report.skipped.contains(*dep)
            });
            if let Some(dep) = blocked_by {
                warn!(
                    table = table.name,
                    dependency = %dep,
                    "skipping table; dependency unavailable"
                );
                report.skipped.push(table.name);
                continue;
            }

            match self.run_statements(table).await {
                Ok(()) => {
                    info!(table = table.name, "table created or already present");
                    report.created.push(table.name);
                }
                Err(e) => {
                    error!(table = table.name, error = %e, "failed to create table");
                    report.failed.push(table.name);
                }
            }
        }

        report
    }

    async fn run_statements(&self, table: &TableDef) -> Result<(), AitekenError> {
        for stmt in table.statements {
            sqlx::query(stmt.trim()).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Names of the user tables currently present, sorted.
    pub async fn table_names(&self) -> Result<Vec<String>, AitekenError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Insert a user and return its generated id.
    pub async fn insert_user(&self, user: NewUser) -> Result<UserId, AitekenError> {
        let result =
            sqlx::query("INSERT INTO Users (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(user.username)
                .bind(user.email)
                .bind(user.password_hash)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Look up a user by exact email. Email is not unique; the oldest row wins.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<DbUser>, AitekenError> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"SELECT user_id, username, email, password_hash, created_at, updated_at
               FROM Users WHERE email = ? ORDER BY user_id LIMIT 1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[cfg(test)]
    pub async fn get_by_id(&self, user_id: UserId) -> Result<Option<DbUser>, AitekenError> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"SELECT user_id, username, email, password_hash, created_at, updated_at
               FROM Users WHERE user_id = ?"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

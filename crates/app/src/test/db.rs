//! Per-test databases inside one shared PostgreSQL container.

use std::{
    process,
    sync::atomic::{AtomicU64, Ordering},
};

use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

use crate::database;

const USER: &str = "storefront_test";
const PASSWORD: &str = "storefront_test_password";

static CONTAINER: OnceCell<ContainerAsync<PostgresImage>> = OnceCell::const_new();
static NEXT_DATABASE: AtomicU64 = AtomicU64::new(0);

async fn container() -> &'static ContainerAsync<PostgresImage> {
    CONTAINER
        .get_or_init(|| async {
            PostgresImage::default()
                .with_user(USER)
                .with_password(PASSWORD)
                .with_db_name("storefront_test")
                .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
                .start()
                .await
                .expect("Failed to start PostgreSQL container")
        })
        .await
}

async fn server_url() -> String {
    let port = container()
        .await
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}")
}

/// Database names are generated here, never taken from input, so they only
/// ever contain ASCII letters, digits and underscores.
fn next_database_name() -> String {
    let sequence = NEXT_DATABASE.fetch_add(1, Ordering::Relaxed);

    format!("storefront_{}_{sequence}", process::id())
}

/// A freshly migrated database owned by a single test.
///
/// Isolation is per database: services commit normally and no state leaks
/// between tests. The database is left for the container to discard unless
/// [`TestDb::cleanup`] is called.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    pub name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let name = next_database_name();
        let server_url = server_url().await;

        let mut admin = PgConnection::connect(&format!("{server_url}/postgres"))
            .await
            .expect("Failed to connect to postgres database");

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&format!("{server_url}/{name}"))
            .await
            .expect("Failed to create pool for test database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    /// Drops the database now instead of leaving it to the container.
    pub async fn cleanup(self) {
        self.pool.close().await;

        let server_url = server_url().await;

        if let Ok(mut admin) = PgConnection::connect(&format!("{server_url}/postgres")).await {
            let _dropped = query(&format!(
                "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
                self.name
            ))
            .execute(&mut admin)
            .await;

            let _closed = admin.close().await;
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_names_are_unique_identifiers() {
        let first = next_database_name();
        let second = next_database_name();

        assert_ne!(first, second);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        );
    }

    #[tokio::test]
    async fn fresh_database_is_migrated() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('users', 'products', 'carts', 'orders')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query information schema");

        assert_eq!(tables, 4);

        test_db.cleanup().await;
    }
}

//! Embedded PostgreSQL helpers for the Diesel store suites.
//!
//! Each test gets its own temporary database on the shared cluster, with the
//! embedded migrations applied through a synchronous Diesel connection.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use territory_backend::outbound::persistence::MIGRATIONS;

use super::format_postgres_error;

/// Ensures `PG_PASSWORD` is stable so a reused data directory still accepts
/// the credentials chosen when it was first initialised.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: called before the shared cluster spawns any threads; the
        // library serialises cluster start-up behind its own mutex.
        unsafe {
            std::env::set_var("PG_PASSWORD", "territory_embedded_test");
        }
    }
}

/// Creates a fresh, migrated database on the shared embedded cluster.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    ensure_stable_password();
    let cluster = pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("start embedded cluster: {err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    migrate_schema(&database.url().to_string())?;
    Ok(database)
}

/// Runs all pending Diesel migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Overwrite a row's demographics column with raw text.
pub fn write_raw_demographics(url: &str, id: i32, text: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "UPDATE territories SET demographics = $1 WHERE id = $2",
            &[&text, &id],
        )
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}

/// Read a row's demographics column as stored.
pub fn read_raw_demographics(url: &str, id: i32) -> Result<String, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one("SELECT demographics FROM territories WHERE id = $1", &[&id])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Delete a row behind the repository's back.
pub fn delete_raw_territory(url: &str, id: i32) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute("DELETE FROM territories WHERE id = $1", &[&id])
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}

/// Insert a row with an explicit id behind the repository's back.
pub fn insert_raw_territory(url: &str, id: i32, name: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "INSERT INTO territories (id, name, zip_codes, demographics) \
             VALUES ($1, $2, ARRAY['98101'], '{}')",
            &[&id, &name],
        )
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}

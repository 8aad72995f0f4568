//! Embedded PostgreSQL provisioning for repository tests.
//!
//! One cluster is shared per test binary. Every test gets its own temporary
//! database with the embedded migrations applied, so suites can run in
//! parallel without seeing each other's rows.

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use feedback_board::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Keeps `PG_PASSWORD` stable so a reused data directory still accepts the
/// password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads; the shared
        // handle serialises bootstrap so this executes at most once.
        unsafe {
            std::env::set_var("PG_PASSWORD", "feedback_embedded_test");
        }
    }
}

/// Shared cluster for this test binary, retrying transient bootstrap failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Fresh database with the schema migrated to the latest version.
pub fn provision_database(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase, String> {
    let name = format!("feedback_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    runtime
        .block_on(run_pending_migrations(database.url()))
        .map_err(|err| format!("migrate temporary database: {err}"))?;
    Ok(database)
}

/// Drop `table` to simulate a statement failing part-way through a write.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!("DROP TABLE IF EXISTS {table} CASCADE"))
        .execute(&mut conn)
        .map_err(|err| err.to_string())?;
    Ok(())
}

//! Embedded PostgreSQL for repository integration tests.
//!
//! Each caller gets its own temporary database with the crate's migrations
//! applied. Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start; without
//! it a setup failure fails the test so CI breakage is not masked.

use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use uuid::Uuid;

use form_intake::outbound::persistence::run_pending_migrations;

/// A migrated temporary database and the cluster that hosts it.
///
/// Field order matters: the database is dropped before its cluster.
pub struct MigratedDatabase {
    database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl MigratedDatabase {
    /// Connection URL for the temporary database.
    pub fn url(&self) -> &str {
        self.database.url()
    }
}

/// Start a cluster, create a uniquely named database, and migrate it.
pub fn migrated_database(prefix: &str) -> Result<MigratedDatabase, String> {
    let cluster = TestCluster::new().map_err(|err| format!("start cluster: {err:?}"))?;
    let name = format!("{prefix}_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    run_pending_migrations(database.url()).map_err(|err| format!("migrate {name}: {err}"))?;
    Ok(MigratedDatabase {
        database,
        _cluster: cluster,
    })
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip (returning `None`) when `SKIP_TEST_CLUSTER` is truthy, otherwise panic.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

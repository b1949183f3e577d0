use std::path::PathBuf;

use diesel::prelude::*;
use tempfile::TempDir;
use tokenwatch::adapter::outbound::sqlite::database::connection::{open, DbPool};
use tokenwatch::adapter::outbound::sqlite::store::SqliteAlertStore;

/// Temporary SQLite database file for integration tests.
///
/// The file outlives every store opened on it, so reopening simulates a
/// process restart.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("tokenwatch-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("alerts.db");
        Self { _dir: dir, path }
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Open a fresh pool on the file, running migrations.
    pub fn pool(&self) -> DbPool {
        let pool = open(&self.url()).expect("open sqlite database");
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }
        pool
    }

    /// Open a store as a fresh process would.
    pub fn store(&self) -> SqliteAlertStore {
        SqliteAlertStore::open(self.pool()).expect("open alert store")
    }
}

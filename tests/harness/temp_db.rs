use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use slotwatch::adapter::outbound::sqlite::database::connection::{open, DbPool};

/// Temporary SQLite database file for integration tests.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let path = Self::path_for(name);
        let pool = open(&path.display().to_string()).expect("open sqlite database");
        Self { path, pool }
    }

    /// A unique path under the temp dir; nothing is created.
    pub fn path_for(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("slotwatch-{name}-{nanos}.db"));
        path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

use rusqlite::{Connection, OpenFlags, Result};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Read-only handle on a reference manager database (`zotero.sqlite`).
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        // A running Zotero may hold the write lock for a moment.
        conn.busy_timeout(Duration::from_secs(5))?;
        debug!("Opened {} read-only", path.display());
        Ok(Database { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

//! Database module for persisting client preferences
//!
//! Uses SQLite so a client's locale choice survives restarts. Rows are keyed
//! by client id and preference key.

use crate::core::{Config, Result};
use crate::prefs::PreferenceStore;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Database manager
pub struct Database {
    conn: Connection,
}

/// Stored preference row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub client_id: String,
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

impl Database {
    /// Open the database named by the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = config.database_path()?;
        Self::open(&db_path)
    }

    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.init_schema()?;

        log::debug!("Preference database ready at {}", path.display());
        Ok(db)
    }

    /// Private database, gone when dropped
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                client_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (client_id, key)
            );
            "#,
        )?;

        Ok(())
    }

    /// Read one preference
    pub fn get_preference(&self, client_id: &str, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE client_id = ?1 AND key = ?2",
                params![client_id, key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Insert or replace one preference
    pub fn set_preference(&self, client_id: &str, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO preferences (client_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(client_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![client_id, key, value, now],
        )?;

        Ok(())
    }

    /// All preferences of a client
    pub fn get_preferences(&self, client_id: &str) -> Result<Vec<PreferenceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_id, key, value, updated_at
             FROM preferences
             WHERE client_id = ?1
             ORDER BY key ASC",
        )?;

        let records = stmt
            .query_map(params![client_id], |row| {
                Ok(PreferenceRecord {
                    client_id: row.get(0)?,
                    key: row.get(1)?,
                    value: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(records)
    }

    /// Preference store view for one client
    pub fn client<'a>(&'a self, client_id: &str) -> ClientPreferences<'a> {
        ClientPreferences {
            db: self,
            client_id: client_id.to_string(),
        }
    }
}

/// A client's slice of the preference table
pub struct ClientPreferences<'a> {
    db: &'a Database,
    client_id: String,
}

impl PreferenceStore for ClientPreferences<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.get_preference(&self.client_id, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.db.set_preference(&self.client_id, key, value)
    }
}

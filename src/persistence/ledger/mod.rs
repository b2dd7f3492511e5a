//! Review ledger backed by `SQLite`.
//!
//! The ledger persists the ordered account list and the review cursor so a
//! review session survives restarts. Decisions are written row-by-row
//! inside a transaction together with the cursor, which keeps disk state
//! consistent with memory before any side effect (such as opening a
//! profile in the browser) runs.

use chrono::{DateTime, Utc};
use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::sqlite::SqliteConnection;

use crate::model::{AccountRecord, Handle, ReviewStatus};
use crate::review::ReviewStore;

use super::PersistenceError;

const ACCOUNTS_TABLE: &str = "accounts";

/// Database path used when no `database_url` is configured.
pub const DEFAULT_DATABASE_URL: &str = "followsweep.sqlite";

/// SQLite-backed store for the review session.
#[derive(Debug, Clone)]
pub struct ReviewLedger {
    database_url: String,
}

impl Default for ReviewLedger {
    /// Returns a ledger targeting [`DEFAULT_DATABASE_URL`].
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

impl ReviewLedger {
    /// Create a ledger wrapper targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    /// Loads the persisted review session.
    ///
    /// Accounts come back in review order and the cursor is clamped into
    /// the valid range, so a truncated or hand-edited database still loads
    /// into a usable store.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, the query fails, or a stored row cannot be
    /// mapped back into a record.
    pub fn load(&self) -> Result<ReviewStore, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct AccountRow {
            #[diesel(sql_type = Text)]
            handle: String,
            #[diesel(sql_type = Text)]
            name: String,
            #[diesel(sql_type = Nullable<Text>)]
            avatar: Option<String>,
            #[diesel(sql_type = Nullable<Text>)]
            bio: Option<String>,
            #[diesel(sql_type = Nullable<BigInt>)]
            follows_you: Option<i64>,
            #[diesel(sql_type = Text)]
            status: String,
            #[diesel(sql_type = Text)]
            scanned_at: String,
            #[diesel(sql_type = Nullable<Text>)]
            decided_at: Option<String>,
        }

        let mut connection = self.establish_connection()?;

        let rows: Vec<AccountRow> = sql_query(
            "SELECT handle, name, avatar, bio, follows_you, status, scanned_at, decided_at \
             FROM accounts ORDER BY position ASC;",
        )
        .load(&mut connection)
        .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let handle = Handle::new(&row.handle).map_err(|error| {
                PersistenceError::CorruptRow {
                    message: error.to_string(),
                }
            })?;
            let status: ReviewStatus =
                row.status
                    .parse()
                    .map_err(|error: crate::model::ModelError| PersistenceError::CorruptRow {
                        message: error.to_string(),
                    })?;
            accounts.push(AccountRecord {
                handle,
                name: row.name,
                avatar: row.avatar,
                bio: row.bio,
                follows_you: row.follows_you.map(|value| value != 0),
                status,
                scanned_at: parse_timestamp(&row.scanned_at)?,
                decided_at: row.decided_at.as_deref().map(parse_timestamp).transpose()?,
            });
        }

        let cursor = self.load_cursor(&mut connection)?;
        Ok(ReviewStore::from_parts(accounts, cursor))
    }

    /// Replaces the whole persisted session with the given store contents.
    ///
    /// Used after merging a scan and when clearing; the write happens in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn replace_all(&self, store: &ReviewStore) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        let result = connection.transaction::<_, diesel::result::Error, _>(|conn| {
            sql_query("DELETE FROM accounts;").execute(conn)?;
            for (position, record) in store.accounts().iter().enumerate() {
                sql_query(
                    "INSERT INTO accounts \
                     (handle, name, avatar, bio, follows_you, status, scanned_at, decided_at, \
                      position) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);",
                )
                .bind::<Text, _>(record.handle.as_str())
                .bind::<Text, _>(record.name.as_str())
                .bind::<Nullable<Text>, _>(record.avatar.as_deref())
                .bind::<Nullable<Text>, _>(record.bio.as_deref())
                .bind::<Nullable<BigInt>, _>(record.follows_you.map(i64::from))
                .bind::<Text, _>(record.status.as_str())
                .bind::<Text, _>(record.scanned_at.to_rfc3339())
                .bind::<Nullable<Text>, _>(record.decided_at.map(|at| at.to_rfc3339()))
                .bind::<BigInt, _>(position_to_i64(position))
                .execute(conn)?;
            }
            sql_query("UPDATE review_state SET cursor = ? WHERE id = 1;")
                .bind::<BigInt, _>(position_to_i64(store.cursor()))
                .execute(conn)?;
            Ok(())
        });

        result.map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Persists one decision: the touched record (when a status changed)
    /// and the cursor, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::WriteFailed`] when no stored row matches
    /// the record's handle, and [`PersistenceError`] for other write
    /// failures. Nothing is committed on failure.
    pub fn record_decision(
        &self,
        changed: Option<&AccountRecord>,
        cursor: usize,
    ) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        let result = connection.transaction::<_, diesel::result::Error, _>(|conn| {
            if let Some(record) = changed {
                let affected = sql_query(
                    "UPDATE accounts \
                     SET status = ?, decided_at = ?, updated_at = CURRENT_TIMESTAMP \
                     WHERE handle = ?;",
                )
                .bind::<Text, _>(record.status.as_str())
                .bind::<Nullable<Text>, _>(record.decided_at.map(|at| at.to_rfc3339()))
                .bind::<Text, _>(record.handle.as_str())
                .execute(conn)?;
                if affected == 0 {
                    return Err(diesel::result::Error::NotFound);
                }
            }
            sql_query("UPDATE review_state SET cursor = ? WHERE id = 1;")
                .bind::<BigInt, _>(position_to_i64(cursor))
                .execute(conn)?;
            Ok(())
        });

        result.map_err(|error| match error {
            diesel::result::Error::NotFound => PersistenceError::WriteFailed {
                message: match changed {
                    Some(record) => format!("no stored account for handle {}", record.handle),
                    None => "no stored account to update".to_owned(),
                },
            },
            other => Self::map_write_error(&mut connection, &other),
        })
    }

    /// Deletes every stored account and resets the cursor.
    ///
    /// Returns the number of removed accounts.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn clear(&self) -> Result<usize, PersistenceError> {
        let mut connection = self.establish_connection()?;

        let result = connection.transaction::<_, diesel::result::Error, _>(|conn| {
            let removed = sql_query("DELETE FROM accounts;").execute(conn)?;
            sql_query("UPDATE review_state SET cursor = 0 WHERE id = 1;").execute(conn)?;
            Ok(removed)
        });

        result.map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    fn load_cursor(&self, connection: &mut SqliteConnection) -> Result<usize, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct CursorRow {
            #[diesel(sql_type = BigInt)]
            cursor: i64,
        }

        let row: Option<CursorRow> =
            sql_query("SELECT cursor FROM review_state WHERE id = 1 LIMIT 1;")
                .get_result(connection)
                .optional()
                .map_err(|error| Self::map_query_error(connection, &error))?;

        Ok(row.map_or(0, |r| usize::try_from(r.cursor).unwrap_or(0)))
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        let mut connection = SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })?;

        sql_query("PRAGMA foreign_keys = ON;")
            .execute(&mut connection)
            .map(drop)
            .map_err(|error| PersistenceError::ForeignKeysEnableFailed {
                message: error.to_string(),
            })?;

        Ok(connection)
    }

    fn accounts_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(ACCOUNTS_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::accounts_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|error| PersistenceError::CorruptRow {
            message: format!("timestamp {raw:?}: {error}"),
        })
}

fn position_to_i64(value: usize) -> i64 {
    // Positions and cursors are `usize` but SQLite binds use `i64`; saturate
    // rather than wrap.
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;

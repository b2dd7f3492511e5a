//! Local persistence and database migrations.
//!
//! FollowSweep keeps the review session in a local sqlite database so
//! triage can stop and resume across runs. The schema is managed with
//! Diesel migrations so the database can be created and upgraded
//! consistently across machines.

mod error;
mod ledger;
mod migrator;

pub use error::PersistenceError;
pub use ledger::{DEFAULT_DATABASE_URL, ReviewLedger};
pub use migrator::{INITIAL_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, migrate_database};

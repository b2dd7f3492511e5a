//! Database migration operations.

use followsweep::persistence::{PersistenceError, migrate_database};
use followsweep::telemetry::{StderrJsonlTelemetrySink, TelemetrySink};
use followsweep::{FollowSweepConfig, SweepError};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] if the database URL is blank.
/// Returns [`SweepError::Persistence`] for connection or migration failures.
pub fn run(config: &FollowSweepConfig) -> Result<(), SweepError> {
    let telemetry = StderrJsonlTelemetrySink;
    ensure_schema(&config.database_url, &telemetry)
}

/// Applies pending migrations to the given database.
///
/// Shared by the explicit `--migrate-db` mode and the implicit migration
/// every other mode performs before touching the ledger.
pub(super) fn ensure_schema(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<(), SweepError> {
    migrate_database(database_url, telemetry)
        .map(drop)
        .map_err(|error| map_persistence_error(&error))
}

/// Maps a persistence error to a sweep error.
///
/// Configuration-related errors (blank URL) become
/// [`SweepError::Configuration`], while runtime errors (connection,
/// migration, query failures) become [`SweepError::Persistence`].
pub(super) fn map_persistence_error(error: &PersistenceError) -> SweepError {
    if is_configuration_error(error) {
        SweepError::Configuration {
            message: error.to_string(),
        }
    } else {
        SweepError::Persistence {
            message: error.to_string(),
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}

//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.followsweep.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `FOLLOWSWEEP_CAPTURE`,
//!    `FOLLOWSWEEP_DATABASE_URL`, and friends
//! 4. **Command-line arguments** – `--capture`/`-c`, `--tui`/`-T`, etc.
//!
//! # Configuration File
//!
//! Place `.followsweep.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! host = "x.com"
//! database_url = "followsweep.sqlite"
//! max_accounts = 200
//! scan_timeout_ms = 60000
//! scroll_delay_ms = 1000
//! ```

use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::model::{ModelError, SourceHost};
use crate::persistence::DEFAULT_DATABASE_URL;
use crate::scan::{
    DEFAULT_MAX_ACCOUNTS, DEFAULT_SCAN_TIMEOUT_MS, DEFAULT_SCROLL_DELAY_MS, ScanLimits,
};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Headless scan of a capture file into the review store.
    Scan,
    /// Interactive TUI for triaging scanned accounts.
    ReviewTui,
    /// Write the review store to a CSV or Markdown document.
    Export,
    /// Empty the review store after confirmation.
    Clear,
    /// Run database migrations and exit.
    MigrateDb,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `FOLLOWSWEEP_CAPTURE` or `--capture`: Capture file to scan
/// - `FOLLOWSWEEP_DATABASE_URL` or `--database-url`: Local `SQLite` database path
/// - `FOLLOWSWEEP_HOST` or `--host`: Source network host for profile URLs
/// - `FOLLOWSWEEP_MAX_ACCOUNTS` or `--max-accounts`: Scan account limit
/// - `FOLLOWSWEEP_SCAN_TIMEOUT_MS` or `--scan-timeout-ms`: Scan deadline
/// - `FOLLOWSWEEP_SCROLL_DELAY_MS` or `--scroll-delay-ms`: Delay between scroll cycles
/// - `FOLLOWSWEEP_LOG_FILE` or `--log-file`: Diagnostic log destination
///
/// # Example
///
/// ```no_run
/// use followsweep::FollowSweepConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = FollowSweepConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FOLLOWSWEEP",
    discovery(
        dotfile_name = ".followsweep.toml",
        config_file_name = "followsweep.toml",
        app_name = "followsweep"
    )
)]
pub struct FollowSweepConfig {
    /// Path to a following-list capture file to scan.
    ///
    /// Without `--tui`, launches a headless scan that merges the capture
    /// into the review store. With `--tui`, arms the `r` key so a scan can
    /// be started from inside the session.
    ///
    /// Can be provided via:
    /// - CLI: `--capture <PATH>` or `-c <PATH>`
    /// - Environment: `FOLLOWSWEEP_CAPTURE`
    /// - Config file: `capture = "..."`
    #[ortho_config(cli_short = 'c')]
    pub capture: Option<String>,

    /// Enables the interactive TUI for reviewing scanned accounts.
    ///
    /// Can be provided via:
    /// - CLI: `--tui` / `-T`
    /// - Config file: `tui = true`
    #[ortho_config(cli_short = 'T')]
    pub tui: bool,

    /// Exports the review store and exits.
    ///
    /// The document lands at `--export-path` when given, otherwise in the
    /// current directory under a generated timestamped name.
    ///
    /// Can be provided via:
    /// - CLI: `--export` / `-e`
    /// - Config file: `export = true`
    #[ortho_config(cli_short = 'e')]
    pub export: bool,

    /// Destination path for the exported document.
    ///
    /// Can be provided via:
    /// - CLI: `--export-path <PATH>`
    /// - Environment: `FOLLOWSWEEP_EXPORT_PATH`
    /// - Config file: `export_path = "..."`
    #[ortho_config()]
    pub export_path: Option<String>,

    /// Export document format: `csv` (default) or `markdown`.
    ///
    /// Can be provided via:
    /// - CLI: `--export-format <FORMAT>`
    /// - Environment: `FOLLOWSWEEP_EXPORT_FORMAT`
    /// - Config file: `export_format = "..."`
    #[ortho_config()]
    pub export_format: Option<String>,

    /// Empties the review store and exits.
    ///
    /// Prompts for a literal `yes` on standard input before deleting
    /// anything; the deletion cannot be undone.
    ///
    /// Can be provided via:
    /// - CLI: `--clear`
    /// - Config file: `clear = true`
    #[ortho_config()]
    pub clear: bool,

    /// Runs database migrations and exits.
    ///
    /// When set, the application initialises the database at
    /// `database_url`, applies any pending Diesel migrations, records the
    /// schema version in telemetry, and exits without scanning or
    /// reviewing.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// Local `SQLite` database URL/path used for persistence.
    ///
    /// Diesel uses a filesystem path for `SQLite` connections. The same
    /// value is also used by the Diesel CLI via `DATABASE_URL` when running
    /// migrations.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `FOLLOWSWEEP_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config()]
    pub database_url: String,

    /// Source network host used to derive profile URLs.
    ///
    /// Can be provided via:
    /// - CLI: `--host <HOST>`
    /// - Environment: `FOLLOWSWEEP_HOST`
    /// - Config file: `host = "..."`
    #[ortho_config()]
    pub host: String,

    /// Maximum number of accounts a scan collects before stopping.
    ///
    /// The scan stops scrolling once the collection reaches this size. A
    /// single extraction cycle may overshoot it; everything extracted in
    /// that cycle is kept.
    ///
    /// Can be provided via:
    /// - CLI: `--max-accounts <N>`
    /// - Environment: `FOLLOWSWEEP_MAX_ACCOUNTS`
    /// - Config file: `max_accounts = 200`
    #[ortho_config()]
    pub max_accounts: usize,

    /// Overall scan deadline in milliseconds.
    ///
    /// A scan that reaches the deadline completes normally with whatever it
    /// has collected so far.
    ///
    /// Can be provided via:
    /// - CLI: `--scan-timeout-ms <MS>`
    /// - Environment: `FOLLOWSWEEP_SCAN_TIMEOUT_MS`
    /// - Config file: `scan_timeout_ms = 60000`
    #[ortho_config()]
    pub scan_timeout_ms: u64,

    /// Delay between scroll cycles in milliseconds.
    ///
    /// Gives the source time to load more entries after each scroll before
    /// the next extraction.
    ///
    /// Can be provided via:
    /// - CLI: `--scroll-delay-ms <MS>`
    /// - Environment: `FOLLOWSWEEP_SCROLL_DELAY_MS`
    /// - Config file: `scroll_delay_ms = 1000`
    #[ortho_config()]
    pub scroll_delay_ms: u64,

    /// Appends diagnostic logs to the given file.
    ///
    /// Without this the TUI runs silent; headless modes log to stderr.
    ///
    /// Can be provided via:
    /// - CLI: `--log-file <PATH>`
    /// - Environment: `FOLLOWSWEEP_LOG_FILE`
    /// - Config file: `log_file = "..."`
    #[ortho_config()]
    pub log_file: Option<String>,
}

const DEFAULT_HOST: &str = "x.com";

impl Default for FollowSweepConfig {
    fn default() -> Self {
        Self {
            capture: None,
            tui: false,
            export: false,
            export_path: None,
            export_format: None,
            clear: false,
            migrate_db: false,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            max_accounts: DEFAULT_MAX_ACCOUNTS,
            scan_timeout_ms: DEFAULT_SCAN_TIMEOUT_MS,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            log_file: None,
        }
    }
}

impl FollowSweepConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Returns `MigrateDb`, `Clear`, or `Export` when the corresponding
    /// flag is set (in that order of precedence), `Scan` when a capture is
    /// given without `--tui`, and `ReviewTui` otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDb
        } else if self.clear {
            OperationMode::Clear
        } else if self.export {
            OperationMode::Export
        } else if self.capture.is_some() && !self.tui {
            OperationMode::Scan
        } else {
            OperationMode::ReviewTui
        }
    }

    /// Returns the capture file path if one is configured.
    #[must_use]
    pub fn capture_path(&self) -> Option<&Utf8Path> {
        self.capture.as_deref().map(Utf8Path::new)
    }

    /// Builds scan limits from the configured knobs.
    #[must_use]
    pub const fn scan_limits(&self) -> ScanLimits {
        ScanLimits {
            max_accounts: self.max_accounts,
            scroll_delay: Duration::from_millis(self.scroll_delay_ms),
            timeout: Duration::from_millis(self.scan_timeout_ms),
        }
    }

    /// Validates the configured host and returns it in typed form.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHost`] when the configured host is not
    /// a bare domain name.
    pub fn source_host(&self) -> Result<SourceHost, ModelError> {
        SourceHost::new(&self.host)
    }
}

#[cfg(test)]
mod tests;

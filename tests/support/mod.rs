//! Shared test utilities.

use tempfile::TempDir;

pub mod runtime;

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Renders a path inside the temporary directory as a database URL.
///
/// # Panics
///
/// Panics if the path is not valid UTF-8.
pub fn database_url_in(temp_dir: &TempDir, file_name: &str) -> String {
    let path = temp_dir.path().join(file_name);
    path.to_str()
        .unwrap_or_else(|| panic!("temporary path is not valid UTF-8: {}", path.display()))
        .to_owned()
}

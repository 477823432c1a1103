//! Pre-flight checks run before the organization is listed

use std::path::Path;
use std::process::Command;

use super::config::GITHUB_TOKEN_ENV;
use super::error::PreflightError;

/// Reads the API token from the environment
pub fn read_token() -> Result<String, PreflightError> {
    read_token_from(GITHUB_TOKEN_ENV)
}

fn read_token_from(var: &'static str) -> Result<String, PreflightError> {
    std::env::var(var).map_err(|_| PreflightError::MissingEnv(var))
}

/// Verifies that a `git` executable can be spawned from PATH
pub fn ensure_git_available() -> Result<(), PreflightError> {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(PreflightError::GitNotFound(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Err(e) => Err(PreflightError::GitNotFound(e.to_string())),
    }
}

/// Creates the destination root if it does not exist yet
pub fn prepare_destination(dest_root: &Path) -> Result<(), PreflightError> {
    std::fs::create_dir_all(dest_root).map_err(|source| PreflightError::Destination {
        path: dest_root.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_reported_by_name() {
        let err = read_token_from("GITHUB_ORG_SYNC_TEST_UNSET_TOKEN").unwrap_err();
        assert_eq!(
            err.to_string(),
            "environment variable GITHUB_ORG_SYNC_TEST_UNSET_TOKEN is required"
        );
    }

    #[test]
    fn test_prepare_destination_creates_nested_dirs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        prepare_destination(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        prepare_destination(&nested).unwrap();
    }

    #[test]
    fn test_prepare_destination_fails_on_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = prepare_destination(&file.join("child")).unwrap_err();
        assert!(matches!(err, PreflightError::Destination { .. }));
    }
}

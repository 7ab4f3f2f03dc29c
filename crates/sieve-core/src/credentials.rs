//! API key loading from the environment and `.env` files

use crate::error::{Result, SieveError};
use crate::types::ApiKey;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default env file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Read the API key named `var`.
///
/// A non-blank process environment value wins. Otherwise the env file is
/// consulted: `env_file` if given (it must exist), else `.env` in the
/// working directory when present. The process environment is not modified.
pub fn load_api_key(env_file: Option<&Path>, var: &str) -> Result<ApiKey> {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            debug!("Using {} from the process environment", var);
            return ApiKey::new(value);
        }
    }

    let path = match env_file {
        Some(path) if !path.exists() => return Err(SieveError::FileNotFound(path.to_path_buf())),
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_ENV_FILE);
            default.exists().then_some(default)
        }
    };

    if let Some(path) = path {
        if let Some(value) = read_env_file(&path, var)? {
            debug!("Using {} from {:?}", var, path);
            return ApiKey::new(value)
                .map_err(|_| SieveError::Config(format!("{} in {} is empty", var, path.display())));
        }
    }

    Err(SieveError::Config(format!(
        "No API key found: set {} in the environment or a .env file",
        var
    )))
}

/// Look up `var` in a dotenv-format file
pub fn read_env_file(path: &Path, var: &str) -> Result<Option<String>> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| SieveError::Config(format!("Error loading {}: {}", path.display(), e)))?;

    for entry in entries {
        let (key, value) = entry
            .map_err(|e| SieveError::Config(format!("Error parsing {}: {}", path.display(), e)))?;
        if key == var {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_env_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "# comment\nOTHER=1\nSIEVE_TEST_KEY_A=\"abc123\"\n").unwrap();

        assert_eq!(read_env_file(&path, "SIEVE_TEST_KEY_A").unwrap().as_deref(), Some("abc123"));
        assert_eq!(read_env_file(&path, "MISSING").unwrap(), None);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("keys.env");
        fs::write(&path, "SIEVE_TEST_KEY_B=from-file\n").unwrap();

        let key = load_api_key(Some(&path), "SIEVE_TEST_KEY_B").unwrap();
        assert_eq!(key.expose(), "from-file");
    }

    #[test]
    fn test_explicit_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = load_api_key(Some(&temp.path().join("absent.env")), "SIEVE_TEST_KEY_C").unwrap_err();
        assert!(matches!(err, SieveError::FileNotFound(_)));
    }

    #[test]
    fn test_key_absent_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "SOMETHING_ELSE=x\n").unwrap();

        let err = load_api_key(Some(&path), "SIEVE_TEST_KEY_D").unwrap_err();
        assert!(matches!(err, SieveError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_blank_key_in_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "SIEVE_TEST_KEY_E=\n").unwrap();

        let err = load_api_key(Some(&path), "SIEVE_TEST_KEY_E").unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }
}

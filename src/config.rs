//! Process Configuration
//!
//! Connection parameters and credential key, resolved once at startup and
//! immutable afterwards. No other process-wide mutable state exists.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::domain::{DomainError, DomainResult};

/// Environment variable naming the SQLite database file
pub const DB_PATH_VAR: &str = "COLLECTIONS_DB_PATH";
/// Environment variable holding the base64-encoded 32-byte token key
pub const AUTH_KEY_VAR: &str = "COLLECTIONS_AUTH_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub auth_key: [u8; 32],
}

impl Config {
    pub fn new(db_path: PathBuf, auth_key: [u8; 32]) -> Self {
        Self { db_path, auth_key }
    }

    /// Read configuration from the environment
    pub fn from_env() -> DomainResult<Self> {
        let db_path = std::env::var(DB_PATH_VAR)
            .map_err(|_| DomainError::Internal(format!("{} not configured", DB_PATH_VAR)))?;

        let key_b64 = std::env::var(AUTH_KEY_VAR)
            .map_err(|_| DomainError::Internal(format!("{} not configured", AUTH_KEY_VAR)))?;
        let key_bytes = STANDARD
            .decode(key_b64.trim())
            .map_err(|_| DomainError::Internal(format!("{} is not valid base64", AUTH_KEY_VAR)))?;
        let auth_key: [u8; 32] = key_bytes.try_into().map_err(|_| {
            DomainError::Internal(format!("{} must decode to 32 bytes", AUTH_KEY_VAR))
        })?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            auth_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test walks every from_env branch in sequence: the environment is
    // process-global, so splitting these across tests would race under the
    // parallel test runner.
    #[test]
    fn test_from_env() {
        std::env::remove_var(DB_PATH_VAR);
        std::env::remove_var(AUTH_KEY_VAR);
        assert!(matches!(
            Config::from_env(),
            Err(DomainError::Internal(_))
        ));

        std::env::set_var(DB_PATH_VAR, "/tmp/collections.db");
        assert!(matches!(
            Config::from_env(),
            Err(DomainError::Internal(_))
        ));

        std::env::set_var(AUTH_KEY_VAR, "!!not base64!!");
        assert!(matches!(
            Config::from_env(),
            Err(DomainError::Internal(_))
        ));

        std::env::set_var(AUTH_KEY_VAR, STANDARD.encode([1u8; 16]));
        assert!(matches!(
            Config::from_env(),
            Err(DomainError::Internal(_))
        ));

        std::env::set_var(AUTH_KEY_VAR, STANDARD.encode([9u8; 32]));
        let cfg = Config::from_env().expect("valid env rejected");
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/collections.db"));
        assert_eq!(cfg.auth_key, [9u8; 32]);

        std::env::remove_var(DB_PATH_VAR);
        std::env::remove_var(AUTH_KEY_VAR);
    }

    #[test]
    fn test_new_keeps_values() {
        let cfg = Config::new(PathBuf::from("/tmp/collections.db"), [3u8; 32]);
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/collections.db"));
        assert_eq!(cfg.auth_key, [3u8; 32]);
    }
}

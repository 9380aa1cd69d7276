//! Per-user refresh token store
//!
//! Credentials live in a JSON file supplied by the deployment; the
//! worker only reads it. One credential per user, immutable for the run.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RotationError, RotationResult};

/// One user's stored credential
#[derive(Clone, Serialize, Deserialize)]
pub struct UserCredential {
    /// Opaque user key, used for logging and metric dimensions
    pub key: String,

    /// Long-lived refresh token exchanged for access tokens
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("key", &self.key)
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Load every stored credential from the token file
pub fn load(path: &Path) -> RotationResult<Vec<UserCredential>> {
    let raw = fs::read_to_string(path).map_err(|e| RotationError::TokenStore {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&raw).map_err(|e| RotationError::TokenStore {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_credentials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"key": "alice", "refreshToken": "rt-alice"}},
                {{"key": "bob", "refreshToken": "rt-bob"}}
            ]"#
        )
        .unwrap();

        let credentials = load(file.path()).unwrap();
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials[0].key, "alice");
        assert_eq!(credentials[0].refresh_token, "rt-alice");
        assert_eq!(credentials[1].key, "bob");
    }

    #[test]
    fn test_load_empty_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(load(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load(Path::new("/nonexistent/tokens.json"));
        assert!(matches!(result, Err(RotationError::TokenStore { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load(file.path());
        assert!(matches!(result, Err(RotationError::TokenStore { .. })));
    }

    #[test]
    fn test_debug_redacts_refresh_token() {
        let credential = UserCredential {
            key: "alice".to_string(),
            refresh_token: "very-secret-token".to_string(),
        };
        let debug_str = format!("{:?}", credential);
        assert!(!debug_str.contains("very-secret-token"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("alice"));
    }
}

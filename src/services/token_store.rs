use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::models::error::ChatError;

/// Key of the credential line inside the token file.
pub const TOKEN_KEY: &str = "GIGACHAT_ACCESS_TOKEN";

/// Reads the bearer token from the file maintained by the external renewal
/// cron job (`scripts/update_token.sh` in the deployment).
///
/// Every call re-reads the file so a renewed token takes effect without
/// restarting the service; no value is cached here. The file is written
/// only by the renewal process, this side is read-only.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Current token value, or `CredentialMissing` when the file is absent
    /// or holds no non-empty `GIGACHAT_ACCESS_TOKEN=` line.
    pub fn read_token(&self) -> Result<String, ChatError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            debug!(path = %self.path.display(), error = %e, "token file not readable");
            ChatError::CredentialMissing
        })?;

        for line in content.lines() {
            let line = line.trim();
            if let Some(value) = line
                .strip_prefix(TOKEN_KEY)
                .and_then(|rest| rest.strip_prefix('='))
            {
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }

        debug!(path = %self.path.display(), "token file has no usable {TOKEN_KEY} line");
        Err(ChatError::CredentialMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn store_with(content: &str) -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.tokens");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, TokenStore::new(path))
    }

    #[test]
    fn reads_token_value() {
        let (_dir, store) = store_with("GIGACHAT_ACCESS_TOKEN=abc.def.ghi\n");
        assert_eq!(store.read_token().unwrap(), "abc.def.ghi");
    }

    #[test]
    fn skips_comments_and_other_keys() {
        let (_dir, store) = store_with(
            "# updated 2026-08-23 03:00\nOTHER_KEY=nope\n  GIGACHAT_ACCESS_TOKEN=tok123\n",
        );
        assert_eq!(store.read_token().unwrap(), "tok123");
    }

    #[test]
    fn missing_file_is_credential_missing() {
        let store = TokenStore::new("/nonexistent/.env.tokens");
        assert_eq!(store.read_token().unwrap_err().kind(), "credential_missing");
    }

    #[test]
    fn empty_value_is_credential_missing() {
        let (_dir, store) = store_with("GIGACHAT_ACCESS_TOKEN=\n");
        assert_eq!(store.read_token().unwrap_err().kind(), "credential_missing");
    }

    #[test]
    fn renewal_is_observed_without_restart() {
        let (dir, store) = store_with("GIGACHAT_ACCESS_TOKEN=old\n");
        assert_eq!(store.read_token().unwrap(), "old");

        // Simulate the cron job rewriting the file between calls.
        fs::write(dir.path().join(".env.tokens"), "GIGACHAT_ACCESS_TOKEN=new\n").unwrap();
        assert_eq!(store.read_token().unwrap(), "new");
    }
}

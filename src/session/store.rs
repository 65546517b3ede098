use anyhow::{Context, Result};
use log::warn;

use crate::filelock::{read_file_lock, remove_file_lock, write_file_lock};
use crate::types::user::UserProfile;

/// Persisted session pair: the raw token text and the profile JSON next to
/// it. The two files are written together and cleared together, a token
/// without its profile never survives a store operation.
#[derive(Debug, Clone)]
pub struct TokenStore {
    token_path: String,
    profile_path: String,
}

impl TokenStore {
    pub fn new(token_path: String, profile_path: String) -> Self {
        Self {
            token_path,
            profile_path,
        }
    }

    pub fn read_token(&self) -> Result<Option<String>> {
        let data = match read_file_lock(&self.token_path).context("read token file")? {
            Some(data) => data,
            None => return Ok(None),
        };

        let token = match String::from_utf8(data) {
            Ok(token) => token,
            Err(_) => {
                warn!("Token file has invalid data, we will ignore it");
                return Ok(None);
            }
        };

        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    pub fn read_profile(&self) -> Result<Option<UserProfile>> {
        let data = match read_file_lock(&self.profile_path).context("read profile file")? {
            Some(data) => data,
            None => return Ok(None),
        };

        match serde_json::from_slice(&data) {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => {
                warn!("Profile file has invalid data, we will ignore it");
                Ok(None)
            }
        }
    }

    /// Token first, then profile. A failure between the two leaves a token
    /// with no profile, which reads back as a claims-only session and is
    /// cleared by the next failed validation.
    pub fn save(&self, token: &str, profile: &UserProfile) -> Result<()> {
        write_file_lock(&self.token_path, token.as_bytes()).context("write token file")?;
        let data = serde_json::to_vec(profile).context("encode profile")?;
        write_file_lock(&self.profile_path, &data).context("write profile file")?;
        Ok(())
    }

    /// Remove both files. Missing files are fine, clearing twice is fine.
    pub fn clear(&self) -> Result<()> {
        remove_file_lock(&self.token_path).context("remove token file")?;
        remove_file_lock(&self.profile_path).context("remove profile file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn test_store(name: &str) -> TokenStore {
        let dir = format!("_test_store_{name}");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        TokenStore::new(format!("{dir}/token"), format!("{dir}/profile.json"))
    }

    fn test_profile() -> UserProfile {
        serde_json::from_str(
            r#"{"id": "u1", "firstname": "Ana", "lastname": "García",
                "email": "ana@example.com"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_save_read_clear() {
        let store = test_store("roundtrip");

        assert!(store.read_token().unwrap().is_none());
        assert!(store.read_profile().unwrap().is_none());

        let profile = test_profile();
        store.save("aaa.bbb.ccc", &profile).unwrap();
        assert_eq!(store.read_token().unwrap().unwrap(), "aaa.bbb.ccc");
        assert_eq!(store.read_profile().unwrap().unwrap(), profile);

        store.clear().unwrap();
        assert!(store.read_token().unwrap().is_none());
        assert!(store.read_profile().unwrap().is_none());

        // Clearing an already empty store works
        store.clear().unwrap();

        fs::remove_dir_all("_test_store_roundtrip").unwrap();
    }

    #[test]
    fn test_invalid_files_read_as_empty() {
        let store = test_store("invalid");

        fs::write("_test_store_invalid/token", b"\xff\xfe").unwrap();
        fs::write("_test_store_invalid/profile.json", b"not json").unwrap();
        assert!(store.read_token().unwrap().is_none());
        assert!(store.read_profile().unwrap().is_none());

        fs::write("_test_store_invalid/token", b"  \n").unwrap();
        assert!(store.read_token().unwrap().is_none());

        fs::remove_dir_all("_test_store_invalid").unwrap();
    }

    #[test]
    fn test_token_is_trimmed() {
        let store = test_store("trim");

        fs::write("_test_store_trim/token", b"aaa.bbb.ccc\n").unwrap();
        assert_eq!(store.read_token().unwrap().unwrap(), "aaa.bbb.ccc");

        assert!(Path::new("_test_store_trim").exists());
        fs::remove_dir_all("_test_store_trim").unwrap();
    }
}

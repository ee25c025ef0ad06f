use super::Result;
use serde::{Deserialize, Serialize};

#[cfg(not(test))]
use keyring::Entry;

const SERVICE_NAME: &str = "loja-cli";

/// Bearer token persisted per profile in the OS keyring. Only storage lives
/// here; acquisition is `AuthService::login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    session_token: Option<String>,
    pub profile_name: String,
}

impl Credentials {
    pub fn new(profile_name: String) -> Self {
        Self {
            session_token: None,
            profile_name,
        }
    }

    pub fn load(profile_name: &str) -> Result<Self> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.session_token = credentials.load_entry("session")?;
        Ok(credentials)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }

    // used by login
    pub fn save_session_for_profile(profile_name: &str, token: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.save_entry("session", token)
    }

    // used by logout
    pub fn clear_session_for_profile(profile_name: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.delete_entry("session")
    }

    #[cfg(not(test))]
    fn entry(&self, key_type: &str) -> Result<Entry> {
        Entry::new(
            SERVICE_NAME,
            &format!("{}-{}", key_type, self.profile_name),
        )
        .map_err(|e| crate::error::StorageError::Keyring(e.to_string()))
    }

    #[cfg(not(test))]
    fn load_entry(&self, key_type: &str) -> Result<Option<String>> {
        match self.entry(key_type)?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::Keyring(e.to_string())),
        }
    }

    #[cfg(not(test))]
    fn save_entry(&self, key_type: &str, value: &str) -> Result<()> {
        self.entry(key_type)?
            .set_password(value)
            .map_err(|e| crate::error::StorageError::Keyring(e.to_string()))
    }

    #[cfg(not(test))]
    fn delete_entry(&self, key_type: &str) -> Result<()> {
        match self.entry(key_type)?.delete_credential() {
            Ok(()) => Ok(()),
            // Entry doesn't exist, which is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::Keyring(e.to_string())),
        }
    }

    // Keyring access is mocked out under test; CI boxes have no secret
    // service running.
    #[cfg(test)]
    fn load_entry(&self, _key_type: &str) -> Result<Option<String>> {
        Ok(None)
    }

    #[cfg(test)]
    fn save_entry(&self, _key_type: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    #[cfg(test)]
    fn delete_entry(&self, _key_type: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credentials_have_no_session() {
        let credentials = Credentials::new("default".to_string());
        assert!(!credentials.has_session());
        assert!(credentials.session_token().is_none());
    }

    #[test]
    fn test_load_uses_mock_in_tests() {
        let credentials = Credentials::load("default").expect("load");
        assert!(!credentials.has_session());
    }

    #[test]
    fn test_save_and_clear_do_not_error() {
        assert!(Credentials::save_session_for_profile("default", "tok").is_ok());
        assert!(Credentials::clear_session_for_profile("default").is_ok());
    }
}

use crate::api::client::ApiClient;
use crate::storage::credentials::Credentials;

/// Login/logout against the auth endpoint, persisting the bearer token per
/// profile. Token refresh is the backend's concern; this layer only stores
/// what login returns.
pub struct AuthService {
    client: ApiClient,
    profile_name: String,
}

/// Snapshot for `auth status`.
#[derive(Debug, Clone)]
pub struct AuthStatus {
    pub profile_name: String,
    pub is_authenticated: bool,
}

impl AuthService {
    pub fn new(client: ApiClient, profile_name: String) -> Self {
        Self {
            client,
            profile_name,
        }
    }

    /// Exchange credentials for a bearer token and store it in the keyring.
    pub async fn login(&self, email: &str, password: &str) -> crate::Result<String> {
        let token = self.client.login(email, password).await?;
        Credentials::save_session_for_profile(&self.profile_name, &token)?;
        Ok(token)
    }

    /// Drop the stored token. Missing entries are fine.
    pub fn logout(&self) -> crate::Result<()> {
        Credentials::clear_session_for_profile(&self.profile_name)?;
        Ok(())
    }

    pub fn status(&self) -> AuthStatus {
        AuthStatus {
            profile_name: self.profile_name.clone(),
            is_authenticated: self.client.is_authenticated(),
        }
    }
}

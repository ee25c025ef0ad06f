//! Session context threaded explicitly through services and handlers.
//!
//! Nothing here is ambient or global: the active profile, API URL, token and
//! company are carried in one value that every collaborator receives.

use crate::api::client::ApiClient;
use crate::error::{ApiError, CliError};

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub profile_name: String,
    pub api_url: String,
    pub asset_base_url: Option<String>,
    pub token: Option<String>,
    pub active_company: Option<u32>,
}

impl SessionContext {
    pub fn new(profile_name: String, api_url: String) -> Self {
        Self {
            profile_name,
            api_url,
            asset_base_url: None,
            token: None,
            active_company: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_asset_base_url(mut self, base_url: Option<String>) -> Self {
        self.asset_base_url = base_url;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Client carrying this session's bearer token (if any).
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        match &self.token {
            Some(token) => ApiClient::with_token(self.api_url.clone(), token.clone()),
            None => ApiClient::new(self.api_url.clone()),
        }
    }

    /// Client for endpoints that require authentication.
    pub fn authenticated_client(&self) -> crate::Result<ApiClient> {
        if !self.is_authenticated() {
            return Err(CliError::AuthRequired {
                message: "This command requires authentication".to_string(),
                hint: "Run 'loja-cli auth login' first".to_string(),
            }
            .into());
        }
        Ok(self.client()?)
    }

    /// Base URL product images and the company logo resolve against; falls
    /// back to the API URL when the profile does not set one.
    pub fn asset_base(&self) -> &str {
        self.asset_base_url.as_deref().unwrap_or(&self.api_url)
    }
}

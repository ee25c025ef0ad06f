use crate::api::models::{ListResult, LoginRequest, LoginResponse, normalize_envelope};
use crate::api::query::ListQuery;
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("loja-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    pub bearer_token: Option<String>,
}

impl ApiClient {
    // Create base client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network {
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    pub fn with_token(base_url: String, token: String) -> Result<Self, ApiError> {
        let mut client = ApiClient::new(base_url)?;
        client.bearer_token = Some(token);
        Ok(client)
    }

    pub fn set_token(&mut self, token: String) {
        self.bearer_token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::Network {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(self.error_from_body(status, response, endpoint).await)
        }
    }

    /// For DELETE-style endpoints answering 204 with no body.
    pub async fn handle_empty_response(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<(), ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_body(status, response, endpoint).await)
        }
    }

    async fn error_from_body(
        &self,
        status: StatusCode,
        response: Response,
        endpoint: &str,
    ) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        match status.as_u16() {
            401 | 403 => ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                detail,
            },
            408 | 504 => ApiError::Timeout {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                endpoint: endpoint.to_string(),
            },
            _ => ApiError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                detail,
            },
        }
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(self.build_request(Method::GET, path), path).await?;
        self.handle_response(response, path).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(Method::POST, path).json(body);
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(Method::PUT, path).json(body);
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .send(self.build_request(Method::DELETE, path), path)
            .await?;
        self.handle_empty_response(response, path).await
    }

    /// One paged list request, normalized into `ListResult` at this boundary.
    pub async fn fetch_list<T>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<ListResult<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self
            .build_request(Method::GET, path)
            .query(&query.to_query_pairs());
        let response = self.send(request, path).await?;
        let value: Value = self.handle_response(response, path).await?;
        normalize_envelope(value, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/auth/login", &body).await?;
        Ok(response.access_token)
    }
}

/// Pulls the `detail` message out of a JSON error body, if there is one.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}

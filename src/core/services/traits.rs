use crate::api::client::ApiClient;
use crate::api::models::ListResult;
use crate::api::query::ListQuery;
use crate::core::forms::FormSubmit;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// CRUD surface shared by every record endpoint.
///
/// Implementors only name their base path; the request shapes are uniform:
/// `GET base` (paged list), `GET base/{id}`, `POST base/`, `PUT base/{id}`,
/// `DELETE base/{id}` (deactivate, 204 no body).
#[async_trait]
pub trait RecordService: Sync {
    type Record: DeserializeOwned + Send + Sync;

    fn client(&self) -> &ApiClient;
    fn base_path(&self) -> &'static str;

    async fn list(&self, query: &ListQuery) -> Result<ListResult<Self::Record>, ApiError> {
        self.client().fetch_list(self.base_path(), query).await
    }

    async fn get(&self, id: u32) -> Result<Self::Record, ApiError> {
        self.client()
            .get_json(&format!("{}/{}", self.base_path(), id))
            .await
    }

    async fn create(&self, payload: &Value) -> Result<Self::Record, ApiError> {
        self.client()
            .post_json(&format!("{}/", self.base_path()), payload)
            .await
    }

    async fn update(&self, id: u32, payload: &Value) -> Result<Self::Record, ApiError> {
        self.client()
            .put_json(&format!("{}/{}", self.base_path(), id), payload)
            .await
    }

    async fn deactivate(&self, id: u32) -> Result<(), ApiError> {
        self.client()
            .delete(&format!("{}/{}", self.base_path(), id))
            .await
    }

    /// Create or update, chosen by the presence of an id on the submitted
    /// draft.
    async fn save(&self, submit: FormSubmit) -> Result<Self::Record, ApiError> {
        match submit {
            FormSubmit::Create(payload) => self.create(&payload).await,
            FormSubmit::Update(id, payload) => self.update(id, &payload).await,
        }
    }
}

use super::traits::RecordService;
use crate::api::client::ApiClient;
use crate::api::models::User;
use crate::error::ApiError;

/// User administration endpoints.
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Reactivation resends the full record with the active flag set, as an
    /// update. Any password on the source record is dropped first.
    pub async fn reactivate(&self, id: u32, user: &User) -> Result<User, ApiError> {
        let mut record = user.clone();
        record.id = Some(id);
        record.active = true;
        record.password = None;
        self.client.put_json(&format!("/users/{}", id), &record).await
    }
}

impl RecordService for UserService {
    type Record = User;

    fn client(&self) -> &ApiClient {
        &self.client
    }

    fn base_path(&self) -> &'static str {
        "/users"
    }
}

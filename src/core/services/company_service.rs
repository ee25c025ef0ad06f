use super::traits::RecordService;
use crate::api::client::ApiClient;
use crate::api::models::{Company, PaymentKeys};
use crate::error::ApiError;

/// Company profile endpoints.
pub struct CompanyService {
    client: ApiClient,
}

impl CompanyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Payment keys for a company, degrading a malformed stored blob to the
    /// empty default.
    pub async fn payment_keys(&self, id: u32) -> Result<PaymentKeys, ApiError> {
        let company = self.get(id).await?;
        Ok(company
            .payment_keys
            .as_deref()
            .map(PaymentKeys::parse)
            .unwrap_or_default())
    }
}

impl RecordService for CompanyService {
    type Record = Company;

    fn client(&self) -> &ApiClient {
        &self.client
    }

    fn base_path(&self) -> &'static str {
        "/companies"
    }
}

use super::traits::RecordService;
use crate::api::client::ApiClient;
use crate::api::models::Sale;

/// Sales history endpoints (read-only from the admin dashboard).
pub struct SaleService {
    client: ApiClient,
}

impl SaleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl RecordService for SaleService {
    type Record = Sale;

    fn client(&self) -> &ApiClient {
        &self.client
    }

    fn base_path(&self) -> &'static str {
        "/sales"
    }
}

use super::traits::RecordService;
use crate::api::client::ApiClient;
use crate::api::models::{Category, ListResult, Product};
use crate::api::query::ListQuery;
use crate::error::ApiError;

/// Product catalog endpoints, plus the category lookup the storefront
/// filter uses.
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn categories(&self, query: &ListQuery) -> Result<ListResult<Category>, ApiError> {
        self.client.fetch_list("/categories", query).await
    }

    /// Same shape as user reactivation: full record resent with the active
    /// flag set.
    pub async fn reactivate(&self, id: u32, product: &Product) -> Result<Product, ApiError> {
        let mut record = product.clone();
        record.id = Some(id);
        record.active = true;
        self.client
            .put_json(&format!("/products/{}", id), &record)
            .await
    }
}

impl RecordService for ProductService {
    type Record = Product;

    fn client(&self) -> &ApiClient {
        &self.client
    }

    fn base_path(&self) -> &'static str {
        "/products"
    }
}

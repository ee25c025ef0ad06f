use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_active() -> bool {
    true
}

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Option<u32>,
    pub name: String,
    pub email: String,
    // Only present on create/update payloads, never echoed back by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role_id: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<u32>,
    /// Possibly-relative path; resolve with `utils::assets::resolve_asset_url`.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Company {
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    /// Raw JSON blob as stored by the backend; see [`PaymentKeys::parse`].
    #[serde(default)]
    pub payment_keys: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sale {
    pub id: u32,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payment keys stored on the company record as a serialized JSON string.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentKeys {
    pub pix: Option<String>,
    pub mercado_pago: Option<String>,
    pub pagseguro: Option<String>,
}

impl PaymentKeys {
    /// A malformed blob degrades to the empty default instead of failing;
    /// a bad stored value must never block editing the company profile.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Canonical shape every list endpoint is normalized into.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Single boundary for the backend's envelope variants.
///
/// Accepts `{data: [...], metadata: {total}}`, `{items: [...], total}` and a
/// bare array (total degrades to the array length). Call sites never branch
/// on envelope shape.
pub fn normalize_envelope<T: DeserializeOwned>(
    value: Value,
    endpoint: &str,
) -> Result<ListResult<T>, ApiError> {
    let (raw_items, total) = match value {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let items = match map.remove("data").or_else(|| map.remove("items")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ApiError::Decode {
                        endpoint: endpoint.to_string(),
                        message: "list envelope has no 'data' or 'items' array".to_string(),
                    });
                }
            };
            let total = map
                .get("metadata")
                .and_then(|metadata| metadata.get("total"))
                .and_then(Value::as_u64)
                .or_else(|| map.get("total").and_then(Value::as_u64));
            (items, total)
        }
        _ => {
            return Err(ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: "list response is neither an object nor an array".to_string(),
            });
        }
    };

    let total = total.unwrap_or(raw_items.len() as u64);
    let items = raw_items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse list item: {}", e),
            })
        })
        .collect::<Result<Vec<T>, ApiError>>()?;

    Ok(ListResult { items, total })
}

//! Integration tests for the API client against a mock backend.

use loja_cli::api::client::ApiClient;
use loja_cli::api::models::{Product, User};
use loja_cli::api::query::{ListFilter, ListQuery};
use loja_cli::core::forms::{FieldMask, FormDraft, PASSWORD_FIELD};
use loja_cli::core::services::{ProductService, RecordService, UserService};
use loja_cli::error::ApiError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_token(server.uri(), "test-token".to_string()).expect("client creation")
}

#[tokio::test]
async fn list_users_normalizes_data_metadata_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "10"))
        .and(query_param("role_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 11, "name": "Ana", "email": "ana@example.com"},
                {"id": 12, "name": "Bia", "email": "bia@example.com"}
            ],
            "metadata": {"total": 42}
        })))
        .mount(&server)
        .await;

    let service = UserService::new(client(&server));
    let query = ListQuery::new(2, 10).with_filter(ListFilter::Role(2));
    let result = service.list(&query).await.expect("list");

    assert_eq!(result.total, 42);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].name, "Ana");
    assert!(result.items[0].active);
}

#[tokio::test]
async fn list_products_accepts_bare_array_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "bolo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Bolo de fubá", "price": 18.5}
        ])))
        .mount(&server)
        .await;

    let service = ProductService::new(client(&server));
    let query = ListQuery::first_page(10).with_search("bolo");
    let result = service.list(&query).await.expect("list");

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].price, 18.5);
}

#[tokio::test]
async fn create_user_posts_draft_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .and(body_json(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret",
            "cpf": "39053344705",
            "phone": "11987654321",
            "role_id": 2,
            "active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "name": "Ana", "email": "ana@example.com", "role_id": 2
        })))
        .mount(&server)
        .await;

    let mut draft = FormDraft::create()
        .field("name", FieldMask::None, true)
        .field("email", FieldMask::None, true)
        .field(PASSWORD_FIELD, FieldMask::None, false)
        .field("cpf", FieldMask::Cpf, false)
        .field("phone", FieldMask::Phone, false);
    draft.set("name", "Ana");
    draft.set("email", "ana@example.com");
    draft.set(PASSWORD_FIELD, "secret");
    // Masked on input, stripped back off on the wire
    draft.set("cpf", "390.533.447-05");
    draft.set("phone", "(11) 98765-4321");
    draft.set_extra("role_id", json!(2));
    draft.set_extra("active", json!(true));

    let service = UserService::new(client(&server));
    let created: User = service.save(draft.submit().expect("submit")).await.expect("create");
    assert_eq!(created.id, Some(7));
}

#[tokio::test]
async fn update_user_omits_blank_password() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/7"))
        .and(body_json(json!({
            "name": "Ana Maria",
            "email": "ana@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Ana Maria", "email": "ana@example.com"
        })))
        .mount(&server)
        .await;

    let mut draft = FormDraft::edit(7)
        .field("name", FieldMask::None, true)
        .field("email", FieldMask::None, true)
        .field(PASSWORD_FIELD, FieldMask::None, false);
    draft.set("name", "Ana Maria");
    draft.set("email", "ana@example.com");

    let service = UserService::new(client(&server));
    let updated: User = service.save(draft.submit().expect("submit")).await.expect("update");
    assert_eq!(updated.name, "Ana Maria");
}

#[tokio::test]
async fn deactivate_sends_delete_and_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let service = ProductService::new(client(&server));
    service.deactivate(3).await.expect("deactivate");
}

#[tokio::test]
async fn reactivate_resends_full_record_with_active_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/3"))
        .and(body_json(json!({
            "id": 3,
            "name": "Bolo",
            "description": null,
            "price": 12.0,
            "category_id": null,
            "image": null,
            "active": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Bolo", "price": 12.0, "active": true
        })))
        .mount(&server)
        .await;

    let inactive = Product {
        id: Some(3),
        name: "Bolo".to_string(),
        description: None,
        price: 12.0,
        category_id: None,
        image: None,
        active: false,
    };

    let service = ProductService::new(client(&server));
    let reactivated = service.reactivate(3, &inactive).await.expect("reactivate");
    assert!(reactivated.active);
}

#[tokio::test]
async fn error_body_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
        )
        .mount(&server)
        .await;

    let service = UserService::new(client(&server));
    let err = service.get(99).await.expect_err("should fail");
    match err {
        ApiError::Status { status, detail, .. } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "User not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_dedicated_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .mount(&server)
        .await;

    let service = UserService::new(client(&server));
    let err = service
        .list(&ListQuery::first_page(10))
        .await
        .expect_err("should fail");
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .fetch_list::<serde_json::Value>("/sales", &ListQuery::first_page(10))
        .await
        .expect_err("should fail");
    match err {
        ApiError::Status { status, detail, .. } => {
            assert_eq!(status, 502);
            assert_eq!(detail, "Request failed with status 502");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn login_returns_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "secret"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-token"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client creation");
    let token = client.login("admin@example.com", "secret").await.expect("login");
    assert_eq!(token, "jwt-token");
}

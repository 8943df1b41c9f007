//! REST 路由测试（内存仓储 + oneshot）

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use catalog_service::api::{PaginationSettings, catalog_routes};
use catalog_service::application::{CategoryMapper, CrudService, ProductMapper};
use catalog_service::domain::{Category, Product};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{InMemoryRepository, categories, products};

struct TestApp {
    router: Router,
    products: Arc<InMemoryRepository<Product>>,
    categories: Arc<InMemoryRepository<Category>>,
}

fn app() -> TestApp {
    let products = Arc::new(InMemoryRepository::with_rows(products()));
    let categories = Arc::new(InMemoryRepository::with_rows(categories()));

    let router = catalog_routes(
        Arc::new(CrudService::new(
            products.clone(),
            ProductMapper::new(categories.clone()),
        )),
        Arc::new(CrudService::new(categories.clone(), CategoryMapper)),
        PaginationSettings::default(),
    );

    TestApp {
        router,
        products,
        categories,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn product_payload() -> Value {
    json!({
        "id": 500,
        "name": "Phone",
        "description": "Good phone",
        "price": 800.0,
        "imageUrl": "https://img.example/phone.jpg",
        "date": "2020-07-20T10:00:00Z",
        "categories": [{"id": 2}]
    })
}

#[tokio::test]
async fn test_list_products_default_page() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 12);
    assert_eq!(body["totalElements"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["size"], 12);
    assert_eq!(body["number"], 0);
    assert_eq!(body["content"][0]["name"], "Macbook Pro");
    assert_eq!(body["content"][1]["name"], "PC Gamer");
    assert_eq!(body["content"][2]["name"], "PC Gamer Alfa");
}

#[tokio::test]
async fn test_list_products_with_sort_params() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products?page=0&size=5&sort=price,desc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"][0]["id"], 25);
    assert_eq!(body["numberOfElements"], 5);

    let (status, _, body) =
        send(&app.router, get("/products?linesPerPage=3&orderBy=id&direction=DESC")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"][0]["id"], 25);
    assert_eq!(body["size"], 3);
}

#[tokio::test]
async fn test_list_products_beyond_last_page() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products?page=50&size=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], json!([]));
    assert_eq!(body["totalElements"], 25);
    assert_eq!(body["empty"], true);
}

#[tokio::test]
async fn test_list_with_malformed_params_is_bad_request() {
    let app = app();

    for uri in [
        "/products?page=abc",
        "/products?size=0",
        "/products?size=1000",
        "/products?sort=name,up",
        "/products?orderBy=password",
        "/categories?direction=ASC",
    ] {
        let (status, _, body) = send(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["status"], 400);
        assert!(body["path"].as_str().unwrap().starts_with('/'));
    }
}

#[tokio::test]
async fn test_find_product_by_id() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products/3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Macbook Pro");
    assert_eq!(body["categories"], json!([{"id": 3, "name": "Computadores"}]));
    assert!(body["imageUrl"].is_string());
    assert!(body["price"].is_number());
}

#[tokio::test]
async fn test_find_missing_product_is_not_found() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products/1000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Resource not found");
    assert_eq!(body["message"], "Product with id 1000 not found");
    assert_eq!(body["path"], "/products/1000");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/products/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/products/abc");
}

#[tokio::test]
async fn test_insert_product_returns_created_with_location() {
    let app = app();

    let (status, headers, body) =
        send(&app.router, with_json("POST", "/products", product_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/products/26");
    assert_eq!(body["id"], 26);
    assert_eq!(body["name"], "Phone");
    assert_eq!(body["categories"], json!([{"id": 2, "name": "Eletrônicos"}]));
    assert_eq!(app.products.len(), 26);
}

#[tokio::test]
async fn test_insert_product_with_missing_category_is_not_found() {
    let app = app();
    let mut payload = product_payload();
    payload["categories"] = json!([{"id": 99}]);

    let (status, _, body) = send(&app.router, with_json("POST", "/products", payload)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category with id 99 not found");
    assert_eq!(app.products.len(), 25);
}

#[tokio::test]
async fn test_insert_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/categories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, _, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/categories");
}

#[tokio::test]
async fn test_update_product() {
    let app = app();

    let (status, _, body) =
        send(&app.router, with_json("PUT", "/products/1", product_payload())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Phone");
    assert_eq!(app.products.get(1).unwrap().name, "Phone");
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let app = app();

    let (status, _, body) =
        send(&app.router, with_json("PUT", "/products/1000", product_payload())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product with id 1000 not found");
}

#[tokio::test]
async fn test_delete_product() {
    let app = app();

    let (status, _, body) = send(&app.router, delete("/products/1")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(app.products.len(), 24);
}

#[tokio::test]
async fn test_delete_missing_product_is_not_found() {
    let app = app();

    let (status, _, _) = send(&app.router, delete("/products/1000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_referenced_category_is_conflict() {
    let app = app();
    app.categories.mark_referenced(3);

    let (status, _, body) = send(&app.router, delete("/categories/3")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(app.categories.len(), 3);
}

#[tokio::test]
async fn test_storage_failure_is_masked_server_error() {
    let app = app();
    app.products.set_unavailable();

    let (status, _, body) = send(&app.router, get("/products/1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Unexpected server error");
}

#[tokio::test]
async fn test_category_routes() {
    let app = app();

    let (status, _, body) = send(&app.router, get("/categories?sort=name")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"][0], json!({"id": 3, "name": "Computadores"}));

    let (status, headers, body) = send(
        &app.router,
        with_json("POST", "/categories", json!({"name": "Jogos"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/categories/4");
    assert_eq!(body, json!({"id": 4, "name": "Jogos"}));
}

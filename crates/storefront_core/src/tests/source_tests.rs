use super::*;
use axum::{http::StatusCode, routing::get, Router};
use serde_json::json;
use shared::domain::ProductId;
use tokio::net::TcpListener;

use crate::stock::SimulatedStock;

fn fakestore_body() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            "rating": { "rate": 4.7, "count": 500 },
            "size": ["S", "M", "L"]
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "stock": 4
        }
    ])
}

async fn spawn_catalog_server(status: StatusCode, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/products", get(move || async move { (status, body) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/products")
}

#[tokio::test]
async fn fetches_and_decodes_catalog_records() {
    let url = spawn_catalog_server(StatusCode::OK, fakestore_body().to_string()).await;
    let source = HttpCatalogSource::new(url);

    let records = source.fetch_records().await.expect("records");
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].stock, Some(4));

    let products = products_from_records(records, &SimulatedStock);
    assert_eq!(
        products.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![ProductId(1), ProductId(3), ProductId(9)]
    );
    assert!(products[0].in_stock);
    assert!(!products[1].in_stock);
    assert!(products[2].in_stock);
    assert_eq!(products[1].variants, vec!["S", "M", "L"]);
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let url = spawn_catalog_server(StatusCode::SERVICE_UNAVAILABLE, "down".into()).await;
    let err = HttpCatalogSource::new(url)
        .fetch_records()
        .await
        .expect_err("status error");
    assert!(matches!(err, CatalogError::Status { status: 503 }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let url = spawn_catalog_server(StatusCode::OK, "{\"not\": \"a list\"}".into()).await;
    let err = HttpCatalogSource::new(url)
        .fetch_records()
        .await
        .expect_err("decode error");
    assert!(matches!(err, CatalogError::Decode(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source = HttpCatalogSource::with_timeout(
        format!("http://{addr}/products"),
        Duration::from_secs(2),
    )
    .expect("client");
    let err = source.fetch_records().await.expect_err("transport error");
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn timed_out_request_is_a_retryable_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "[]"
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let source = HttpCatalogSource::with_timeout(
        format!("http://{addr}/products"),
        Duration::from_millis(200),
    )
    .expect("client");
    let err = source.fetch_records().await.expect_err("timeout");
    assert!(matches!(err, CatalogError::Transport(_)));
    assert!(err.is_retryable());
}

#[test]
fn drops_invalid_prices_and_duplicate_ids() {
    let records: Vec<CatalogRecord> = serde_json::from_value(json!([
        { "id": 1, "title": "a", "price": 5.0, "category": "jewelery", "image": "" },
        { "id": 2, "title": "b", "price": -1.0, "category": "jewelery", "image": "" },
        { "id": 1, "title": "c", "price": 7.0, "category": "jewelery", "image": "" },
        { "id": 4, "title": "d", "price": 0.0, "category": "jewelery", "image": "" }
    ]))
    .expect("records");

    let products = products_from_records(records, &SimulatedStock);
    assert_eq!(
        products.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        vec!["a", "d"]
    );
}

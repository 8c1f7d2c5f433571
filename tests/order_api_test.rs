use http::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_order_crud() {
    let server = common::setup_test_server().await;
    let customer = common::create_customer(&server, "Priya", "555-300-0001").await;
    let item = common::create_item(&server, "Onion Uttapam", 11.5).await;
    let customer_id = customer["id"].as_i64().unwrap();
    let item_id = item["id"].as_i64().unwrap();

    let response = server
        .post("/orders")
        .json(&json!({ "customer_id": customer_id, "item_id": item_id, "quantity": 2 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let order: Value = response.json();
    let id = order["id"].as_i64().unwrap();
    assert_eq!(response.header("location"), format!("/orders/{}", id).as_str());

    let fetched: Value = server.get(&format!("/orders/{}", id)).await.json();
    assert_eq!(
        fetched,
        json!({ "id": id, "customer_id": customer_id, "item_id": item_id, "quantity": 2 })
    );

    let response = server
        .put(&format!("/orders/{}", id))
        .json(&json!({ "customer_id": customer_id, "item_id": item_id, "quantity": 5 }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Order updated successfully" })
    );

    let fetched: Value = server.get(&format!("/orders/{}", id)).await.json();
    assert_eq!(fetched["quantity"], 5);

    server
        .delete(&format!("/orders/{}", id))
        .await
        .assert_status_ok();
    server
        .get(&format!("/orders/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_orders_by_customer() {
    let server = common::setup_test_server().await;
    let priya = common::create_customer(&server, "Priya", "555-300-0001").await;
    let arun = common::create_customer(&server, "Arun", "555-300-0002").await;
    let item = common::create_item(&server, "Idli", 6.5).await;
    let priya_id = priya["id"].as_i64().unwrap();
    let arun_id = arun["id"].as_i64().unwrap();
    let item_id = item["id"].as_i64().unwrap();

    common::create_order(&server, priya_id, item_id, 1).await;
    common::create_order(&server, priya_id, item_id, 3).await;
    common::create_order(&server, arun_id, item_id, 2).await;

    let all: Vec<Value> = server.get("/orders").await.json();
    assert_eq!(all.len(), 3);

    let response = server
        .get("/orders")
        .add_query_param("customer_id", priya_id)
        .await;
    response.assert_status_ok();
    let orders: Vec<Value> = response.json();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o["customer_id"] == priya_id));
}

#[tokio::test]
async fn test_orders_survive_customer_deletion() {
    let server = common::setup_test_server().await;
    let customer = common::create_customer(&server, "Priya", "555-300-0001").await;
    let item = common::create_item(&server, "Vada", 5.0).await;
    let customer_id = customer["id"].as_i64().unwrap();
    let order = common::create_order(&server, customer_id, item["id"].as_i64().unwrap(), 1).await;

    server
        .delete(&format!("/customers/{}", customer_id))
        .await
        .assert_status_ok();

    let response = server.get(&format!("/orders/{}", order["id"])).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["customer_id"], customer_id);
}

#[tokio::test]
async fn test_dangling_references_are_accepted_without_enforcement() {
    let server = common::setup_test_server().await;

    let order = common::create_order(&server, 4242, 4343, 1).await;
    assert_eq!(order["customer_id"], 4242);
}

#[tokio::test]
async fn test_dangling_references_rejected_with_enforcement() {
    let server = common::setup_server_with(common::create_foreign_key_app_config()).await;

    let response = server
        .post("/orders")
        .json(&json!({ "customer_id": 4242, "item_id": 4343, "quantity": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json(), "invalid_reference", "400");

    let all: Vec<Value> = server.get("/orders").await.json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_referenced_rows_cannot_be_deleted_with_enforcement() {
    let server = common::setup_server_with(common::create_foreign_key_app_config()).await;
    let customer = common::create_customer(&server, "Priya", "555-300-0001").await;
    let item = common::create_item(&server, "Vada", 5.0).await;
    let customer_id = customer["id"].as_i64().unwrap();
    let item_id = item["id"].as_i64().unwrap();
    let order = common::create_order(&server, customer_id, item_id, 1).await;

    let response = server.delete(&format!("/customers/{}", customer_id)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json(), "invalid_reference", "400");

    let response = server.delete(&format!("/items/{}", item_id)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json(), "invalid_reference", "400");

    let response = server
        .put(&format!("/orders/{}", order["id"]))
        .json(&json!({ "customer_id": 4242, "item_id": item_id, "quantity": 1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    common::assert_error(&response.json(), "invalid_reference", "400");

    let response = server.get(&format!("/orders/{}", order["id"])).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["customer_id"], customer_id);

    server
        .get(&format!("/customers/{}", customer_id))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_order_quantity_has_no_range_check() {
    let server = common::setup_test_server().await;

    let order = common::create_order(&server, 1, 1, -5).await;
    assert_eq!(order["quantity"], -5);
}

#[tokio::test]
async fn test_order_validation() {
    let server = common::setup_test_server().await;

    let response = server
        .post("/orders")
        .json(&json!({ "customer_id": 1, "item_id": 1 }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server.get("/orders?customer_id=abc").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    common::assert_error(&response.json(), "validation", "422");

    let response = server.get("/orders/999999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Order not found");
}

//! API integration tests
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it in-process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use equipment_center::{api::create_router, config::AppConfig, repository::Repository, AppState};

async fn app() -> Router {
    let config = AppConfig::in_memory();
    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open database");
    repository.migrate().await.expect("Failed to run migrations");
    create_router(AppState::new(config, repository))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).expect("Failed to parse response"))
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).expect("Failed to parse response"))
}

async fn create_item(app: &Router, name: &str, qty: i32) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/v1/items",
        json!({ "name": name, "category": "Digital Camera", "total_qty": qty }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("No id in response")
}

async fn borrow(app: &Router, item_id: i64, student: &str, contact: &str) -> (StatusCode, Value) {
    let return_date = Local::now().date_naive() + Duration::days(2);
    post_json(
        app,
        "/api/v1/loans",
        json!({
            "student_name": student,
            "contact_info": contact,
            "item_id": item_id,
            "return_date": return_date.to_string()
        }),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;

    let (status, body) = get_json(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["inventory_items"], 0);
}

#[tokio::test]
async fn test_create_item() {
    let app = app().await;

    let id = create_item(&app, "Sony A7 III", 3).await;

    let (status, body) = get_json(&app, &format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sony A7 III");
    assert_eq!(body["category"], "Digital Camera");
    assert_eq!(body["total_qty"], 3);
    assert_eq!(body["in_stock_qty"], 3);
}

#[tokio::test]
async fn test_create_item_rejects_zero_quantity() {
    let app = app().await;

    let (status, _) = post_json(
        &app,
        "/api/v1/items",
        json!({ "name": "Tripod", "category": "Tripod", "total_qty": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_item() {
    let app = app().await;

    let (status, _) = get_json(&app, "/api/v1/items/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_borrow_last_unit() {
    let app = app().await;
    let item_id = create_item(&app, "Canon EOS R5", 1).await;

    let (status, loan) = borrow(&app, item_id, "Alice", "alice@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["item_name"], "Canon EOS R5");
    assert_eq!(loan["status"], "active");
    assert_eq!(loan["duration_days"], 2);

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 0);

    let (_, available) = get_json(&app, "/api/v1/items?available=true").await;
    assert!(available
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["id"].as_i64() != Some(item_id)));

    let (status, _) = borrow(&app, item_id, "Bob", "").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, active) = get_json(&app, "/api/v1/loans/active").await;
    assert_eq!(active.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_borrow_rejects_return_date_beyond_limit() {
    let app = app().await;
    let item_id = create_item(&app, "Nikon Z6 II", 2).await;

    let return_date = Local::now().date_naive() + Duration::days(8);
    let (status, _) = post_json(
        &app,
        "/api/v1/loans",
        json!({
            "student_name": "Alice",
            "item_id": item_id,
            "return_date": return_date.to_string()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 2);
}

#[tokio::test]
async fn test_return_twice() {
    let app = app().await;
    let item_id = create_item(&app, "Leica M6", 1).await;
    let (_, loan) = borrow(&app, item_id, "Carol", "555-0100").await;
    let loan_id = loan["id"].as_i64().unwrap();

    let (status, body) = post_json(&app, &format!("/api/v1/loans/{}/return", loan_id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loan"]["status"], "returned");
    assert!(body["loan"]["action"].as_str().unwrap().starts_with("Returned (Date: "));

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 1);

    let (status, _) = post_json(&app, &format!("/api/v1/loans/{}/return", loan_id), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 1);
}

#[tokio::test]
async fn test_import_defaults() {
    let app = app().await;

    let (status, report) = post_json(&app, "/api/v1/items/import", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["imported"], 50);

    let (_, items) = get_json(&app, "/api/v1/items").await;
    assert_eq!(items.as_array().unwrap().len(), 50);

    let (status, report) = post_json(&app, "/api/v1/items/import", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["imported"], 0);
    assert_eq!(report["existing"], 50);

    let (_, items) = get_json(&app, "/api/v1/items").await;
    assert_eq!(items.as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn test_reminder_draft() {
    let app = app().await;
    let item_id = create_item(&app, "Fujifilm X-T4", 1).await;
    let (_, loan) = borrow(&app, item_id, "Dave", "dave@example.com").await;
    let loan_id = loan["id"].as_i64().unwrap();

    let (status, draft) = get_json(&app, &format!("/api/v1/loans/{}/reminder", loan_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["recipient"], "dave@example.com");
    assert_eq!(draft["subject"], "Equipment Return Reminder: Fujifilm X-T4");
    assert!(draft["body"].as_str().unwrap().contains("Hi Dave,"));
    assert!(draft["mailto"].as_str().unwrap().starts_with("mailto:dave@example.com?subject="));

    post_json(&app, &format!("/api/v1/loans/{}/return", loan_id), json!({})).await;
    let (status, _) = get_json(&app, &format!("/api/v1/loans/{}/reminder", loan_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_stats() {
    let app = app().await;
    let item_id = create_item(&app, "Godox SL60W", 2).await;
    borrow(&app, item_id, "Erin", "").await;

    let (status, stats) = get_json(&app, "/api/v1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["inventory"]["items"], 1);
    assert_eq!(stats["inventory"]["total_units"], 2);
    assert_eq!(stats["inventory"]["units_in_stock"], 1);
    assert_eq!(stats["inventory"]["units_on_loan"], 1);
    assert_eq!(stats["loans"]["active"], 1);
    assert_eq!(stats["loans"]["overdue"], 0);
}

// ---------------------------------------------------------------------------
// HTML pages
// ---------------------------------------------------------------------------

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, String::from_utf8(body).expect("Page is not UTF-8"))
}

async fn post_form(app: &Router, uri: &str, form: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.expect("Failed to send request")
}

#[tokio::test]
async fn test_pages_render() {
    let app = app().await;

    for (uri, heading) in [
        ("/borrow", "Borrow Equipment"),
        ("/return", "Return Equipment"),
        ("/inventory", "Inventory Management"),
        ("/logs", "Logs &amp; Notifications"),
    ] {
        let (status, page) = get_page(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(page.contains(&format!("<h2>{}</h2>", heading)), "{}", uri);
    }

    let (_, page) = get_page(&app, "/borrow").await;
    assert!(page.contains("Out of Stock"));

    let (_, page) = get_page(&app, "/return").await;
    assert!(page.contains("All items are accounted for. No pending returns."));
}

#[tokio::test]
async fn test_root_redirects_to_borrow() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/borrow");
}

#[tokio::test]
async fn test_borrow_form_flow() {
    let app = app().await;
    let item_id = create_item(&app, "Pentax K1000", 1).await;

    let (_, page) = get_page(&app, "/borrow").await;
    assert!(page.contains("Pentax K1000 (Available: 1)"));

    let return_date = Local::now().date_naive() + Duration::days(3);
    let response = post_form(
        &app,
        "/borrow",
        &format!(
            "student_name=Frank&contact_info=frank%40example.com&item_id={}&return_date={}",
            item_id, return_date
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/borrow?notice=Success"));

    let (_, page) = get_page(&app, "/logs").await;
    assert!(page.contains("Frank"));
    assert!(page.contains("Normal"));

    let response = post_form(
        &app,
        "/borrow",
        &format!("student_name=Grace&item_id={}&return_date={}", item_id, return_date),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains(r#"<div class="banner error">"#));
}

#[tokio::test]
async fn test_inventory_form_flow() {
    let app = app().await;

    let response = post_form(&app, "/inventory/items", "name=Rode+NTG3&category=Audio&total_qty=2").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/inventory?notice=Added%3A%20Rode%20NTG3"
    );

    let (_, page) = get_page(&app, "/inventory").await;
    assert!(page.contains("<td>Rode NTG3</td><td>Audio</td><td>2</td><td>2</td>"));

    let response = post_form(&app, "/inventory/import", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/inventory?warning="));
}

#[tokio::test]
async fn test_logs_reminder_draft() {
    let app = app().await;
    let item_id = create_item(&app, "Epson EF-100", 1).await;
    let (_, loan) = borrow(&app, item_id, "Heidi", "heidi@example.com").await;

    let (status, page) = get_page(&app, &format!("/logs?notify={}", loan["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Hi Heidi,"));
    assert!(page.contains("Click here to open Email Client"));
}

#[tokio::test]
async fn test_logs_reminder_for_closed_loan_shows_banner() {
    let app = app().await;
    let item_id = create_item(&app, "Zoom H6", 1).await;
    let (_, loan) = borrow(&app, item_id, "Ivan", "ivan@example.com").await;
    let loan_id = loan["id"].as_i64().unwrap();
    post_json(&app, &format!("/api/v1/loans/{}/return", loan_id), json!({})).await;

    let (status, page) = get_page(&app, &format!("/logs?notify={}", loan_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(page.contains("<h2>Logs &amp; Notifications</h2>"));
    assert!(page.contains(&format!(
        r#"<div class="banner error">Loan {} has already been returned</div>"#,
        loan_id
    )));
    assert!(!page.contains("Click here to open Email Client"));

    let (status, page) = get_page(&app, "/logs?notify=9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains(r#"<div class="banner error">"#));
    assert!(page.contains("View Full History Log"));
}

#[tokio::test]
async fn test_return_form_flow() {
    let app = app().await;
    let item_id = create_item(&app, "Olympus OM-1", 1).await;
    let (_, loan) = borrow(&app, item_id, "Judy", "555-0199").await;
    let loan_id = loan["id"].as_i64().unwrap();

    let (status, page) = get_page(&app, "/return").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(&format!(r#"<option value="{}">Judy - Olympus OM-1 (Borrowed: "#, loan_id)));

    let response = post_form(&app, "/return", &format!("loan_id={}", loan_id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/return?notice="));

    let (_, page) = get_page(&app, "/return").await;
    assert!(page.contains("All items are accounted for. No pending returns."));
    assert!(!page.contains(r#"name="loan_id""#));

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 1);

    let response = post_form(&app, "/return", &format!("loan_id={}", loan_id)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains(r#"<div class="banner error">"#));
    assert!(page.contains("All items are accounted for. No pending returns."));

    let (_, item) = get_json(&app, &format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["in_stock_qty"], 1);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;

    let (status, doc) = get_json(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Equipment Center API");
    assert!(doc["paths"]["/loans/{id}/return"]["post"].is_object());
    assert!(doc["components"]["schemas"]["ReminderDraft"].is_object());
}

//! Inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        import_report::ImportReport,
        item::{CreateItem, Item, ItemQuery},
    },
};

/// List inventory
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Inventory items", body = Vec<Item>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.catalog.list_items(&query).await?;
    Ok(Json(items))
}

/// Get item details by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Item>> {
    let item = state.services.catalog.get_item(id).await?;
    Ok(Json(item))
}

/// Add an item to inventory
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Missing name or quantity below 1")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = state.services.catalog.create_item(data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Import the default catalog (no-op when inventory is not empty)
#[utoipa::path(
    post,
    path = "/items/import",
    tag = "items",
    responses(
        (status = 200, description = "Import report", body = ImportReport)
    )
)]
pub async fn import_defaults(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ImportReport>> {
    let report = state.services.catalog.import_defaults().await?;
    Ok(Json(report))
}

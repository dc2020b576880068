//! # Product Endpoints
//!
//! ```text
//! GET    /api/v1/products?name=   list (name filter ignores ASCII case)
//! POST   /api/v1/products         create  → 201 + Location
//! GET    /api/v1/products/{id}    get
//! PUT    /api/v1/products/{id}    replace → 204
//! PATCH  /api/v1/products/{id}    partial → 200 + product
//! DELETE /api/v1/products/{id}    delete  → 204
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

use stockroom_core::{Product, ProductId};

use super::dto::{ListQuery, ProductBody, ProductPatchBody};
use super::{AppState, PRODUCTS_PATH};
use crate::error::ApiResult;

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let products = state.store.list(query.name.as_deref()).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let draft = body.into_draft()?;

    let product = state.store.create(draft).await?;
    debug!(id = product.id, "Created via HTTP");

    let location = format!("{}/{}", PRODUCTS_PATH, product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    // Missing ids win over a bad payload, malformed JSON included
    state.store.get(id).await?;
    let Json(body) = body?;
    let draft = body.into_draft()?;

    state.store.update(id, draft).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    body: Result<Json<ProductPatchBody>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;

    state.store.get(id).await?;
    let Json(body) = body?;
    let patch = body.into_patch()?;

    Ok(Json(state.store.patch(id, patch).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

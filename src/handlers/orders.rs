use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::filter::{OrderFilter, StatusFilter};
use crate::domain::order::Order;
use crate::domain::status::AdminStatus;
use crate::errors::AppError;
use crate::SharedOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub customer: String,
    pub phone: String,
    pub products: String,
    /// Decimal amount as a string, e.g. "58000"
    pub total: String,
    /// Canonical admin status
    pub status: String,
    pub status_label: String,
    /// Lowercased status as last received from the order service
    pub raw_status: String,
    pub date: String,
    pub terminal: bool,
    pub allowed_transitions: Vec<String>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer: o.customer,
            phone: o.phone,
            products: o.products,
            total: o.total.to_string(),
            status: o.status.as_str().to_string(),
            status_label: o.status.label().to_string(),
            raw_status: o.raw_status,
            date: o.date,
            terminal: o.status.is_terminal(),
            allowed_transitions: o
                .status
                .allowed_transitions()
                .into_iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Case-insensitive search over order id and customer name.
    #[serde(default)]
    pub q: String,
    /// `all` or one canonical status. Defaults to `all`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub loaded: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelOrderRequest {
    /// Must be `true`; the operator's answer to the cancel prompt.
    #[serde(default)]
    pub confirm: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Returns the loaded orders matching the search text and status filter,
/// in backend order.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("q" = Option<String>, Query, description = "Search in order id or customer name"),
        ("status" = Option<String>, Query, description = "`all` or a canonical status"),
    ),
    responses(
        (status = 200, description = "Filtered orders", body = ListOrdersResponse),
        (status = 400, description = "Unknown status filter"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<SharedOrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let status: StatusFilter = match params.status.as_deref() {
        Some(s) if !s.trim().is_empty() => s.parse()?,
        _ => StatusFilter::All,
    };

    let items: Vec<OrderResponse> = service
        .filter(&OrderFilter::new(params.q, status))
        .await
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        total: items.len(),
        items,
    }))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not loaded"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<SharedOrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    match service.get(&order_id).await {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(DomainError::OrderNotFound(order_id).into()),
    }
}

/// POST /orders/refresh
///
/// Reloads every order from the order service. The previous list is kept
/// if the service fails or answers with an unexpected shape.
#[utoipa::path(
    post,
    path = "/orders/refresh",
    responses(
        (status = 200, description = "Orders reloaded", body = RefreshResponse),
        (status = 502, description = "Order service unreachable or malformed response"),
    ),
    tag = "orders"
)]
pub async fn refresh_orders(service: web::Data<SharedOrderService>) -> Result<HttpResponse, AppError> {
    let loaded = service.refresh().await?;
    Ok(HttpResponse::Ok().json(RefreshResponse { loaded }))
}

/// PATCH /orders/{id}/status
///
/// Moves an order along its lifecycle. The local order only changes once
/// the order service acknowledges the update.
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not loaded"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 502, description = "Order service rejected or failed the update"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<SharedOrderService>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let next: AdminStatus = body.status.parse()?;
    let order = service.set_status(&order_id, next).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = String, Path, description = "Order id"),
    ),
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 404, description = "Order not loaded"),
        (status = 409, description = "Order already completed or cancelled"),
        (status = 428, description = "Cancellation not confirmed"),
        (status = 502, description = "Order service rejected or failed the update"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    service: web::Data<SharedOrderService>,
    path: web::Path<String>,
    body: web::Json<CancelOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = service.cancel(&order_id, body.confirm.into()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

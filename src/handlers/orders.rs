use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{OrderFilter, OrderStatus, StatusUpdate};
use crate::domain::ports::Caller;
use crate::errors::AppError;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::policy::KeyAccessPolicy;
use crate::projection::FieldSelection;

/// Concrete service type the HTTP layer is wired with.
pub type AppOrderService = OrderService<DieselOrderRepository, KeyAccessPolicy>;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Comma-separated status filter, e.g. "pending,shipped".
    pub status: Option<String>,
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// RFC 3339 lower bound on creation time.
    pub created_at_min: Option<String>,
    /// RFC 3339 upper bound on creation time.
    pub created_at_max: Option<String>,
    /// Comma-separated top-level fields to include in each order view.
    pub fields: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CountOrdersParams {
    pub status: Option<String>,
    pub created_at_min: Option<String>,
    pub created_at_max: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FieldsParams {
    pub fields: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditOrderRequest {
    /// Target status. The only mutation this endpoint supports.
    pub status: Option<String>,
    /// Audit note recorded against the transition. Defaults to empty.
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteOrderParams {
    /// `true` deletes the order permanently; otherwise it is trashed.
    #[serde(default)]
    pub force: bool,
}

// ── Filter construction ──────────────────────────────────────────────────────

fn parse_status_csv(csv: &str) -> Result<Vec<OrderStatus>, AppError> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<OrderStatus>().map_err(AppError::from))
        .collect()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Validation(format!("invalid timestamp '{}': {}", value, e)))
}

fn build_filter(
    status: Option<&str>,
    created_at_min: Option<&str>,
    created_at_max: Option<&str>,
    page: i64,
    per_page: i64,
) -> Result<OrderFilter, AppError> {
    Ok(OrderFilter {
        statuses: status.map(parse_status_csv).transpose()?.unwrap_or_default(),
        created_at_min: created_at_min.map(parse_timestamp).transpose()?,
        created_at_max: created_at_max.map(parse_timestamp).transpose()?,
        page,
        per_page,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Returns one page of orders the caller may read, each projected exactly
/// like `GET /orders/{id}` would. Pagination metadata is carried both in the
/// body and in `X-Total-Count` / `X-Total-Pages` headers.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("status" = Option<String>, Query, description = "Comma-separated status filter"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
        ("created_at_min" = Option<String>, Query, description = "RFC 3339 lower bound on creation time"),
        ("created_at_max" = Option<String>, Query, description = "RFC 3339 upper bound on creation time"),
        ("fields" = Option<String>, Query, description = "Top-level fields to include"),
    ),
    responses(
        (status = 200, description = "Paginated list of readable orders"),
        (status = 400, description = "Malformed filter parameter"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let per_page = params.limit.clamp(1, 100);
    let filter = build_filter(
        params.status.as_deref(),
        params.created_at_min.as_deref(),
        params.created_at_max.as_deref(),
        page,
        per_page,
    )?;
    let fields = FieldSelection::from_param(params.fields.as_deref());

    let (orders, pagination) =
        web::block(move || svc.list_orders(&caller, filter, &fields))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Total-Count", pagination.total.to_string()))
        .insert_header(("X-Total-Pages", pagination.total_pages.to_string()))
        .json(json!({ "orders": orders, "pagination": pagination })))
}

/// GET /orders/count
///
/// Total number of orders matching the filter. Requires the private-count
/// capability: totals can probe order states the caller cannot list.
#[utoipa::path(
    get,
    path = "/orders/count",
    params(
        ("status" = Option<String>, Query, description = "Comma-separated status filter"),
        ("created_at_min" = Option<String>, Query, description = "RFC 3339 lower bound on creation time"),
        ("created_at_max" = Option<String>, Query, description = "RFC 3339 upper bound on creation time"),
    ),
    responses(
        (status = 200, description = "Match count"),
        (status = 403, description = "Caller lacks the private-count capability"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn count_orders(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    query: web::Query<CountOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let filter = build_filter(
        params.status.as_deref(),
        params.created_at_min.as_deref(),
        params.created_at_max.as_deref(),
        1,
        1,
    )?;

    let count = web::block(move || svc.count_orders(&caller, filter))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("fields" = Option<String>, Query, description = "Top-level fields to include"),
    ),
    responses(
        (status = 200, description = "Order found", body = crate::projection::views::OrderView),
        (status = 403, description = "Caller may not read this order"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    path: web::Path<i64>,
    query: web::Query<FieldsParams>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = FieldSelection::from_param(query.into_inner().fields.as_deref());

    let order = web::block(move || svc.get_order(&caller, id, &fields))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "order": order })))
}

/// PUT /orders/{id}
///
/// Status transitions only; any other field in the payload is ignored.
/// Returns the refreshed order view.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    request_body = EditOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = crate::projection::views::OrderView),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Caller may not edit this order"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn edit_order(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<EditOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let status = body
        .status
        .as_deref()
        .map(|s| s.parse::<OrderStatus>().map_err(AppError::from))
        .transpose()?;
    let update = StatusUpdate {
        status,
        note: body.note.unwrap_or_default(),
    };

    let order = web::block(move || svc.edit_order(&caller, id, update))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "order": order })))
}

/// GET /orders/{id}/notes
#[utoipa::path(
    get,
    path = "/orders/{id}/notes",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("fields" = Option<String>, Query, description = "Top-level fields to include per note"),
    ),
    responses(
        (status = 200, description = "Approved order notes", body = crate::projection::views::OrderNoteView),
        (status = 403, description = "Caller may not read this order"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order_notes(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    path: web::Path<i64>,
    query: web::Query<FieldsParams>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = FieldSelection::from_param(query.into_inner().fields.as_deref());

    let notes = web::block(move || svc.order_notes(&caller, id, &fields))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "order_notes": notes })))
}

/// DELETE /orders/{id}
///
/// Fully implemented but deliberately not registered in `build_server`;
/// deletion ships in a later release together with order creation.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("force" = Option<bool>, Query, description = "Permanently delete instead of trashing"),
    ),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 403, description = "Caller may not delete this order"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    svc: web::Data<AppOrderService>,
    caller: Caller,
    path: web::Path<i64>,
    query: web::Query<DeleteOrderParams>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let force = query.into_inner().force;

    let result = web::block(move || svc.delete_order(&caller, id, force))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /orders/ping
///
/// Liveness probe. No authorization, no side effects.
#[utoipa::path(
    get,
    path = "/orders/ping",
    responses(
        (status = 200, description = "Service is alive"),
    ),
    tag = "orders"
)]
pub async fn ping(svc: web::Data<AppOrderService>) -> HttpResponse {
    HttpResponse::Ok().json(svc.ping())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_csv_parses_into_statuses() {
        let statuses = parse_status_csv("pending, shipped").unwrap();
        assert_eq!(statuses, vec![OrderStatus::Pending, OrderStatus::Shipped]);
    }

    #[test]
    fn bad_status_csv_is_a_validation_error() {
        let err = parse_status_csv("pending,bogus").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn timestamps_parse_to_utc() {
        let parsed = parse_timestamp("2024-06-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn bad_timestamp_is_a_validation_error() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn filter_defaults_to_no_status_constraint() {
        let filter = build_filter(None, None, None, 1, 20).unwrap();
        assert!(filter.statuses.is_empty());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, 20);
    }
}

//! OpenAPI documentation for the orders API.
//!
//! - Swagger UI: `/swagger-ui/`
//! - OpenAPI JSON: `/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::domain::order::Pagination;
use crate::handlers::orders::{
    CountOrdersParams, DeleteOrderParams, EditOrderRequest, FieldsParams, ListOrdersParams,
};
use crate::projection::views::{
    AftershipExtension, BillingAddressView, LineItemView, OrderNoteView, OrderView,
    ShippingAddressView, TrackingView, WoocommerceTrackings,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order API",
        description = "Order query and projection endpoints over an external order store.",
        version = "0.1.0",
    ),
    paths(
        crate::handlers::orders::list_orders,
        crate::handlers::orders::count_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::edit_order,
        crate::handlers::orders::get_order_notes,
        crate::handlers::orders::ping,
    ),
    components(schemas(
        OrderView,
        OrderNoteView,
        LineItemView,
        TrackingView,
        AftershipExtension,
        WoocommerceTrackings,
        BillingAddressView,
        ShippingAddressView,
        Pagination,
        ListOrdersParams,
        CountOrdersParams,
        FieldsParams,
        EditOrderRequest,
        DeleteOrderParams,
    )),
    tags(
        (name = "orders", description = "Order listing, projection, and status transitions"),
    )
)]
pub struct ApiDoc;

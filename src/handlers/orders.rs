use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::ShippingAddress;
use crate::domain::order::{
    LineSnapshot, ListResult, OrderFilter, OrderLineInput, OrderLineView, OrderView, PageRequest,
    PaginationInfo,
};
use crate::errors::AppError;
use crate::AppOrderService;

use super::auth::AuthenticatedBuyer;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub product_id: Uuid,
    /// Must be positive.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Shipping address; must belong to the calling buyer.
    pub address_id: Uuid,
    pub payment_method: String,
    pub lines: Vec<CreateOrderLineRequest>,
}

/// The product as it was sold, independent of later catalog edits.
#[derive(Debug, Serialize, ToSchema)]
pub struct SoldProductResponse {
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub description: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub store_id: Uuid,
    pub store_name: String,
    pub store_image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShippingAddressResponse {
    pub id: Uuid,
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub detail: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
    pub product: SoldProductResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub address_id: Uuid,
    pub shipping_address: ShippingAddressResponse,
    pub total_amount: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<LineSnapshot> for SoldProductResponse {
    fn from(s: LineSnapshot) -> Self {
        Self {
            name: s.product_name,
            slug: s.slug,
            reseller_price: s.reseller_price,
            consumer_price: s.consumer_price,
            description: s.description,
            category_id: s.category_id,
            category_name: s.category_name,
            store_id: s.store_id,
            store_name: s.store_name,
            store_image_url: s.store_image_url,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressResponse {
    fn from(a: ShippingAddress) -> Self {
        Self {
            id: a.id,
            label: a.label,
            recipient: a.recipient,
            phone: a.phone,
            detail: a.detail,
        }
    }
}

impl From<OrderLineView> for OrderLineResponse {
    fn from(l: OrderLineView) -> Self {
        Self {
            id: l.id,
            line_no: l.line_no,
            product_id: l.product_id,
            store_id: l.store_id,
            quantity: l.quantity,
            line_total: l.line_total,
            product: l.snapshot.into(),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            address_id: o.shipping_address.id,
            shipping_address: o.shipping_address.into(),
            total_amount: o.total_amount,
            invoice_code: o.invoice_code,
            payment_method: o.payment_method,
            status: o.status,
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
            lines: o.lines.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

/// Numbers arrive as text so that garbage falls back to defaults instead of
/// failing the request. Documented field by field on `list_orders`.
#[derive(Debug, Deserialize)]
pub struct ListOrdersParams {
    pub invoice: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListOrdersParams {
    fn page_request(&self) -> PageRequest {
        fn number(s: &Option<String>) -> Option<i64> {
            s.as_deref().and_then(|s| s.trim().parse().ok())
        }
        PageRequest::normalized(number(&self.page), number(&self.page_size))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationResponse {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub pagination: PaginationResponse,
}

impl From<PaginationInfo> for PaginationResponse {
    fn from(p: PaginationInfo) -> Self {
        Self {
            page: p.page,
            page_size: p.page_size,
            total_items: p.total_items,
            total_pages: p.total_pages,
        }
    }
}

impl From<ListResult> for ListOrdersResponse {
    fn from(r: ListResult) -> Self {
        Self {
            items: r.items.into_iter().map(Into::into).collect(),
            pagination: r.pagination.into(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order for the calling buyer. Stock is reserved with a guarded
/// decrement inside the same transaction that writes the order, so either
/// the whole order commits or nothing does.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    params(
        ("X-Buyer-Id" = Uuid, Header, description = "Authenticated buyer"),
    ),
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid lines, address or insufficient stock"),
        (status = 401, description = "Missing buyer identity"),
        (status = 404, description = "Unknown product"),
        (status = 409, description = "Lost a race with a concurrent order; safe to retry"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppOrderService>,
    buyer: AuthenticatedBuyer,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.payment_method.trim().is_empty() {
        return Err(AppError::BadRequest("payment_method is required".to_string()));
    }
    let lines: Vec<OrderLineInput> = body
        .lines
        .iter()
        .map(|l| OrderLineInput {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    let order = web::block(move || {
        service.place_order(buyer.id, body.address_id, &body.payment_method, &lines)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order with its lines and sold-as product data. Orders of
/// other buyers are reported as not found.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-Buyer-Id" = Uuid, Header, description = "Authenticated buyer"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing buyer identity"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    buyer: AuthenticatedBuyer,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order(order_id, buyer.id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Lists the caller's orders, newest first, optionally filtered by an
/// invoice-code fragment and/or status.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("X-Buyer-Id" = Uuid, Header, description = "Authenticated buyer"),
        ("invoice" = Option<String>, Query, description = "Case-insensitive invoice code fragment"),
        ("status" = Option<String>, Query, description = "Exact status, e.g. pending"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 401, description = "Missing buyer identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppOrderService>,
    buyer: AuthenticatedBuyer,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page_request();
    let filter = OrderFilter::new(params.invoice, params.status);

    let result = web::block(move || service.list_orders(buyer.id, &filter, page))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse::from(result)))
}

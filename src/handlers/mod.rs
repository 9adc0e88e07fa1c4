pub mod auth;
pub mod orders;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(orders::create_order, orders::get_order, orders::list_orders),
    components(schemas(
        orders::CreateOrderRequest,
        orders::CreateOrderLineRequest,
        orders::OrderResponse,
        orders::OrderLineResponse,
        orders::ShippingAddressResponse,
        orders::SoldProductResponse,
        orders::ListOrdersResponse,
        orders::PaginationResponse,
    )),
    tags((name = "orders", description = "Order placement and history"))
)]
pub struct ApiDoc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::ShippingAddress;
use super::invoice::InvoiceCode;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Sold-as copy of a product, taken when the order is assembled. Never refers
/// back to the live catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub product_name: String,
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

#[derive(Debug, Clone)]
pub struct PendingLine {
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
    pub snapshot: LineSnapshot,
}

/// An order that has been validated and priced but not yet written.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub buyer_id: Uuid,
    pub address_id: Uuid,
    pub payment_method: String,
    pub invoice_code: InvoiceCode,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub lines: Vec<PendingLine>,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
    pub snapshot: LineSnapshot,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub shipping_address: ShippingAddress,
    pub total_amount: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Case-insensitive substring of the invoice code.
    pub invoice: Option<String>,
    pub status: Option<String>,
}

impl OrderFilter {
    pub fn new(invoice: Option<String>, status: Option<String>) -> Self {
        fn non_blank(s: Option<String>) -> Option<String> {
            s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            invoice: non_blank(invoice),
            status: non_blank(status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Missing or non-positive values fall back to page 1 / the default size.
    pub fn normalized(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalized(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_pages = if total_items <= 0 {
            0
        } else {
            (total_items + request.page_size - 1) / request.page_size
        };
        Self {
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub pagination: PaginationInfo,
}

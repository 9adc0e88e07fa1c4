use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{CatalogProduct, CategoryRef, ShippingAddress, StoreRef};
use crate::domain::order::{LineSnapshot, OrderLineView, OrderView, PendingLine};
use crate::schema::{addresses, categories, line_snapshots, order_lines, orders, products, stores};

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub address_id: Uuid,
    pub total_amount: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub address_id: Uuid,
    pub total_amount: i64,
    pub invoice_code: &'a str,
    pub payment_method: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = line_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LineSnapshotRow {
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

#[derive(Debug, Insertable)]
#[diesel(table_name = line_snapshots)]
pub struct NewLineSnapshotRow<'a> {
    pub id: Uuid,
    pub order_line_id: Uuid,
    pub product_name: &'a str,
    pub slug: &'a str,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub description: &'a str,
    pub category_id: Uuid,
    pub category_name: &'a str,
    pub store_id: Uuid,
    pub store_name: &'a str,
    pub store_image_url: Option<&'a str>,
}

impl NewOrderLineRow {
    pub fn new(order_id: Uuid, line_no: i32, line: &PendingLine) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            line_no,
            product_id: line.product_id,
            store_id: line.store_id,
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

impl<'a> NewLineSnapshotRow<'a> {
    pub fn new(order_line_id: Uuid, s: &'a LineSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_line_id,
            product_name: &s.product_name,
            slug: &s.slug,
            reseller_price: s.reseller_price,
            consumer_price: s.consumer_price,
            description: &s.description,
            category_id: s.category_id,
            category_name: &s.category_name,
            store_id: s.store_id,
            store_name: &s.store_name,
            store_image_url: s.store_image_url.as_deref(),
        }
    }
}

impl From<LineSnapshotRow> for LineSnapshot {
    fn from(r: LineSnapshotRow) -> Self {
        LineSnapshot {
            product_name: r.product_name,
            slug: r.slug,
            reseller_price: r.reseller_price,
            consumer_price: r.consumer_price,
            description: r.description,
            category_id: r.category_id,
            category_name: r.category_name,
            store_id: r.store_id,
            store_name: r.store_name,
            store_image_url: r.store_image_url,
        }
    }
}

impl OrderRow {
    pub fn into_view(
        self,
        address: AddressRow,
        lines: Vec<(OrderLineRow, LineSnapshotRow)>,
    ) -> OrderView {
        OrderView {
            id: self.id,
            buyer_id: self.buyer_id,
            shipping_address: address.into(),
            total_amount: self.total_amount,
            invoice_code: self.invoice_code,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            lines: lines
                .into_iter()
                .map(|(l, s)| OrderLineView {
                    id: l.id,
                    line_no: l.line_no,
                    product_id: l.product_id,
                    store_id: l.store_id,
                    quantity: l.quantity,
                    line_total: l.line_total,
                    snapshot: s.into(),
                })
                .collect(),
        }
    }
}

// ── Catalog and addresses (read-only here) ───────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub description: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoreRow {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub detail: String,
}

impl ProductRow {
    pub fn into_catalog(
        self,
        store: Option<StoreRow>,
        category: Option<CategoryRow>,
    ) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            name: self.name,
            slug: self.slug,
            reseller_price: self.reseller_price,
            consumer_price: self.consumer_price,
            stock: self.stock,
            description: self.description,
            store: store.map(|s| StoreRef {
                id: s.id,
                name: s.name,
                image_url: s.image_url,
            }),
            category: category.map(|c| CategoryRef {
                id: c.id,
                name: c.name,
            }),
        }
    }
}

impl From<AddressRow> for ShippingAddress {
    fn from(r: AddressRow) -> Self {
        ShippingAddress {
            id: r.id,
            buyer_id: r.buyer_id,
            label: r.label,
            recipient: r.recipient,
            phone: r.phone,
            detail: r.detail,
        }
    }
}

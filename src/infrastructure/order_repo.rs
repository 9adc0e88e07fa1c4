use std::collections::HashMap;

use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::{DomainError, PlacementFailure};
use crate::domain::order::{
    ListResult, OrderFilter, OrderView, PageRequest, PaginationInfo, PendingOrder,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{addresses, line_snapshots, order_lines, orders};

use super::inventory::decrement_stock;
use super::models::{
    AddressRow, LineSnapshotRow, NewLineSnapshotRow, NewOrderLineRow, NewOrderRow, OrderLineRow,
    OrderRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::storage("query orders", e)
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::storage("check out a database connection", e)
    }
}

// Only BEGIN/COMMIT failures reach this; every statement inside the unit
// names its own step.
impl From<diesel::result::Error> for PlacementFailure {
    fn from(e: diesel::result::Error) -> Self {
        placement_error("run the order transaction", e)
    }
}

/// Postgres resolves lock cycles and serialization conflicts by aborting one
/// side (SQLSTATE 40P01 / 40001). Those are lost races, not broken storage.
fn placement_error(step: &'static str, e: DieselError) -> PlacementFailure {
    match &e {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
            PlacementFailure::Contention {
                step,
                message: info.message().to_string(),
            }
        }
        DieselError::DatabaseError(_, info) if info.message().contains("deadlock detected") => {
            PlacementFailure::Contention {
                step,
                message: info.message().to_string(),
            }
        }
        _ => PlacementFailure::storage(step, &e),
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn commit(&self, order: &PendingOrder) -> Result<OrderView, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| PlacementFailure::storage("check out a database connection", e))?;

        let view = conn.transaction::<_, PlacementFailure, _>(|conn| {
            let order_id = write_order(conn, order)?;
            // Read back inside the unit so the caller sees exactly what commits.
            load_order(conn, order_id, order.buyer_id)
                .map_err(|e| PlacementFailure::storage("re-read the order", e))?
                .ok_or_else(|| {
                    PlacementFailure::storage("re-read the order", "order missing after insert")
                })
        })?;

        Ok(view)
    }

    fn find_for_buyer(&self, id: Uuid, buyer_id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(load_order(&mut conn, id, buyer_id)?)
    }

    fn list_for_buyer(
        &self,
        buyer_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = buyer_orders(buyer_id, filter).count().get_result(conn)?;

            let rows: Vec<OrderRow> = buyer_orders(buyer_id, filter)
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.desc()))
                .limit(page.page_size)
                .offset(page.offset())
                .load(conn)?;

            let lines: Vec<(OrderLineRow, LineSnapshotRow)> = OrderLineRow::belonging_to(&rows)
                .inner_join(line_snapshots::table)
                .select((OrderLineRow::as_select(), LineSnapshotRow::as_select()))
                .order((order_lines::order_id, order_lines::line_no))
                .load(conn)?;

            let address_ids: Vec<Uuid> = rows.iter().map(|o| o.address_id).collect();
            let address_by_id: HashMap<Uuid, AddressRow> = addresses::table
                .filter(addresses::id.eq_any(address_ids))
                .select(AddressRow::as_select())
                .load::<AddressRow>(conn)?
                .into_iter()
                .map(|a| (a.id, a))
                .collect();

            let mut by_order: HashMap<Uuid, Vec<(OrderLineRow, LineSnapshotRow)>> = HashMap::new();
            for (line, snapshot) in lines {
                by_order
                    .entry(line.order_id)
                    .or_default()
                    .push((line, snapshot));
            }

            let items = rows
                .into_iter()
                .map(|o| {
                    // Several orders may share an address.
                    let address = address_by_id.get(&o.address_id).cloned().ok_or_else(|| {
                        DomainError::storage("load shipping addresses", format!("address {} missing", o.address_id))
                    })?;
                    let lines = by_order.remove(&o.id).unwrap_or_default();
                    Ok(o.into_view(address, lines))
                })
                .collect::<Result<Vec<_>, DomainError>>()?;

            Ok(ListResult {
                items,
                pagination: PaginationInfo::new(page, total),
            })
        })
    }
}

/// Header, then lines, then snapshots, then one guarded decrement per line.
/// Any error aborts the surrounding transaction.
fn write_order(conn: &mut PgConnection, order: &PendingOrder) -> Result<Uuid, PlacementFailure> {
    let order_id = Uuid::new_v4();
    diesel::insert_into(orders::table)
        .values(&NewOrderRow {
            id: order_id,
            buyer_id: order.buyer_id,
            address_id: order.address_id,
            total_amount: order.total_amount,
            invoice_code: order.invoice_code.as_str(),
            payment_method: &order.payment_method,
            status: order.status.as_str(),
        })
        .execute(conn)
        .map_err(|e| placement_error("insert order header", e))?;

    let new_lines: Vec<NewOrderLineRow> = order
        .lines
        .iter()
        .zip(1..)
        .map(|(line, line_no)| NewOrderLineRow::new(order_id, line_no, line))
        .collect();
    diesel::insert_into(order_lines::table)
        .values(&new_lines)
        .execute(conn)
        .map_err(|e| placement_error("insert order lines", e))?;

    let new_snapshots: Vec<NewLineSnapshotRow> = new_lines
        .iter()
        .zip(&order.lines)
        .map(|(row, line)| NewLineSnapshotRow::new(row.id, &line.snapshot))
        .collect();
    diesel::insert_into(line_snapshots::table)
        .values(&new_snapshots)
        .execute(conn)
        .map_err(|e| placement_error("insert line snapshots", e))?;

    // Lock product rows in id order so concurrent orders naming the same
    // products in different orders cannot wait on each other in a cycle.
    let mut by_product: Vec<_> = order.lines.iter().collect();
    by_product.sort_by_key(|line| line.product_id);

    for line in by_product {
        let taken = decrement_stock(conn, line.product_id, line.quantity)
            .map_err(|e| placement_error("decrement stock", e))?;
        if !taken {
            log::warn!(
                "Stock for product {} moved before commit of order {} (wanted {})",
                line.product_id,
                order.invoice_code,
                line.quantity
            );
            return Err(PlacementFailure::StockRace {
                product_id: line.product_id,
                requested: line.quantity,
            });
        }
    }

    Ok(order_id)
}

fn load_order(
    conn: &mut PgConnection,
    id: Uuid,
    buyer_id: Uuid,
) -> QueryResult<Option<OrderView>> {
    // The address stays visible on the order even after the buyer deletes it.
    let found = orders::table
        .inner_join(addresses::table)
        .filter(orders::id.eq(id))
        .filter(orders::buyer_id.eq(buyer_id))
        .filter(orders::deleted_at.is_null())
        .select((OrderRow::as_select(), AddressRow::as_select()))
        .first(conn)
        .optional()?;

    let Some((order, address)) = found else {
        return Ok(None);
    };

    let lines = OrderLineRow::belonging_to(&order)
        .inner_join(line_snapshots::table)
        .select((OrderLineRow::as_select(), LineSnapshotRow::as_select()))
        .order(order_lines::line_no.asc())
        .load(conn)?;

    Ok(Some(order.into_view(address, lines)))
}

fn buyer_orders(buyer_id: Uuid, filter: &OrderFilter) -> orders::BoxedQuery<'_, Pg> {
    let mut query = orders::table
        .filter(orders::buyer_id.eq(buyer_id))
        .filter(orders::deleted_at.is_null())
        .into_boxed();

    if let Some(invoice) = &filter.invoice {
        query = query.filter(orders::invoice_code.ilike(format!("%{}%", escape_like(invoice))));
    }
    if let Some(status) = &filter.status {
        query = query.filter(orders::status.eq(status));
    }
    query
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::products;

/// Takes `quantity` units of a product, but only if that many are in stock.
///
/// Runs on the caller's connection so it joins whatever transaction is open.
/// Returns `false` when the guard matched no row; a product that has gone is
/// indistinguishable from one that has run short.
pub fn decrement_stock(
    conn: &mut PgConnection,
    product_id: Uuid,
    quantity: i32,
) -> QueryResult<bool> {
    let affected = diesel::update(
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::stock.ge(quantity))
            .filter(products::deleted_at.is_null()),
    )
    .set((
        products::stock.eq(products::stock - quantity),
        products::updated_at.eq(Utc::now()),
    ))
    .execute(conn)?;

    Ok(affected == 1)
}

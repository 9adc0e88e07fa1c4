use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::CatalogProduct;
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogReader;
use crate::schema::{categories, products, stores};

use super::models::{CategoryRow, ProductRow, StoreRow};

pub struct DieselCatalogReader {
    pool: DbPool,
}

impl DieselCatalogReader {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogReader for DieselCatalogReader {
    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CatalogProduct>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get()?;

        // Deleted stores and categories come back as NULL so the assembler can
        // flag the product instead of silently dropping it.
        let rows: Vec<(ProductRow, Option<StoreRow>, Option<CategoryRow>)> = products::table
            .left_join(
                stores::table.on(stores::id
                    .eq(products::store_id)
                    .and(stores::deleted_at.is_null())),
            )
            .left_join(
                categories::table.on(categories::id
                    .eq(products::category_id)
                    .and(categories::deleted_at.is_null())),
            )
            .filter(products::id.eq_any(ids))
            .filter(products::deleted_at.is_null())
            .select((
                ProductRow::as_select(),
                (stores::id, stores::name, stores::image_url).nullable(),
                (categories::id, categories::name).nullable(),
            ))
            .load(&mut conn)
            .map_err(|e| DomainError::storage("load products", e))?;

        Ok(rows
            .into_iter()
            .map(|(product, store, category)| product.into_catalog(store, category))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use diesel::prelude::*;
    use uuid::Uuid;

    use super::DieselCatalogReader;
    use crate::domain::ports::CatalogReader;
    use crate::infrastructure::test_support::{seed_product, seed_shop, setup_db};
    use crate::schema::{products, stores};

    #[tokio::test]
    async fn resolves_products_with_store_and_category() {
        let (_container, pool) = setup_db().await;
        let mut conn = pool.get().expect("conn");
        let shop = seed_shop(&mut conn);
        let rice = seed_product(&mut conn, &shop, "Rice", 1000, 5);
        let oil = seed_product(&mut conn, &shop, "Oil", 2500, 1);
        let reader = DieselCatalogReader::new(pool);

        let mut found = reader
            .find_by_ids(&[rice, oil, Uuid::new_v4()])
            .expect("lookup failed");
        found.sort_by_key(|p| p.consumer_price);

        assert_eq!(found.len(), 2, "unknown ids are simply absent");
        assert_eq!(found[0].id, rice);
        assert_eq!(found[0].stock, 5);
        let store = found[0].store.as_ref().expect("store resolved");
        assert_eq!(store.id, shop.store_id);
        assert_eq!(store.name, "Toko Sejahtera");
        assert_eq!(
            found[0].category.as_ref().expect("category resolved").id,
            shop.category_id
        );
    }

    #[tokio::test]
    async fn deleted_rows_are_hidden_or_reported_missing() {
        let (_container, pool) = setup_db().await;
        let mut conn = pool.get().expect("conn");
        let shop = seed_shop(&mut conn);
        let gone = seed_product(&mut conn, &shop, "Gone", 1000, 5);
        let orphan = seed_product(&mut conn, &shop, "Orphan", 1000, 5);

        diesel::update(products::table.find(gone))
            .set(products::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .expect("delete product");
        diesel::update(stores::table.find(shop.store_id))
            .set(stores::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .expect("delete store");

        let found = DieselCatalogReader::new(pool)
            .find_by_ids(&[gone, orphan])
            .expect("lookup failed");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, orphan);
        assert!(found[0].store.is_none());
        assert!(found[0].category.is_some());
    }
}

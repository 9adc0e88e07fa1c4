use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::ShippingAddress;
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressDirectory;
use crate::schema::addresses;

use super::models::AddressRow;

pub struct DieselAddressDirectory {
    pool: DbPool,
}

impl DieselAddressDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AddressDirectory for DieselAddressDirectory {
    fn find_owned_by(
        &self,
        address_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<ShippingAddress>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = addresses::table
            .filter(addresses::id.eq(address_id))
            .filter(addresses::buyer_id.eq(buyer_id))
            .filter(addresses::deleted_at.is_null())
            .select(AddressRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DomainError::storage("look up the shipping address", e))?;

        Ok(row.map(ShippingAddress::from))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselAddressDirectory;
    use crate::domain::ports::AddressDirectory;
    use crate::infrastructure::test_support::{seed_address, setup_db};

    #[tokio::test]
    async fn only_the_owner_can_resolve_an_address() {
        let (_container, pool) = setup_db().await;
        let buyer = Uuid::new_v4();
        let address = {
            let mut conn = pool.get().expect("conn");
            seed_address(&mut conn, buyer)
        };
        let dir = DieselAddressDirectory::new(pool);

        let owned = dir
            .find_owned_by(address, buyer)
            .expect("lookup failed")
            .expect("owner sees the address");
        assert_eq!(owned.buyer_id, buyer);

        assert!(dir
            .find_owned_by(address, Uuid::new_v4())
            .expect("lookup failed")
            .is_none());
    }
}

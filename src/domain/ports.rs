use uuid::Uuid;

use super::catalog::{CatalogProduct, ShippingAddress};
use super::errors::DomainError;
use super::order::{ListResult, OrderFilter, OrderView, PageRequest, PendingOrder};

pub trait AddressDirectory: Send + Sync + 'static {
    /// Returns the address only when it exists and belongs to `buyer_id`.
    fn find_owned_by(
        &self,
        address_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<Option<ShippingAddress>, DomainError>;
}

pub trait CatalogReader: Send + Sync + 'static {
    /// One batched lookup; ids with no live product are simply absent.
    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CatalogProduct>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Writes the header, lines, snapshots and stock decrements as one unit
    /// and returns the order as stored.
    fn commit(&self, order: &PendingOrder) -> Result<OrderView, DomainError>;
    fn find_for_buyer(&self, id: Uuid, buyer_id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_for_buyer(
        &self,
        buyer_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult, DomainError>;
}

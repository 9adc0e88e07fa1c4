use chrono::Utc;
use uuid::Uuid;

use crate::domain::assembler::{assemble_order, validate_lines};
use crate::domain::errors::DomainError;
use crate::domain::invoice::InvoiceCode;
use crate::domain::order::{ListResult, OrderFilter, OrderLineInput, OrderView, PageRequest};
use crate::domain::ports::{AddressDirectory, CatalogReader, OrderRepository};

pub struct OrderService<A, C, R> {
    addresses: A,
    catalog: C,
    orders: R,
}

impl<A, C, R> OrderService<A, C, R>
where
    A: AddressDirectory,
    C: CatalogReader,
    R: OrderRepository,
{
    pub fn new(addresses: A, catalog: C, orders: R) -> Self {
        Self {
            addresses,
            catalog,
            orders,
        }
    }

    /// Validates, prices and commits an order for `buyer_id`.
    ///
    /// Nothing is retried here. A `StockRace` means the catalog moved under
    /// us; callers that want to retry must call this again so the order is
    /// re-assembled from fresh stock.
    pub fn place_order(
        &self,
        buyer_id: Uuid,
        address_id: Uuid,
        payment_method: &str,
        lines: &[OrderLineInput],
    ) -> Result<OrderView, DomainError> {
        self.try_place_order(buyer_id, address_id, payment_method, lines)
            .inspect_err(|e| log_placement_failure(buyer_id, e))
    }

    fn try_place_order(
        &self,
        buyer_id: Uuid,
        address_id: Uuid,
        payment_method: &str,
        lines: &[OrderLineInput],
    ) -> Result<OrderView, DomainError> {
        validate_lines(lines)?;

        let address = self
            .addresses
            .find_owned_by(address_id, buyer_id)?
            .ok_or(DomainError::AddressInvalid(address_id))?;

        let mut ids: Vec<Uuid> = Vec::with_capacity(lines.len());
        for line in lines {
            if !ids.contains(&line.product_id) {
                ids.push(line.product_id);
            }
        }
        let products = self.catalog.find_by_ids(&ids)?;

        let pending = assemble_order(
            buyer_id,
            &address,
            payment_method,
            lines,
            &products,
            InvoiceCode::generate(Utc::now().date_naive()),
        )?;

        let order = self.orders.commit(&pending)?;
        log::info!(
            "Placed order {} ({}) for buyer {}: {} line(s), total {}",
            order.id,
            order.invoice_code,
            buyer_id,
            order.lines.len(),
            order.total_amount
        );
        Ok(order)
    }

    /// Orders of other buyers are reported exactly like missing ones.
    pub fn get_order(&self, id: Uuid, buyer_id: Uuid) -> Result<OrderView, DomainError> {
        self.orders
            .find_for_buyer(id, buyer_id)?
            .ok_or(DomainError::OrderNotFound)
    }

    pub fn list_orders(
        &self,
        buyer_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult, DomainError> {
        self.orders.list_for_buyer(buyer_id, filter, page)
    }
}

fn log_placement_failure(buyer_id: Uuid, e: &DomainError) {
    match e {
        DomainError::CatalogInconsistent { .. } => {
            log::error!("Catalog defect while placing order for buyer {buyer_id}: {e}")
        }
        DomainError::InsufficientStock { .. } => {
            log::warn!("Order for buyer {buyer_id} rejected: {e}")
        }
        DomainError::OrderPlacementFailed(f) if f.is_concurrency_conflict() => {
            log::warn!("Order for buyer {buyer_id} lost a stock race: {e}")
        }
        e if e.is_validation() => log::info!("Order for buyer {buyer_id} rejected: {e}"),
        _ => log::error!("Failed to place order for buyer {buyer_id}: {e}"),
    }
}

//! Turns a buyer's requested lines plus the catalog's current view of the
//! products into a priced, snapshotted [`PendingOrder`].
//!
//! Everything here is pure: no storage access, safe to call again with fresh
//! catalog data after a failed commit.

use std::collections::HashMap;

use uuid::Uuid;

use super::catalog::{CatalogProduct, ShippingAddress};
use super::errors::DomainError;
use super::invoice::InvoiceCode;
use super::order::{LineSnapshot, OrderLineInput, OrderStatus, PendingLine, PendingOrder};

/// Input checks that need no storage: at least one line, every quantity positive.
pub fn validate_lines(lines: &[OrderLineInput]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::EmptyOrder);
    }
    if let Some(bad) = lines.iter().find(|l| l.quantity <= 0) {
        return Err(DomainError::InvalidQuantity {
            product_id: bad.product_id,
            quantity: bad.quantity,
        });
    }
    Ok(())
}

pub fn assemble_order(
    buyer_id: Uuid,
    address: &ShippingAddress,
    payment_method: &str,
    lines: &[OrderLineInput],
    products: &[CatalogProduct],
    invoice_code: InvoiceCode,
) -> Result<PendingOrder, DomainError> {
    validate_lines(lines)?;

    if address.buyer_id != buyer_id {
        return Err(DomainError::AddressInvalid(address.id));
    }

    let by_id: HashMap<Uuid, &CatalogProduct> = products.iter().map(|p| (p.id, p)).collect();

    // Report the first unknown product in submission order before anything else.
    if let Some(missing) = lines.iter().find(|l| !by_id.contains_key(&l.product_id)) {
        return Err(DomainError::ProductNotFound(missing.product_id));
    }

    let mut requested: HashMap<Uuid, i32> = HashMap::new();
    let mut pending_lines = Vec::with_capacity(lines.len());
    let mut total_amount: i64 = 0;

    for line in lines {
        let product = by_id
            .get(&line.product_id)
            .copied()
            .ok_or(DomainError::ProductNotFound(line.product_id))?;

        // Several lines may draw on the same product; the pre-check is
        // against what they ask for together.
        let wanted = requested.entry(product.id).or_insert(0);
        *wanted = wanted.saturating_add(line.quantity);
        if *wanted > product.stock {
            return Err(DomainError::InsufficientStock {
                product_id: product.id,
                name: product.name.clone(),
                available: product.stock,
                requested: *wanted,
            });
        }

        let store = product
            .store
            .as_ref()
            .ok_or(DomainError::CatalogInconsistent {
                product_id: product.id,
                missing: "store",
            })?;
        let category = product
            .category
            .as_ref()
            .ok_or(DomainError::CatalogInconsistent {
                product_id: product.id,
                missing: "category",
            })?;

        let line_total = product
            .consumer_price
            .checked_mul(i64::from(line.quantity))
            .ok_or(DomainError::AmountOverflow(product.id))?;
        total_amount = total_amount
            .checked_add(line_total)
            .ok_or(DomainError::AmountOverflow(product.id))?;

        pending_lines.push(PendingLine {
            product_id: product.id,
            store_id: store.id,
            quantity: line.quantity,
            line_total,
            snapshot: LineSnapshot {
                product_name: product.name.clone(),
                slug: product.slug.clone(),
                reseller_price: product.reseller_price,
                consumer_price: product.consumer_price,
                description: product.description.clone(),
                category_id: category.id,
                category_name: category.name.clone(),
                store_id: store.id,
                store_name: store.name.clone(),
                store_image_url: store.image_url.clone(),
            },
        });
    }

    Ok(PendingOrder {
        buyer_id,
        address_id: address.id,
        payment_method: payment_method.to_string(),
        invoice_code,
        status: OrderStatus::Pending,
        total_amount,
        lines: pending_lines,
    })
}

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order must contain at least one line")]
    EmptyOrder,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: Uuid, quantity: i32 },

    #[error("Shipping address {0} is not valid for this buyer")]
    AddressInvalid(Uuid),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error(
        "Insufficient stock for product '{name}' ({product_id}): available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: Uuid,
        name: String,
        available: i32,
        requested: i32,
    },

    #[error("Order amount overflows for product {0}")]
    AmountOverflow(Uuid),

    #[error("Catalog data for product {product_id} is missing its {missing}")]
    CatalogInconsistent {
        product_id: Uuid,
        missing: &'static str,
    },

    #[error("Order not found")]
    OrderNotFound,

    #[error("Order placement failed: {0}")]
    OrderPlacementFailed(#[source] PlacementFailure),

    #[error("Storage error while trying to {step}: {message}")]
    Storage { step: &'static str, message: String },
}

impl DomainError {
    pub fn storage(step: &'static str, e: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            step,
            message: e.to_string(),
        }
    }

    /// Caller input disagrees with current state; safe to echo back to the buyer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyOrder
                | DomainError::InvalidQuantity { .. }
                | DomainError::AddressInvalid(_)
                | DomainError::ProductNotFound(_)
                | DomainError::InsufficientStock { .. }
                | DomainError::AmountOverflow(_)
        )
    }
}

/// Why the atomic placement unit was rolled back.
#[derive(Debug, Error)]
pub enum PlacementFailure {
    /// The guarded decrement matched no row: stock moved (or the product
    /// disappeared) between the pre-check and the commit.
    #[error("stock for product {product_id} changed before commit (requested {requested})")]
    StockRace { product_id: Uuid, requested: i32 },

    /// The database aborted the unit to resolve a lock conflict with a
    /// concurrent placement (deadlock or serialization failure). Nothing was
    /// written; resubmitting is safe.
    #[error("concurrent placement conflict while trying to {step}: {message}")]
    Contention { step: &'static str, message: String },

    #[error("failed to {step}: {message}")]
    Storage { step: &'static str, message: String },
}

impl PlacementFailure {
    pub fn storage(step: &'static str, e: impl std::fmt::Display) -> Self {
        PlacementFailure::Storage {
            step,
            message: e.to_string(),
        }
    }
}

impl PlacementFailure {
    /// Lost to another transaction rather than broken; the caller may retry.
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(
            self,
            PlacementFailure::StockRace { .. } | PlacementFailure::Contention { .. }
        )
    }
}

impl From<PlacementFailure> for DomainError {
    fn from(e: PlacementFailure) -> Self {
        DomainError::OrderPlacementFailed(e)
    }
}

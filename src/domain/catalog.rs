use uuid::Uuid;

/// A product as the catalog currently describes it, with its associations
/// resolved. Either association may be absent when the catalog is malformed.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub description: String,
    pub store: Option<StoreRef>,
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRef {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub detail: String,
}

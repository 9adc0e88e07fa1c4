pub mod address_repo;
pub mod catalog_repo;
pub mod inventory;
pub mod models;
pub mod order_repo;

#[cfg(test)]
pub(crate) mod test_support;

pub use address_repo::DieselAddressDirectory;
pub use catalog_repo::DieselCatalogReader;
pub use order_repo::DieselOrderRepository;

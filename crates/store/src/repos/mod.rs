//! Repositories over the document store.
//!
//! Each repository borrows a store handle and owns the mapping between raw
//! documents and the typed records in [`crate::models`]. Decoding failures
//! surface as `StoreError::DataCorruption` naming the offending path.

pub mod admins;
pub mod cakes;
pub mod orders;
pub mod settings;
pub mod shops;
pub mod toppings;

pub use admins::AdminRepo;
pub use cakes::CakeRepo;
pub use orders::OrderRepo;
pub use settings::SettingsRepo;
pub use shops::ShopRepo;
pub use toppings::ToppingRepo;

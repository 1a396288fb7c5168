//! Typed document records.
//!
//! Records mirror the camelCase field names the hosted store uses
//! (`tierPricing`, `basePrice`, `assignedShops`, ...). Validation into core
//! types happens here, at the store boundary, so domain logic never touches
//! loosely-shaped JSON.

pub mod admin;
pub mod cake;
pub mod order;
pub mod settings;
pub mod shop;
pub mod topping;

pub use admin::{Admin, AdminDoc};
pub use cake::{Cake, CakeDoc};
pub use order::{Order, OrderDoc, OrderLineDoc};
pub use settings::SettingsDoc;
pub use shop::{Shop, ShopDoc};
pub use topping::{Topping, ToppingDoc};

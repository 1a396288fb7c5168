//! Shared domain types.

pub mod id;
pub mod money;
pub mod status;

pub use id::{AdminUid, CakeId, OrderId, ShopId, ShopIdError, TierId, TierIdError, ToppingId};
pub use money::{Money, MoneyError};
pub use status::OrderStatus;

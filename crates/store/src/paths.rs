//! Typed path constructors for the platform's document layout.

use cakestack_core::{AdminUid, CakeId, OrderId, ShopId, ToppingId};

use crate::store::{CollectionPath, DocumentPath};

/// `shops`
#[must_use]
pub fn shops() -> CollectionPath {
    CollectionPath::root("shops")
}

/// `shops/{shopId}`
#[must_use]
pub fn shop(shop_id: &ShopId) -> DocumentPath {
    shops().doc(shop_id.as_str())
}

/// `shops/{shopId}/cakes`
#[must_use]
pub fn cakes(shop_id: &ShopId) -> CollectionPath {
    shop(shop_id).collection("cakes")
}

/// `shops/{shopId}/cakes/{cakeId}`
#[must_use]
pub fn cake(shop_id: &ShopId, cake_id: &CakeId) -> DocumentPath {
    cakes(shop_id).doc(cake_id.as_str())
}

/// `shops/{shopId}/toppings`
#[must_use]
pub fn toppings(shop_id: &ShopId) -> CollectionPath {
    shop(shop_id).collection("toppings")
}

/// `shops/{shopId}/toppings/{toppingId}`
#[must_use]
pub fn topping(shop_id: &ShopId, topping_id: &ToppingId) -> DocumentPath {
    toppings(shop_id).doc(topping_id.as_str())
}

/// `shops/{shopId}/orders`
#[must_use]
pub fn orders(shop_id: &ShopId) -> CollectionPath {
    shop(shop_id).collection("orders")
}

/// `shops/{shopId}/orders/{orderId}`
#[must_use]
pub fn order(shop_id: &ShopId, order_id: &OrderId) -> DocumentPath {
    orders(shop_id).doc(order_id.as_str())
}

/// `shops/{shopId}/settings/general`
#[must_use]
pub fn settings(shop_id: &ShopId) -> DocumentPath {
    shop(shop_id).collection("settings").doc("general")
}

/// `admins`
#[must_use]
pub fn admins() -> CollectionPath {
    CollectionPath::root("admins")
}

/// `admins/{uid}`
#[must_use]
pub fn admin(uid: &AdminUid) -> DocumentPath {
    admins().doc(uid.as_str())
}

//! Shop/tenant resolution from request paths.
//!
//! Storefront routes carry the tenant in the path: `/shop/:shopId/...`.
//! Platform routes (`/admin/...`, `/onboarding`, `/health`) are
//! shop-agnostic and resolve to `None`. Resolution is pure string parsing;
//! a path that does not match the expected shape yields `None` rather than
//! a guess.
//!
//! A resolved shop ID is opaque: nothing here (or downstream) assumes the
//! shop exists until a store lookup confirms it. A missing shop is a
//! data-layer `NotFound`, never a resolver error.

use crate::types::ShopId;

/// Extract the active shop ID from a request path.
///
/// Returns `Some` only for paths of the shape `/shop/{slug}` or
/// `/shop/{slug}/...` with a valid slug.
#[must_use]
pub fn resolve_shop(path: &str) -> Option<ShopId> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.next() != Some("shop") {
        return None;
    }
    let slug = segments.next()?;
    ShopId::parse(slug).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_shop_scoped_paths() {
        for path in [
            "/shop/sweet-treats",
            "/shop/sweet-treats/",
            "/shop/sweet-treats/cakes",
            "/shop/sweet-treats/cake/cake1",
            "/shop/sweet-treats/checkout",
            "/shop/sweet-treats/track/order9",
        ] {
            assert_eq!(
                resolve_shop(path),
                Some(ShopId::parse("sweet-treats").expect("valid slug")),
                "{path}"
            );
        }
    }

    #[test]
    fn shop_agnostic_paths_resolve_to_none() {
        for path in [
            "/",
            "/shops",
            "/admin/login",
            "/admin/dashboard",
            "/onboarding",
            "/health",
        ] {
            assert_eq!(resolve_shop(path), None, "{path}");
        }
    }

    #[test]
    fn malformed_shapes_are_not_guessed() {
        assert_eq!(resolve_shop("/shop"), None);
        assert_eq!(resolve_shop("/shop/"), None);
        assert_eq!(resolve_shop("/shop//cakes"), None);
        assert_eq!(resolve_shop("/shop/Bad Slug"), None);
        assert_eq!(resolve_shop("/shop/evil.host"), None);
        assert_eq!(resolve_shop("/shopping/sweet-treats"), None);
    }
}

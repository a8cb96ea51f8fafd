//! Entity descriptors.
//!
//! A [`ResourceKind`] carries everything the generic list, form and API
//! machinery needs to know about one entity type: its URL path segment, the
//! name of its id parameter, display labels, the field list search runs on,
//! and the fixed messages shown after writes and on delete conflicts.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message shown when a store still has categories or products.
pub const STORE_CONFLICT_MESSAGE: &str = "Make sure you removed all products and categories first.";

/// Generic failure notice.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// Per-store entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Billboards,
    Categories,
    Sizes,
    Colors,
    Products,
    Orders,
}

impl ResourceKind {
    /// Every kind, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::Billboards,
        Self::Categories,
        Self::Sizes,
        Self::Colors,
        Self::Products,
        Self::Orders,
    ];

    /// URL path segment (`billboards`).
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Billboards => "billboards",
            Self::Categories => "categories",
            Self::Sizes => "sizes",
            Self::Colors => "colors",
            Self::Products => "products",
            Self::Orders => "orders",
        }
    }

    /// Name of the id route parameter (`billboardId`).
    #[must_use]
    pub const fn id_param(self) -> &'static str {
        match self {
            Self::Billboards => "billboardId",
            Self::Categories => "categoryId",
            Self::Sizes => "sizeId",
            Self::Colors => "colorId",
            Self::Products => "productId",
            Self::Orders => "orderId",
        }
    }

    /// Lowercase singular noun (`billboard`).
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Billboards => "billboard",
            Self::Categories => "category",
            Self::Sizes => "size",
            Self::Colors => "color",
            Self::Products => "product",
            Self::Orders => "order",
        }
    }

    /// Capitalized singular noun (`Billboard`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Billboards => "Billboard",
            Self::Categories => "Category",
            Self::Sizes => "Size",
            Self::Colors => "Color",
            Self::Products => "Product",
            Self::Orders => "Order",
        }
    }

    /// Capitalized plural noun (`Billboards`).
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Billboards => "Billboards",
            Self::Categories => "Categories",
            Self::Sizes => "Sizes",
            Self::Colors => "Colors",
            Self::Products => "Products",
            Self::Orders => "Orders",
        }
    }

    /// Column the list search filters on.
    #[must_use]
    pub const fn search_key(self) -> &'static str {
        match self {
            Self::Billboards => "label",
            Self::Orders => "products",
            Self::Categories | Self::Sizes | Self::Colors | Self::Products => "name",
        }
    }

    /// Subtitle of the list page.
    #[must_use]
    pub fn description(self) -> String {
        format!("Manage {} for your store", self.path())
    }

    /// Orders are written by the storefront checkout, never by the dashboard.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Orders)
    }

    /// Message shown when a delete is rejected because other records still
    /// reference this one.
    #[must_use]
    pub fn conflict_message(self) -> String {
        match self {
            Self::Billboards => format!(
                "Please ensure that all categories associated with this {} are removed before proceeding.",
                self.singular()
            ),
            Self::Categories | Self::Sizes | Self::Colors => format!(
                "Please ensure that all products associated with this {} are removed before proceeding.",
                self.singular()
            ),
            Self::Products | Self::Orders => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Notice shown after a successful create.
    #[must_use]
    pub fn created_message(self) -> String {
        format!("{} created", self.label())
    }

    /// Notice shown after a successful update.
    #[must_use]
    pub fn updated_message(self) -> String {
        format!("{} updated", self.label())
    }

    /// Notice shown after a successful delete.
    #[must_use]
    pub fn deleted_message(self) -> String {
        format!("{} deleted.", self.label())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned for an unknown resource path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown resource `{0}`")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| UnknownResource(s.to_owned()))
    }
}

/// Who may call an API route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiAccess {
    /// Anyone; used by storefronts.
    Public,
    /// The store owner only.
    Admin,
}

impl ApiAccess {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Admin => "Admin",
        }
    }
}

/// One row of the API documentation block on list pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRoute {
    pub method: &'static str,
    pub url: String,
    pub access: ApiAccess,
}

/// Routes a storefront can call for `kind` in `store_id`'s store.
///
/// `base_url` is the public origin of the dashboard. Read-only kinds list
/// no routes.
#[must_use]
pub fn api_routes(base_url: &str, store_id: &str, kind: ResourceKind) -> Vec<ApiRoute> {
    if kind.is_read_only() {
        return Vec::new();
    }

    let collection = format!(
        "{}/api/{store_id}/{}",
        base_url.trim_end_matches('/'),
        kind.path()
    );
    let item = format!("{collection}/{{{}}}", kind.id_param());

    let route = |method, url: &String, access| ApiRoute {
        method,
        url: url.clone(),
        access,
    };

    vec![
        route("GET", &collection, ApiAccess::Public),
        route("GET", &item, ApiAccess::Public),
        route("POST", &collection, ApiAccess::Admin),
        route("PATCH", &item, ApiAccess::Admin),
        route("DELETE", &item, ApiAccess::Admin),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            ResourceKind::Billboards.conflict_message(),
            "Please ensure that all categories associated with this billboard are removed before proceeding."
        );
        assert_eq!(
            ResourceKind::Sizes.conflict_message(),
            "Please ensure that all products associated with this size are removed before proceeding."
        );
        assert_eq!(
            ResourceKind::Products.conflict_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_toast_messages() {
        assert_eq!(ResourceKind::Billboards.created_message(), "Billboard created");
        assert_eq!(ResourceKind::Colors.updated_message(), "Color updated");
        assert_eq!(ResourceKind::Categories.deleted_message(), "Category deleted.");
    }

    #[test]
    fn test_path_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.path().parse::<ResourceKind>(), Ok(kind));
        }
        assert!("stores".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_api_routes() {
        let routes = api_routes("https://dash.example/", "s1", ResourceKind::Billboards);
        assert_eq!(routes.len(), 5);
        assert_eq!(routes[0].url, "https://dash.example/api/s1/billboards");
        assert_eq!(routes[0].access, ApiAccess::Public);
        assert_eq!(
            routes[1].url,
            "https://dash.example/api/s1/billboards/{billboardId}"
        );
        assert_eq!(routes[4].method, "DELETE");
        assert_eq!(routes[4].access, ApiAccess::Admin);
    }

    #[test]
    fn test_orders_have_no_api_block() {
        assert!(api_routes("https://dash.example", "s1", ResourceKind::Orders).is_empty());
        assert!(ResourceKind::Orders.is_read_only());
        assert_eq!(ResourceKind::Orders.search_key(), "products");
    }
}

//! Typed endpoint descriptors.
//!
//! Each marker type ties a [`ResourceKind`] to its id, entity and payload
//! types so [`crate::DashboardClient`] calls are checked at compile time.

use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};
use storedash_core::{
    Billboard, BillboardId, BillboardInput, Category, CategoryId, CategoryInput, Color, ColorId,
    ColorInput, Order, OrderId, Product, ProductId, ProductInput, ResourceKind, Size, SizeId,
    SizeInput, Validate,
};

/// A readable per-store collection.
pub trait Endpoint {
    const KIND: ResourceKind;
    type Id: Display + Send + Sync;
    type Entity: DeserializeOwned;
}

/// A collection that also accepts writes.
pub trait WritableEndpoint: Endpoint {
    type Input: Validate + Serialize + Sync;
}

macro_rules! endpoint {
    ($name:ident, $kind:ident, $id:ty, $entity:ty) => {
        #[doc = concat!("`/api/{store_id}/", stringify!($name), "` marker.")]
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Endpoint for $name {
            const KIND: ResourceKind = ResourceKind::$kind;
            type Id = $id;
            type Entity = $entity;
        }
    };
    ($name:ident, $kind:ident, $id:ty, $entity:ty, $input:ty) => {
        endpoint!($name, $kind, $id, $entity);

        impl WritableEndpoint for $name {
            type Input = $input;
        }
    };
}

endpoint!(Billboards, Billboards, BillboardId, Billboard, BillboardInput);
endpoint!(Categories, Categories, CategoryId, Category, CategoryInput);
endpoint!(Sizes, Sizes, SizeId, Size, SizeInput);
endpoint!(Colors, Colors, ColorId, Color, ColorInput);
endpoint!(Products, Products, ProductId, Product, ProductInput);
endpoint!(Orders, Orders, OrderId, Order);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_kinds() {
        assert_eq!(Billboards::KIND.path(), "billboards");
        assert_eq!(Categories::KIND.path(), "categories");
        assert_eq!(Orders::KIND, ResourceKind::Orders);
    }
}

//! Persisted records, as returned by the REST API.
//!
//! All records serialize with camelCase field names. Every record except
//! [`Store`] carries the id of the store that owns it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    BillboardId, CategoryId, ColorId, ImageId, OrderId, OrderItemId, OwnerId, Price, ProductId,
    SizeId, StoreId,
};

/// A tenant: one owner's shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub owner_id: OwnerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A hero banner shown at the top of category pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product category, displayed with its billboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    /// Label of the referenced billboard, for display.
    pub billboard_label: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product color. `value` is a hex color such as `#ff0000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product image. Images belong to exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub size_id: SizeId,
    pub size_name: String,
    pub color_id: ColorId,
    pub color_value: String,
    pub name: String,
    pub price: Price,
    pub is_featured: bool,
    pub is_archived: bool,
    /// Images in display order.
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
}

/// A customer order. Orders are created by the storefront checkout and are
/// read-only in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Comma-separated product names, the field order search runs on.
    #[must_use]
    pub fn products_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Sum of item prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price.amount()).sum()
    }

    /// Total formatted for display (e.g. `"$29.98"`).
    #[must_use]
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cents: i64) -> OrderItem {
        OrderItem {
            id: OrderItemId::generate(),
            product_id: ProductId::generate(),
            product_name: name.to_string(),
            price: Price::from_trusted(Decimal::new(cents, 2)),
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId::generate(),
            store_id: StoreId::generate(),
            is_paid: true,
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            items,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_order_summary_and_total() {
        let order = order(vec![item("Tee", 1999), item("Cap", 999)]);
        assert_eq!(order.products_summary(), "Tee, Cap");
        assert_eq!(order.total(), Decimal::new(2998, 2));
        assert_eq!(order.total_display(), "$29.98");
    }

    #[test]
    fn test_empty_order() {
        let order = order(Vec::new());
        assert_eq!(order.products_summary(), "");
        assert_eq!(order.total_display(), "$0.00");
    }

    #[test]
    fn test_camel_case_json() {
        let now = Utc::now();
        let billboard = Billboard {
            id: BillboardId::generate(),
            store_id: StoreId::generate(),
            label: "Summer".to_string(),
            image_url: "https://img.example/summer.png".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&billboard).expect("serializable");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("storeId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}

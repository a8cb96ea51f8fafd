//! Write payloads and their validated forms.
//!
//! Raw inputs mirror what a client submits (camelCase JSON or form fields,
//! every field optional so that a missing value becomes a field error rather
//! than a parse error). Validating an input yields the matching `New*` value,
//! which is the only thing repositories accept.

use serde::{Deserialize, Serialize};

use crate::entities::{Billboard, Category, Color, Product, Size, Store};
use crate::types::{BillboardId, CategoryId, ColorId, HexColor, Price, SizeId};
use crate::validation::{
    Constraint, FieldSpec, NumberInput, Validate, ValidationErrors, Validator,
};

const NAME_MESSAGE: &str = "Name must be at least 1 character long";

const fn name_field() -> FieldSpec {
    FieldSpec::new("name", "Name", Constraint::MinLength(1), NAME_MESSAGE)
}

// =============================================================================
// Store
// =============================================================================

/// Store create/rename payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreInput {
    pub name: String,
}

/// A validated store name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub name: String,
}

impl StoreInput {
    const NAME: FieldSpec =
        FieldSpec::new("name", "Name", Constraint::MinLength(1), "Name is required");

    /// Create a payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for StoreInput {
    type Valid = NewStore;

    fn schema() -> &'static [FieldSpec] {
        &[Self::NAME]
    }

    fn validate(&self) -> Result<NewStore, ValidationErrors> {
        let mut v = Validator::new();
        let Some(name) = v.text(&Self::NAME, &self.name) else {
            return Err(v.into_errors());
        };
        Ok(NewStore { name })
    }
}

impl From<&Store> for StoreInput {
    fn from(store: &Store) -> Self {
        Self::new(store.name.clone())
    }
}

// =============================================================================
// Billboard
// =============================================================================

/// Billboard payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

/// A validated billboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillboard {
    pub label: String,
    pub image_url: String,
}

impl BillboardInput {
    const LABEL: FieldSpec = FieldSpec::new(
        "label",
        "Label",
        Constraint::MinLength(1),
        "Label must be at least 1 character long",
    );
    const IMAGE_URL: FieldSpec = FieldSpec::new(
        "imageUrl",
        "Background image",
        Constraint::MinLength(1),
        "You should provide an image",
    );

    /// Create a payload.
    #[must_use]
    pub fn new(label: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image_url: image_url.into(),
        }
    }
}

impl Validate for BillboardInput {
    type Valid = NewBillboard;

    fn schema() -> &'static [FieldSpec] {
        &[Self::LABEL, Self::IMAGE_URL]
    }

    fn validate(&self) -> Result<NewBillboard, ValidationErrors> {
        let mut v = Validator::new();
        let label = v.text(&Self::LABEL, &self.label);
        let image_url = v.text(&Self::IMAGE_URL, &self.image_url);
        let (Some(label), Some(image_url)) = (label, image_url) else {
            return Err(v.into_errors());
        };
        Ok(NewBillboard { label, image_url })
    }
}

impl From<&Billboard> for BillboardInput {
    fn from(billboard: &Billboard) -> Self {
        Self::new(billboard.label.clone(), billboard.image_url.clone())
    }
}

// =============================================================================
// Category
// =============================================================================

/// Category payload. `billboard_id` stays a string until validated so that a
/// blank selection is reported as a field error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryInput {
    pub name: String,
    pub billboard_id: String,
}

/// A validated category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub billboard_id: BillboardId,
}

impl CategoryInput {
    const NAME: FieldSpec = name_field();
    const BILLBOARD_ID: FieldSpec = FieldSpec::new(
        "billboardId",
        "Billboard",
        Constraint::Reference,
        "Billboard is required",
    );

    /// Create a payload referencing `billboard_id`.
    #[must_use]
    pub fn new(name: impl Into<String>, billboard_id: BillboardId) -> Self {
        Self {
            name: name.into(),
            billboard_id: billboard_id.to_string(),
        }
    }
}

impl Validate for CategoryInput {
    type Valid = NewCategory;

    fn schema() -> &'static [FieldSpec] {
        &[Self::NAME, Self::BILLBOARD_ID]
    }

    fn validate(&self) -> Result<NewCategory, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.text(&Self::NAME, &self.name);
        let billboard_id = v.reference(&Self::BILLBOARD_ID, &self.billboard_id);
        let (Some(name), Some(billboard_id)) = (name, billboard_id) else {
            return Err(v.into_errors());
        };
        Ok(NewCategory { name, billboard_id })
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self::new(category.name.clone(), category.billboard_id)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Size payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

/// A validated size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSize {
    pub name: String,
    pub value: String,
}

impl SizeInput {
    const NAME: FieldSpec = name_field();
    const VALUE: FieldSpec = FieldSpec::new(
        "value",
        "Value",
        Constraint::MinLength(1),
        "You should provide a value",
    );

    /// Create a payload.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Validate for SizeInput {
    type Valid = NewSize;

    fn schema() -> &'static [FieldSpec] {
        &[Self::NAME, Self::VALUE]
    }

    fn validate(&self) -> Result<NewSize, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.text(&Self::NAME, &self.name);
        let value = v.text(&Self::VALUE, &self.value);
        let (Some(name), Some(value)) = (name, value) else {
            return Err(v.into_errors());
        };
        Ok(NewSize { name, value })
    }
}

impl From<&Size> for SizeInput {
    fn from(size: &Size) -> Self {
        Self::new(size.name.clone(), size.value.clone())
    }
}

// =============================================================================
// Color
// =============================================================================

/// Color payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorInput {
    pub name: String,
    pub value: String,
}

/// A validated color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColor {
    pub name: String,
    pub value: HexColor,
}

impl ColorInput {
    const NAME: FieldSpec = name_field();
    const VALUE: FieldSpec = FieldSpec::new(
        "value",
        "Value",
        Constraint::HexColor,
        "String must be a valid hex code",
    );

    /// Create a payload.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Validate for ColorInput {
    type Valid = NewColor;

    fn schema() -> &'static [FieldSpec] {
        &[Self::NAME, Self::VALUE]
    }

    fn validate(&self) -> Result<NewColor, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.text(&Self::NAME, &self.name);
        let value = v
            .text(&Self::VALUE, &self.value)
            .and_then(|s| HexColor::parse(&s).ok());
        let (Some(name), Some(value)) = (name, value) else {
            return Err(v.into_errors());
        };
        Ok(NewColor { name, value })
    }
}

impl From<&Color> for ColorInput {
    fn from(color: &Color) -> Self {
        Self::new(color.name.clone(), color.value.clone())
    }
}

// =============================================================================
// Product
// =============================================================================

/// One image entry of a product payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInput {
    pub url: String,
}

/// Product payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<NumberInput>,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<ImageInput>,
}

/// A validated product. `images` keeps submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<String>,
}

impl ProductInput {
    const NAME: FieldSpec = name_field();
    const IMAGES: FieldSpec = FieldSpec::new(
        "images",
        "Images",
        Constraint::NonEmptyList,
        "Please upload at least one image.",
    );
    const PRICE: FieldSpec = FieldSpec::new(
        "price",
        "Price",
        Constraint::MinNumber(1),
        "Price must be at least 1",
    );
    const CATEGORY_ID: FieldSpec = FieldSpec::new(
        "categoryId",
        "Category",
        Constraint::Reference,
        "Category is required",
    );
    const SIZE_ID: FieldSpec = FieldSpec::new(
        "sizeId",
        "Size",
        Constraint::Reference,
        "Size is required",
    );
    const COLOR_ID: FieldSpec = FieldSpec::new(
        "colorId",
        "Color",
        Constraint::Reference,
        "Color is required",
    );
    const IS_FEATURED: FieldSpec = FieldSpec::new(
        "isFeatured",
        "Featured",
        Constraint::Flag,
        "This product will appear on the home page",
    );
    const IS_ARCHIVED: FieldSpec = FieldSpec::new(
        "isArchived",
        "Archived",
        Constraint::Flag,
        "This product will not appear anywhere in the store",
    );

    /// Image URLs with blank entries removed, in submission order.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| image.url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl Validate for ProductInput {
    type Valid = NewProduct;

    fn schema() -> &'static [FieldSpec] {
        &[
            Self::NAME,
            Self::IMAGES,
            Self::PRICE,
            Self::CATEGORY_ID,
            Self::SIZE_ID,
            Self::COLOR_ID,
            Self::IS_FEATURED,
            Self::IS_ARCHIVED,
        ]
    }

    fn validate(&self) -> Result<NewProduct, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.text(&Self::NAME, &self.name);
        let images = self.image_urls();
        v.non_empty(&Self::IMAGES, &images);
        let price = v.price(&Self::PRICE, self.price.as_ref());
        let category_id = v.reference(&Self::CATEGORY_ID, &self.category_id);
        let size_id = v.reference(&Self::SIZE_ID, &self.size_id);
        let color_id = v.reference(&Self::COLOR_ID, &self.color_id);

        let (Some(name), Some(price), Some(category_id), Some(size_id), Some(color_id), true) =
            (name, price, category_id, size_id, color_id, v.is_ok())
        else {
            return Err(v.into_errors());
        };

        Ok(NewProduct {
            name,
            price,
            category_id,
            size_id,
            color_id,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            images,
        })
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: Some(NumberInput::from(product.price.amount())),
            category_id: product.category_id.to_string(),
            size_id: product.size_id.to_string(),
            color_id: product.color_id.to_string(),
            is_featured: product.is_featured,
            is_archived: product.is_archived,
            images: product
                .images
                .iter()
                .map(|image| ImageInput {
                    url: image.url.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product_input() -> ProductInput {
        ProductInput {
            name: "Tee".to_string(),
            price: Some(NumberInput::Number(19.5)),
            category_id: CategoryId::generate().to_string(),
            size_id: SizeId::generate().to_string(),
            color_id: ColorId::generate().to_string(),
            is_featured: true,
            is_archived: false,
            images: vec![ImageInput {
                url: "https://img.example/tee.png".to_string(),
            }],
        }
    }

    #[test]
    fn test_store_requires_name() {
        let errors = StoreInput::new("  ").validate().expect_err("blank name");
        assert_eq!(errors.for_field("name"), Some("Name is required"));
        assert_eq!(
            StoreInput::new(" Shop ").validate().expect("valid").name,
            "Shop"
        );
    }

    #[test]
    fn test_billboard_reports_every_field() {
        let errors = BillboardInput::default().validate().expect_err("empty");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field("label"),
            Some("Label must be at least 1 character long")
        );
        assert_eq!(
            errors.for_field("imageUrl"),
            Some("You should provide an image")
        );
    }

    #[test]
    fn test_category_requires_billboard() {
        let input = CategoryInput {
            name: "Shirts".to_string(),
            billboard_id: String::new(),
        };
        let errors = input.validate().expect_err("missing billboard");
        assert_eq!(errors.for_field("billboardId"), Some("Billboard is required"));

        let billboard_id = BillboardId::generate();
        let valid = CategoryInput::new("Shirts", billboard_id)
            .validate()
            .expect("valid");
        assert_eq!(valid.billboard_id, billboard_id);
    }

    #[test]
    fn test_color_value_must_be_hex() {
        let errors = ColorInput::new("Red", "red").validate().expect_err("not hex");
        assert_eq!(
            errors.for_field("value"),
            Some("String must be a valid hex code")
        );
        let valid = ColorInput::new("Red", "#ff0000").validate().expect("hex");
        assert_eq!(valid.value.as_str(), "#ff0000");
    }

    #[test]
    fn test_size_requires_value() {
        let errors = SizeInput::new("Large", "").validate().expect_err("no value");
        assert_eq!(errors.for_field("value"), Some("You should provide a value"));
    }

    #[test]
    fn test_product_valid() {
        let valid = product_input().validate().expect("valid product");
        assert_eq!(valid.price.amount(), Decimal::new(195, 1));
        assert_eq!(valid.images, vec!["https://img.example/tee.png".to_string()]);
        assert!(valid.is_featured);
    }

    #[test]
    fn test_product_requires_images_price_and_references() {
        let input = ProductInput {
            name: "Tee".to_string(),
            price: Some(NumberInput::Number(0.0)),
            images: vec![ImageInput {
                url: "   ".to_string(),
            }],
            ..ProductInput::default()
        };
        let errors = input.validate().expect_err("invalid product");
        assert_eq!(
            errors.for_field("images"),
            Some("Please upload at least one image.")
        );
        assert_eq!(errors.for_field("price"), Some("Price must be at least 1"));
        assert_eq!(errors.for_field("categoryId"), Some("Category is required"));
        assert_eq!(errors.for_field("sizeId"), Some("Size is required"));
        assert_eq!(errors.for_field("colorId"), Some("Color is required"));
        assert_eq!(errors.for_field("name"), None);
    }

    #[test]
    fn test_product_price_must_fit_in_cents() {
        let too_large = ProductInput {
            price: Some(NumberInput::Number(1e11)),
            ..product_input()
        };
        let errors = too_large.validate().expect_err("price overflows");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("price"),
            Some("Price must be less than 10000000000")
        );

        let sub_cent = ProductInput {
            price: Some(NumberInput::Text("1.999".to_string())),
            ..product_input()
        };
        let errors = sub_cent.validate().expect_err("sub-cent price");
        assert_eq!(
            errors.for_field("price"),
            Some("Price can have at most 2 decimal places")
        );
    }

    #[test]
    fn test_product_flags_default_false() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Tee"}"#).expect("json");
        assert!(!input.is_featured);
        assert!(!input.is_archived);
        assert!(input.price.is_none());
    }

    #[test]
    fn test_product_schema_order() {
        let names: Vec<&str> = ProductInput::schema().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "name",
                "images",
                "price",
                "categoryId",
                "sizeId",
                "colorId",
                "isFeatured",
                "isArchived"
            ]
        );
    }
}

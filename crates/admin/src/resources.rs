//! Per-entity wiring of the generic CRUD screens and API.
//!
//! Handlers in `routes` are written once, generically over [`Resource`]
//! (list and read) and [`EditableResource`] (forms and writes). Each entity
//! is a zero-sized marker type implementing those traits on top of its
//! repository.

use std::fmt::Display;
use std::future::Future;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;

use storedash_core::{
    Billboard, BillboardId, BillboardInput, Category, CategoryId, CategoryInput, Color, ColorId,
    ColorInput, ImageInput, NewBillboard, NewCategory, NewColor, NewProduct, NewSize,
    NumberInput, Order, OrderId, Product, ProductId, ProductInput, ResourceKind, Size, SizeId,
    SizeInput, StoreId, Validate,
};

use crate::components::data_table::long_date;
use crate::components::{FormData, FormField, SelectOption, TableCell, TableColumn, TableRow};
use crate::db::{
    BillboardRepository, CategoryRepository, ColorRepository, OrderRepository, ProductFilter,
    ProductRepository, RepositoryError, SizeRepository,
};

/// Validated payload of an editable resource.
pub type Valid<R> = <<R as EditableResource>::Input as Validate>::Valid;

/// A per-store entity that can be listed and read.
pub trait Resource: Send + Sync + Sized + 'static {
    const KIND: ResourceKind;

    type Id: FromStr + Display + Copy + Send + Sync + 'static;
    type Entity: Serialize + Send + Sync + 'static;

    /// Everything in the store, newest first.
    fn list(
        pool: &PgPool,
        store_id: StoreId,
    ) -> impl Future<Output = Result<Vec<Self::Entity>, RepositoryError>> + Send;

    fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
    ) -> impl Future<Output = Result<Option<Self::Entity>, RepositoryError>> + Send;

    fn id_of(entity: &Self::Entity) -> Self::Id;

    /// Value of the search column; also names the entity in confirmations.
    fn display(entity: &Self::Entity) -> String;

    fn columns() -> Vec<TableColumn>;

    fn cells(entity: &Self::Entity) -> Vec<TableCell>;

    fn row(entity: &Self::Entity) -> TableRow {
        TableRow {
            id: Self::id_of(entity).to_string(),
            search: Self::display(entity),
            cells: Self::cells(entity),
        }
    }
}

/// A resource with forms and write operations.
pub trait EditableResource: Resource {
    type Input: Validate<Valid: Send + Sync> + DeserializeOwned + Default + Send + Sync + 'static;

    /// Form values of a persisted entity.
    fn input_of(entity: &Self::Entity) -> Self::Input;

    /// Parse a submitted HTML form.
    fn from_form(data: &FormData) -> Self::Input;

    /// Form fields in schema order.
    fn fields(input: &Self::Input, choices: &Choices) -> Vec<FormField>;

    fn create(
        pool: &PgPool,
        store_id: StoreId,
        input: &Valid<Self>,
    ) -> impl Future<Output = Result<Self::Entity, RepositoryError>> + Send;

    fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
        input: &Valid<Self>,
    ) -> impl Future<Output = Result<Self::Entity, RepositoryError>> + Send;

    fn delete(
        pool: &PgPool,
        store_id: StoreId,
        id: Self::Id,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Options for the reference selects of a form.
#[derive(Debug, Clone, Default)]
pub struct Choices {
    pub billboards: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    pub colors: Vec<SelectOption>,
}

impl Choices {
    /// Load the options the form of `kind` needs, and nothing else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn load(
        pool: &PgPool,
        store_id: StoreId,
        kind: ResourceKind,
    ) -> Result<Self, RepositoryError> {
        let mut choices = Self::default();
        match kind {
            ResourceKind::Categories => {
                choices.billboards = BillboardRepository::new(pool)
                    .list(store_id)
                    .await?
                    .iter()
                    .map(|b| SelectOption::new(b.id.to_string(), &b.label))
                    .collect();
            }
            ResourceKind::Products => {
                choices.categories = CategoryRepository::new(pool)
                    .list(store_id)
                    .await?
                    .iter()
                    .map(|c| SelectOption::new(c.id.to_string(), &c.name))
                    .collect();
                choices.sizes = SizeRepository::new(pool)
                    .list(store_id)
                    .await?
                    .iter()
                    .map(|s| SelectOption::new(s.id.to_string(), &s.name))
                    .collect();
                choices.colors = ColorRepository::new(pool)
                    .list(store_id)
                    .await?
                    .iter()
                    .map(|c| SelectOption::new(c.id.to_string(), &c.name))
                    .collect();
            }
            _ => {}
        }
        Ok(choices)
    }
}

fn created(at: &chrono::DateTime<chrono::Utc>) -> TableCell {
    TableCell::text(long_date(at))
}

const DATE: TableColumn = TableColumn::new("createdAt", "Date");

// =============================================================================
// Billboards
// =============================================================================

pub struct Billboards;

impl Resource for Billboards {
    const KIND: ResourceKind = ResourceKind::Billboards;
    type Id = BillboardId;
    type Entity = Billboard;

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        BillboardRepository::new(pool).list(store_id).await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        BillboardRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Billboard) -> BillboardId {
        entity.id
    }

    fn display(entity: &Billboard) -> String {
        entity.label.clone()
    }

    fn columns() -> Vec<TableColumn> {
        vec![TableColumn::new("label", "Label"), DATE]
    }

    fn cells(entity: &Billboard) -> Vec<TableCell> {
        vec![TableCell::text(&entity.label), created(&entity.created_at)]
    }
}

impl EditableResource for Billboards {
    type Input = BillboardInput;

    fn input_of(entity: &Billboard) -> BillboardInput {
        entity.into()
    }

    fn from_form(data: &FormData) -> BillboardInput {
        BillboardInput::new(data.text("label"), data.text("imageUrl"))
    }

    fn fields(input: &BillboardInput, _choices: &Choices) -> Vec<FormField> {
        BillboardInput::schema()
            .iter()
            .map(|spec| match spec.name {
                "imageUrl" => FormField::url(spec, &input.image_url),
                _ => FormField::text(spec, &input.label),
            })
            .collect()
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        input: &NewBillboard,
    ) -> Result<Billboard, RepositoryError> {
        BillboardRepository::new(pool).create(store_id, input).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: BillboardId,
        input: &NewBillboard,
    ) -> Result<Billboard, RepositoryError> {
        BillboardRepository::new(pool).update(store_id, id, input).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: BillboardId) -> Result<(), RepositoryError> {
        BillboardRepository::new(pool).delete(store_id, id).await
    }
}

// =============================================================================
// Categories
// =============================================================================

pub struct Categories;

impl Resource for Categories {
    const KIND: ResourceKind = ResourceKind::Categories;
    type Id = CategoryId;
    type Entity = Category;

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        CategoryRepository::new(pool).list(store_id).await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        CategoryRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Category) -> CategoryId {
        entity.id
    }

    fn display(entity: &Category) -> String {
        entity.name.clone()
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("billboard", "Billboard"),
            DATE,
        ]
    }

    fn cells(entity: &Category) -> Vec<TableCell> {
        vec![
            TableCell::text(&entity.name),
            TableCell::text(&entity.billboard_label),
            created(&entity.created_at),
        ]
    }
}

impl EditableResource for Categories {
    type Input = CategoryInput;

    fn input_of(entity: &Category) -> CategoryInput {
        entity.into()
    }

    fn from_form(data: &FormData) -> CategoryInput {
        CategoryInput {
            name: data.text("name"),
            billboard_id: data.text("billboardId"),
        }
    }

    fn fields(input: &CategoryInput, choices: &Choices) -> Vec<FormField> {
        CategoryInput::schema()
            .iter()
            .map(|spec| match spec.name {
                "billboardId" => FormField::select(spec, &input.billboard_id, &choices.billboards),
                _ => FormField::text(spec, &input.name),
            })
            .collect()
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        input: &NewCategory,
    ) -> Result<Category, RepositoryError> {
        CategoryRepository::new(pool).create(store_id, input).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: CategoryId,
        input: &NewCategory,
    ) -> Result<Category, RepositoryError> {
        CategoryRepository::new(pool).update(store_id, id, input).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: CategoryId) -> Result<(), RepositoryError> {
        CategoryRepository::new(pool).delete(store_id, id).await
    }
}

// =============================================================================
// Sizes
// =============================================================================

pub struct Sizes;

impl Resource for Sizes {
    const KIND: ResourceKind = ResourceKind::Sizes;
    type Id = SizeId;
    type Entity = Size;

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        SizeRepository::new(pool).list(store_id).await
    }

    async fn get(pool: &PgPool, store_id: StoreId, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        SizeRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Size) -> SizeId {
        entity.id
    }

    fn display(entity: &Size) -> String {
        entity.name.clone()
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("value", "Value"),
            DATE,
        ]
    }

    fn cells(entity: &Size) -> Vec<TableCell> {
        vec![
            TableCell::text(&entity.name),
            TableCell::text(&entity.value),
            created(&entity.created_at),
        ]
    }
}

impl EditableResource for Sizes {
    type Input = SizeInput;

    fn input_of(entity: &Size) -> SizeInput {
        entity.into()
    }

    fn from_form(data: &FormData) -> SizeInput {
        SizeInput::new(data.text("name"), data.text("value"))
    }

    fn fields(input: &SizeInput, _choices: &Choices) -> Vec<FormField> {
        SizeInput::schema()
            .iter()
            .map(|spec| match spec.name {
                "value" => FormField::text(spec, &input.value),
                _ => FormField::text(spec, &input.name),
            })
            .collect()
    }

    async fn create(pool: &PgPool, store_id: StoreId, input: &NewSize) -> Result<Size, RepositoryError> {
        SizeRepository::new(pool).create(store_id, input).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: SizeId,
        input: &NewSize,
    ) -> Result<Size, RepositoryError> {
        SizeRepository::new(pool).update(store_id, id, input).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: SizeId) -> Result<(), RepositoryError> {
        SizeRepository::new(pool).delete(store_id, id).await
    }
}

// =============================================================================
// Colors
// =============================================================================

pub struct Colors;

impl Resource for Colors {
    const KIND: ResourceKind = ResourceKind::Colors;
    type Id = ColorId;
    type Entity = Color;

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        ColorRepository::new(pool).list(store_id).await
    }

    async fn get(pool: &PgPool, store_id: StoreId, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        ColorRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Color) -> ColorId {
        entity.id
    }

    fn display(entity: &Color) -> String {
        entity.name.clone()
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("value", "Value"),
            DATE,
        ]
    }

    fn cells(entity: &Color) -> Vec<TableCell> {
        vec![
            TableCell::text(&entity.name),
            TableCell::swatch(&entity.value),
            created(&entity.created_at),
        ]
    }
}

impl EditableResource for Colors {
    type Input = ColorInput;

    fn input_of(entity: &Color) -> ColorInput {
        entity.into()
    }

    fn from_form(data: &FormData) -> ColorInput {
        ColorInput::new(data.text("name"), data.text("value"))
    }

    fn fields(input: &ColorInput, _choices: &Choices) -> Vec<FormField> {
        ColorInput::schema()
            .iter()
            .map(|spec| match spec.name {
                "value" => FormField::color(spec, &input.value),
                _ => FormField::text(spec, &input.name),
            })
            .collect()
    }

    async fn create(pool: &PgPool, store_id: StoreId, input: &NewColor) -> Result<Color, RepositoryError> {
        ColorRepository::new(pool).create(store_id, input).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: ColorId,
        input: &NewColor,
    ) -> Result<Color, RepositoryError> {
        ColorRepository::new(pool).update(store_id, id, input).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: ColorId) -> Result<(), RepositoryError> {
        ColorRepository::new(pool).delete(store_id, id).await
    }
}

// =============================================================================
// Products
// =============================================================================

pub struct Products;

impl Resource for Products {
    const KIND: ResourceKind = ResourceKind::Products;
    type Id = ProductId;
    type Entity = Product;

    /// Owners see archived products too.
    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(pool)
            .list(store_id, ProductFilter::all())
            .await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Product) -> ProductId {
        entity.id
    }

    fn display(entity: &Product) -> String {
        entity.name.clone()
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("isArchived", "Archived"),
            TableColumn::new("isFeatured", "Featured"),
            TableColumn::new("price", "Price"),
            TableColumn::new("category", "Category"),
            TableColumn::new("size", "Size"),
            TableColumn::new("color", "Color"),
            DATE,
        ]
    }

    fn cells(entity: &Product) -> Vec<TableCell> {
        vec![
            TableCell::text(&entity.name),
            TableCell::flag(entity.is_archived),
            TableCell::flag(entity.is_featured),
            TableCell::text(entity.price.display()),
            TableCell::text(&entity.category_name),
            TableCell::text(&entity.size_name),
            TableCell::swatch(&entity.color_value),
            created(&entity.created_at),
        ]
    }
}

impl EditableResource for Products {
    type Input = ProductInput;

    fn input_of(entity: &Product) -> ProductInput {
        entity.into()
    }

    fn from_form(data: &FormData) -> ProductInput {
        let price = data.text("price");
        ProductInput {
            name: data.text("name"),
            price: (!price.trim().is_empty()).then_some(NumberInput::Text(price)),
            category_id: data.text("categoryId"),
            size_id: data.text("sizeId"),
            color_id: data.text("colorId"),
            is_featured: data.flag("isFeatured"),
            is_archived: data.flag("isArchived"),
            images: data
                .lines("images")
                .into_iter()
                .map(|url| ImageInput { url })
                .collect(),
        }
    }

    fn fields(input: &ProductInput, choices: &Choices) -> Vec<FormField> {
        let price = match &input.price {
            Some(NumberInput::Text(text)) => text.clone(),
            Some(NumberInput::Number(n)) => n.to_string(),
            None => String::new(),
        };

        ProductInput::schema()
            .iter()
            .map(|spec| match spec.name {
                "images" => FormField::lines(spec, &input.image_urls()),
                "price" => FormField::number(spec, &price),
                "categoryId" => FormField::select(spec, &input.category_id, &choices.categories),
                "sizeId" => FormField::select(spec, &input.size_id, &choices.sizes),
                "colorId" => FormField::select(spec, &input.color_id, &choices.colors),
                "isFeatured" => FormField::checkbox(spec, input.is_featured),
                "isArchived" => FormField::checkbox(spec, input.is_archived),
                _ => FormField::text(spec, &input.name),
            })
            .collect()
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        input: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(pool).create(store_id, input).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: ProductId,
        input: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(pool).update(store_id, id, input).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: ProductId) -> Result<(), RepositoryError> {
        ProductRepository::new(pool).delete(store_id, id).await
    }
}

// =============================================================================
// Orders (read only)
// =============================================================================

pub struct Orders;

impl Resource for Orders {
    const KIND: ResourceKind = ResourceKind::Orders;
    type Id = OrderId;
    type Entity = Order;

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(pool).list(store_id).await
    }

    async fn get(pool: &PgPool, store_id: StoreId, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        OrderRepository::new(pool).get(store_id, id).await
    }

    fn id_of(entity: &Order) -> OrderId {
        entity.id
    }

    fn display(entity: &Order) -> String {
        entity.products_summary()
    }

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("products", "Products"),
            TableColumn::new("phone", "Phone"),
            TableColumn::new("address", "Address"),
            TableColumn::new("totalPrice", "Total price"),
            TableColumn::new("isPaid", "Paid"),
            DATE,
        ]
    }

    fn cells(entity: &Order) -> Vec<TableCell> {
        vec![
            TableCell::text(entity.products_summary()),
            TableCell::text(&entity.phone),
            TableCell::text(&entity.address),
            TableCell::text(entity.total_display()),
            TableCell::flag(entity.is_paid),
            created(&entity.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use storedash_core::{FieldSpec, Image, ImageId, OrderItem, OrderItemId, Price};
    use rust_decimal::Decimal;

    use super::*;

    fn names(fields: &[FormField]) -> Vec<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    fn schema_names(schema: &[FieldSpec]) -> Vec<&'static str> {
        schema.iter().map(|s| s.name).collect()
    }

    fn data(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>(),
        )
    }

    fn product() -> Product {
        Product {
            id: ProductId::generate(),
            store_id: StoreId::generate(),
            category_id: CategoryId::generate(),
            category_name: "Shirts".to_string(),
            size_id: SizeId::generate(),
            size_name: "Large".to_string(),
            color_id: ColorId::generate(),
            color_value: "#000000".to_string(),
            name: "Black Tee".to_string(),
            price: Price::new(Decimal::new(1999, 2)).expect("price"),
            is_featured: true,
            is_archived: false,
            images: vec![Image {
                id: ImageId::generate(),
                url: "https://img.test/tee.png".to_string(),
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_forms_cover_their_schema() {
        let choices = Choices::default();
        assert_eq!(
            names(&Billboards::fields(&BillboardInput::default(), &choices)),
            schema_names(BillboardInput::schema())
        );
        assert_eq!(
            names(&Categories::fields(&CategoryInput::default(), &choices)),
            schema_names(CategoryInput::schema())
        );
        assert_eq!(
            names(&Sizes::fields(&SizeInput::default(), &choices)),
            schema_names(SizeInput::schema())
        );
        assert_eq!(
            names(&Colors::fields(&ColorInput::default(), &choices)),
            schema_names(ColorInput::schema())
        );
        assert_eq!(
            names(&Products::fields(&ProductInput::default(), &choices)),
            schema_names(ProductInput::schema())
        );
    }

    #[test]
    fn test_columns_match_cells() {
        let product = product();
        assert_eq!(Products::columns().len(), Products::cells(&product).len());
    }

    #[test]
    fn test_product_form_parses_checkboxes_and_images() {
        let input = Products::from_form(&data(&[
            ("name", "Tee"),
            ("price", "12.50"),
            ("categoryId", "c"),
            ("sizeId", "s"),
            ("colorId", "k"),
            ("isArchived", "on"),
            ("images", "https://img.test/a.png\nhttps://img.test/b.png\n"),
        ]));

        assert!(input.is_archived);
        assert!(!input.is_featured);
        assert_eq!(input.price, Some(NumberInput::Text("12.50".to_string())));
        assert_eq!(
            input.image_urls(),
            ["https://img.test/a.png", "https://img.test/b.png"]
        );
    }

    #[test]
    fn test_product_form_without_price_fails_validation() {
        let input = Products::from_form(&data(&[("name", "Tee"), ("price", " ")]));
        assert_eq!(input.price, None);
        let errors = input.validate().expect_err("incomplete product");
        assert_eq!(errors.for_field("price"), Some("Price must be at least 1"));
        assert_eq!(errors.for_field("categoryId"), Some("Category is required"));
    }

    #[test]
    fn test_edit_form_prepopulates_persisted_values() {
        let product = product();
        let choices = Choices {
            categories: vec![SelectOption::new(product.category_id.to_string(), "Shirts")],
            ..Choices::default()
        };
        let fields = Products::fields(&Products::input_of(&product), &choices);

        let name = fields.iter().find(|f| f.name == "name").expect("name field");
        assert_eq!(name.value, "Black Tee");
        let price = fields.iter().find(|f| f.name == "price").expect("price field");
        assert_eq!(price.value, "19.99");
        let category = fields.iter().find(|f| f.name == "categoryId").expect("category");
        assert!(category.options()[0].selected);
        let featured = fields.iter().find(|f| f.name == "isFeatured").expect("featured");
        assert!(featured.checked);
        let images = fields.iter().find(|f| f.name == "images").expect("images");
        assert_eq!(images.value, "https://img.test/tee.png");
    }

    #[test]
    fn test_order_row_searches_products_summary() {
        let order = Order {
            id: OrderId::generate(),
            store_id: StoreId::generate(),
            is_paid: true,
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            items: vec![OrderItem {
                id: OrderItemId::generate(),
                product_id: ProductId::generate(),
                product_name: "Black Tee".to_string(),
                price: Price::new(Decimal::new(1999, 2)).expect("price"),
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let row = Orders::row(&order);
        assert_eq!(row.search, "Black Tee");
        assert_eq!(row.cells[3].text, "$19.99");
        assert_eq!(row.cells[4].text, "Yes");
        assert_eq!(Orders::columns().len(), row.cells.len());
    }

    #[test]
    fn test_color_cell_renders_swatch() {
        let color = Color {
            id: ColorId::generate(),
            store_id: StoreId::generate(),
            name: "Red".to_string(),
            value: "#ff0000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let row = Colors::row(&color);
        assert_eq!(row.cells[1].swatch.as_deref(), Some("#ff0000"));
        assert_eq!(row.id, color.id.to_string());
    }
}

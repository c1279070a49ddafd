//! # Admin Product Form
//!
//! Draft state of the admin dashboard's product editor.
//!
//! Fields are kept as the text the admin typed; they are parsed and
//! validated only on [`ProductForm::validate`] / [`ProductForm::submit`].

use std::fmt;
use std::str::FromStr;

use shopsphere_api::StorefrontApi;
use shopsphere_core::validation::validate_new_product;
use shopsphere_core::{Money, NewProduct, Product, ValidationError};
use tracing::info;

use crate::error::{AppError, AppResult};

/// An editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Price,
    ImageUrl,
    Stock,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Category,
        FormField::Price,
        FormField::ImageUrl,
        FormField::Stock,
    ];
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Name => "name",
            FormField::Category => "category",
            FormField::Price => "price",
            FormField::ImageUrl => "image",
            FormField::Stock => "stock",
        };
        f.pad(name)
    }
}

impl FromStr for FormField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "category" => Ok(FormField::Category),
            "price" => Ok(FormField::Price),
            "image" | "image_url" | "imageurl" => Ok(FormField::ImageUrl),
            "stock" => Ok(FormField::Stock),
            other => Err(AppError::invalid_command(format!(
                "unknown field '{}' (expected name, category, price, image or stock)",
                other
            ))),
        }
    }
}

/// Product editor state: a create when `editing_id` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    editing_id: Option<u32>,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub stock: String,
}

impl ProductForm {
    /// An empty form for a new product.
    pub fn create() -> Self {
        ProductForm {
            stock: "0".to_string(),
            ..ProductForm::default()
        }
    }

    /// A form seeded from an existing product.
    pub fn edit(product: &Product) -> Self {
        ProductForm {
            editing_id: Some(product.id),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format!("{}.{:02}", product.price.dollars(), product.price.cents_part()),
            image_url: product.image_url.clone(),
            stock: product.stock.to_string(),
        }
    }

    /// Seeds from the coordinator's edit target.
    pub fn for_target(editing: Option<&Product>) -> Self {
        editing.map_or_else(ProductForm::create, ProductForm::edit)
    }

    pub fn editing_id(&self) -> Option<u32> {
        self.editing_id
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Price => &self.price,
            FormField::ImageUrl => &self.image_url,
            FormField::Stock => &self.stock,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Category => self.category = value,
            FormField::Price => self.price = value,
            FormField::ImageUrl => self.image_url = value,
            FormField::Stock => self.stock = value,
        }
    }

    /// Parses and validates the draft.
    pub fn validate(&self) -> AppResult<NewProduct> {
        let price = Money::parse(&self.price).ok_or_else(|| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' is not a price", self.price.trim()),
        })?;

        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "stock".to_string(),
                reason: format!("'{}' is not a whole number", self.stock.trim()),
            })?;

        let draft = NewProduct {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price,
            image_url: self.image_url.trim().to_string(),
            stock,
        };

        validate_new_product(&draft)?;
        Ok(draft)
    }

    /// Creates or updates the product through the API.
    pub async fn submit(&self, api: &dyn StorefrontApi, token: &str) -> AppResult<Product> {
        let draft = self.validate()?;

        let saved = match self.editing_id {
            Some(id) => api.update_product(draft.with_id(id), token).await?,
            None => api.create_product(draft, token).await?,
        };

        info!(id = saved.id, edit = self.is_edit(), "Product saved from admin form");
        Ok(saved)
    }
}

//! Menu catalogue
//!
//! Staff manage categories and items; guests see active categories with
//! their available items.

mod service;

pub use service::MenuService;

use shared::models::{MenuCategory, MenuItem};

use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN};
use crate::utils::validation::{validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Catalogue display order
pub fn sort_categories(categories: &mut [MenuCategory]) {
    categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
}

/// Catalogue display order
pub fn sort_items(items: &mut [MenuItem]) {
    items.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
}

pub(crate) fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price));
    }
    Ok(())
}

pub(crate) fn validate_item_fields(
    name: &str,
    description: &Option<String>,
    image_url: &Option<String>,
    dietary_tags: &[String],
) -> AppResult<()> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(image_url, "image_url", MAX_URL_LEN)?;
    for tag in dietary_tags {
        validate_required_text(tag, "dietary tag", MAX_NAME_LEN)?;
    }
    Ok(())
}

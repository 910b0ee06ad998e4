use std::sync::Arc;

use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuCategoryWithItems, MenuItem,
    MenuItemCreate, MenuItemUpdate,
};

use super::{sort_categories, sort_items, validate_item_fields, validate_price};
use crate::db::Storage;
use crate::settings::SettingsService;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN};
use crate::utils::validation::{validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, Clock, ErrorCode};

#[derive(Clone)]
pub struct MenuService {
    storage: Storage,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl MenuService {
    pub fn new(storage: Storage, settings: SettingsService, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    fn tenant(&self, owner_id: &str) -> AppResult<String> {
        Ok(self.settings.for_owner(owner_id)?.company_slug)
    }

    fn owned_category(&self, slug: &str, id: &str) -> AppResult<MenuCategory> {
        self.storage
            .get_category(id)?
            .filter(|c| c.company_slug == slug)
            .ok_or_else(|| AppError::new(ErrorCode::MenuCategoryNotFound).with_detail("id", id))
    }

    fn owned_item(&self, slug: &str, id: &str) -> AppResult<MenuItem> {
        self.storage
            .get_item(id)?
            .filter(|i| i.company_slug == slug)
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))
    }

    // ========== Categories ==========

    pub fn list_categories(&self, owner_id: &str) -> AppResult<Vec<MenuCategory>> {
        let slug = self.tenant(owner_id)?;
        let mut categories = self.storage.list_categories(&slug)?;
        sort_categories(&mut categories);
        Ok(categories)
    }

    pub fn create_category(
        &self,
        owner_id: &str,
        input: MenuCategoryCreate,
    ) -> AppResult<MenuCategory> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&input.description, "description", MAX_NOTE_LEN)?;

        let now = self.clock.now_millis();
        let category = MenuCategory {
            id: shared::util::new_id(),
            company_slug: self.tenant(owner_id)?,
            name: input.name.trim().to_string(),
            description: input.description,
            sort_order: input.sort_order.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.storage.put_category(&category)?;
        tracing::info!(category_id = %category.id, name = %category.name, "Menu category created");
        Ok(category)
    }

    pub fn update_category(
        &self,
        owner_id: &str,
        id: &str,
        input: MenuCategoryUpdate,
    ) -> AppResult<MenuCategory> {
        let slug = self.tenant(owner_id)?;
        let mut category = self.owned_category(&slug, id)?;

        if let Some(name) = input.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            category.name = name.trim().to_string();
        }
        if input.description.is_some() {
            validate_optional_text(&input.description, "description", MAX_NOTE_LEN)?;
            category.description = input.description;
        }
        if let Some(sort_order) = input.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(is_active) = input.is_active {
            category.is_active = is_active;
        }
        category.updated_at = self.clock.now_millis();

        self.storage.put_category(&category)?;
        Ok(category)
    }

    /// Delete a category together with its items
    pub fn delete_category(&self, owner_id: &str, id: &str) -> AppResult<usize> {
        let slug = self.tenant(owner_id)?;
        self.owned_category(&slug, id)?;
        let removed_items = self
            .storage
            .delete_category_cascade(id)?
            .ok_or_else(|| AppError::new(ErrorCode::MenuCategoryNotFound).with_detail("id", id))?;
        tracing::info!(category_id = %id, removed_items, "Menu category deleted");
        Ok(removed_items)
    }

    // ========== Items ==========

    /// Items of the tenant, optionally restricted to one category
    pub fn list_items(&self, owner_id: &str, category_id: Option<&str>) -> AppResult<Vec<MenuItem>> {
        let slug = self.tenant(owner_id)?;
        let mut items = self.storage.list_items(&slug)?;
        if let Some(category_id) = category_id {
            items.retain(|i| i.category_id == category_id);
        }
        sort_items(&mut items);
        Ok(items)
    }

    pub fn get_item(&self, owner_id: &str, id: &str) -> AppResult<MenuItem> {
        let slug = self.tenant(owner_id)?;
        self.owned_item(&slug, id)
    }

    pub fn create_item(&self, owner_id: &str, input: MenuItemCreate) -> AppResult<MenuItem> {
        validate_item_fields(
            &input.name,
            &input.description,
            &input.image_url,
            &input.dietary_tags,
        )?;
        validate_price(input.price)?;

        let slug = self.tenant(owner_id)?;
        self.owned_category(&slug, &input.category_id)?;

        let now = self.clock.now_millis();
        let item = MenuItem {
            id: shared::util::new_id(),
            company_slug: slug,
            category_id: input.category_id,
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            dietary_tags: input.dietary_tags,
            is_available: input.is_available.unwrap_or(true),
            sort_order: input.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        self.storage.put_item(&item)?;
        tracing::info!(item_id = %item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    pub fn update_item(
        &self,
        owner_id: &str,
        id: &str,
        input: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        let slug = self.tenant(owner_id)?;
        let mut item = self.owned_item(&slug, id)?;

        if let Some(category_id) = input.category_id {
            self.owned_category(&slug, &category_id)?;
            item.category_id = category_id;
        }
        if let Some(name) = input.name {
            item.name = name.trim().to_string();
        }
        if input.description.is_some() {
            item.description = input.description;
        }
        if let Some(price) = input.price {
            validate_price(price)?;
            item.price = price;
        }
        if input.image_url.is_some() {
            item.image_url = input.image_url;
        }
        if let Some(tags) = input.dietary_tags {
            item.dietary_tags = tags;
        }
        if let Some(is_available) = input.is_available {
            item.is_available = is_available;
        }
        if let Some(sort_order) = input.sort_order {
            item.sort_order = sort_order;
        }
        validate_item_fields(&item.name, &item.description, &item.image_url, &item.dietary_tags)?;
        item.updated_at = self.clock.now_millis();

        self.storage.put_item(&item)?;
        Ok(item)
    }

    pub fn delete_item(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let slug = self.tenant(owner_id)?;
        self.owned_item(&slug, id)?;
        self.storage.delete_item(id)?;
        tracing::info!(item_id = %id, "Menu item deleted");
        Ok(())
    }

    // ========== Guest view ==========

    /// Active categories with their available items; empty categories are omitted.
    /// An unknown tenant has an empty menu.
    pub fn public_menu(&self, company_slug: &str) -> AppResult<Vec<MenuCategoryWithItems>> {
        let Some(settings) = self.settings.resolve(company_slug)? else {
            return Ok(Vec::new());
        };
        let company_slug = settings.company_slug.as_str();

        let mut categories = self.storage.list_categories(company_slug)?;
        categories.retain(|c| c.is_active);
        sort_categories(&mut categories);

        let mut items = self.storage.list_items(company_slug)?;
        items.retain(|i| i.is_available);
        sort_items(&mut items);

        Ok(categories
            .into_iter()
            .filter_map(|category| {
                let items: Vec<MenuItem> = items
                    .iter()
                    .filter(|i| i.category_id == category.id)
                    .cloned()
                    .collect();
                (!items.is_empty()).then_some(MenuCategoryWithItems { category, items })
            })
            .collect())
    }

    /// A single available item of the tenant
    pub fn public_item(&self, company_slug: &str, id: &str) -> AppResult<MenuItem> {
        self.settings
            .resolve(company_slug)?
            .and_then(|s| self.owned_item(&s.company_slug, id).ok())
            .filter(|i| i.is_available)
            .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))
    }
}

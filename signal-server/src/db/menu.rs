//! Menu catalogue persistence

use super::storage::{MENU_CATEGORIES_TABLE, MENU_ITEMS_TABLE, Storage, StorageResult};
use redb::{ReadableDatabase, ReadableTable};
use shared::models::{MenuCategory, MenuItem};

impl Storage {
    // ========== Categories ==========

    pub fn list_categories(&self, company_slug: &str) -> StorageResult<Vec<MenuCategory>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_CATEGORIES_TABLE)?;

        let mut categories = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let category: MenuCategory = serde_json::from_slice(value.value())?;
            if category.company_slug == company_slug {
                categories.push(category);
            }
        }
        Ok(categories)
    }

    pub fn get_category(&self, id: &str) -> StorageResult<Option<MenuCategory>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_CATEGORIES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn put_category(&self, category: &MenuCategory) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_CATEGORIES_TABLE)?;
            let value = serde_json::to_vec(category)?;
            table.insert(category.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Delete a category and all of its items.
    ///
    /// Returns the number of items removed, `None` when the category is missing.
    pub fn delete_category_cascade(&self, id: &str) -> StorageResult<Option<usize>> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut categories = txn.open_table(MENU_CATEGORIES_TABLE)?;
            if categories.remove(id)?.is_none() {
                return Ok(None);
            }

            let mut items = txn.open_table(MENU_ITEMS_TABLE)?;
            let mut item_ids = Vec::new();
            for result in items.iter()? {
                let (key, value) = result?;
                let item: MenuItem = serde_json::from_slice(value.value())?;
                if item.category_id == id {
                    item_ids.push(key.value().to_string());
                }
            }
            for item_id in &item_ids {
                items.remove(item_id.as_str())?;
            }
            item_ids.len()
        };
        txn.commit()?;
        Ok(Some(removed))
    }

    // ========== Items ==========

    pub fn list_items(&self, company_slug: &str) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let item: MenuItem = serde_json::from_slice(value.value())?;
            if item.company_slug == company_slug {
                items.push(item);
            }
        }
        Ok(items)
    }

    pub fn get_item(&self, id: &str) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn put_item(&self, item: &MenuItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            let value = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn delete_item(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> MenuCategory {
        MenuCategory {
            id: id.to_string(),
            company_slug: "bistro".to_string(),
            name: "Mains".to_string(),
            description: None,
            sort_order: 0,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn item(id: &str, category_id: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            company_slug: "bistro".to_string(),
            category_id: category_id.to_string(),
            name: format!("Dish {}", id),
            description: None,
            price: 9.5,
            image_url: None,
            dietary_tags: vec![],
            is_available: true,
            sort_order: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_delete_category_cascades_to_items() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put_category(&category("c1")).unwrap();
        storage.put_category(&category("c2")).unwrap();
        storage.put_item(&item("i1", "c1")).unwrap();
        storage.put_item(&item("i2", "c1")).unwrap();
        storage.put_item(&item("i3", "c2")).unwrap();

        assert_eq!(storage.delete_category_cascade("c1").unwrap(), Some(2));
        assert!(storage.get_item("i1").unwrap().is_none());
        assert!(storage.get_item("i3").unwrap().is_some());
        assert_eq!(storage.delete_category_cascade("c1").unwrap(), None);
    }
}

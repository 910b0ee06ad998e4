//! Tenant configuration and floor layout persistence

use super::storage::{
    LAYOUTS_TABLE, MENU_CATEGORIES_TABLE, MENU_ITEMS_TABLE, ORDERS_TABLE, OWNERS_TABLE,
    REQUESTS_TABLE, SETTINGS_TABLE, Storage, StorageError, StorageResult,
};
use redb::{ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{TableConfiguration, TableLayout};

impl Storage {
    // ========== Settings ==========

    pub fn get_settings(&self, company_slug: &str) -> StorageResult<Option<TableConfiguration>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;
        match table.get(company_slug)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Upsert a configuration under its own slug
    pub fn put_settings(&self, settings: &TableConfiguration) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SETTINGS_TABLE)?;
            let value = serde_json::to_vec(settings)?;
            table.insert(settings.company_slug.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Slug of the tenant owned by a staff principal
    pub fn owner_slug(&self, owner_id: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OWNERS_TABLE)?;
        Ok(table.get(owner_id)?.map(|guard| guard.value().to_string()))
    }

    /// Get the principal's configuration, creating it from `template` when absent.
    ///
    /// A taken slug gets a numeric suffix (`restaurant-2`, `restaurant-3`, ...).
    /// Runs in one write transaction so concurrent first reads agree.
    pub fn get_or_create_owned_settings(
        &self,
        owner_id: &str,
        mut template: TableConfiguration,
    ) -> StorageResult<TableConfiguration> {
        let txn = self.db.begin_write()?;
        let settings = {
            let mut owners = txn.open_table(OWNERS_TABLE)?;
            let mut settings_table = txn.open_table(SETTINGS_TABLE)?;

            let existing_slug = owners.get(owner_id)?.map(|g| g.value().to_string());
            let existing: Option<TableConfiguration> = match &existing_slug {
                Some(slug) => match settings_table.get(slug.as_str())? {
                    Some(value) => Some(serde_json::from_slice(value.value())?),
                    None => None,
                },
                None => None,
            };

            match existing {
                Some(settings) => settings,
                None => {
                    let base = template.company_slug.clone();
                    let mut candidate = base.clone();
                    let mut suffix = 2;
                    while settings_table.get(candidate.as_str())?.is_some() {
                        candidate = format!("{}-{}", base, suffix);
                        suffix += 1;
                    }
                    template.company_slug = candidate;
                    template.owner_id = Some(owner_id.to_string());

                    let value = serde_json::to_vec(&template)?;
                    settings_table.insert(template.company_slug.as_str(), value.as_slice())?;
                    owners.insert(owner_id, template.company_slug.as_str())?;
                    template
                }
            }
        };
        txn.commit()?;
        Ok(settings)
    }

    /// Save `settings` that used to live under `old_slug`.
    ///
    /// When the slug changes, every row scoped to the old slug (requests,
    /// layout, menu, orders) moves to the new one in the same transaction.
    /// Fails with [`StorageError::SlugTaken`] when another tenant holds it.
    pub fn save_settings_renaming(
        &self,
        old_slug: &str,
        settings: &TableConfiguration,
    ) -> StorageResult<()> {
        let new_slug = settings.company_slug.as_str();
        if new_slug == old_slug {
            return self.put_settings(settings);
        }

        let txn = self.db.begin_write()?;
        {
            let mut settings_table = txn.open_table(SETTINGS_TABLE)?;
            if settings_table.get(new_slug)?.is_some() {
                return Err(StorageError::SlugTaken(new_slug.to_string()));
            }
            settings_table.remove(old_slug)?;
            let value = serde_json::to_vec(settings)?;
            settings_table.insert(new_slug, value.as_slice())?;
        }
        if let Some(owner_id) = &settings.owner_id {
            let mut owners = txn.open_table(OWNERS_TABLE)?;
            owners.insert(owner_id.as_str(), new_slug)?;
        }
        {
            let mut layouts = txn.open_table(LAYOUTS_TABLE)?;
            let layout: Option<TableLayout> = match layouts.get(old_slug)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            if let Some(mut layout) = layout {
                layouts.remove(old_slug)?;
                layout.company_slug = new_slug.to_string();
                let value = serde_json::to_vec(&layout)?;
                layouts.insert(new_slug, value.as_slice())?;
            }
        }
        let mut moved = 0;
        for definition in [
            REQUESTS_TABLE,
            MENU_CATEGORIES_TABLE,
            MENU_ITEMS_TABLE,
            ORDERS_TABLE,
        ] {
            moved += rescope_rows(&txn, definition, old_slug, new_slug)?;
        }
        txn.commit()?;

        tracing::info!(old_slug, new_slug, moved, "Tenant slug renamed");
        Ok(())
    }

    // ========== Layouts ==========

    pub fn get_layout(&self, company_slug: &str) -> StorageResult<Option<TableLayout>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LAYOUTS_TABLE)?;
        match table.get(company_slug)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Upsert a layout under its tenant slug (last write wins)
    pub fn put_layout(&self, layout: &TableLayout) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LAYOUTS_TABLE)?;
            let value = serde_json::to_vec(layout)?;
            table.insert(layout.company_slug.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Rewrite `company_slug` on every JSON row of `definition` scoped to `old`
fn rescope_rows(
    txn: &WriteTransaction,
    definition: TableDefinition<'static, &'static str, &'static [u8]>,
    old: &str,
    new: &str,
) -> StorageResult<usize> {
    let mut table = txn.open_table(definition)?;

    // Collect first (can't iterate and mutate simultaneously)
    let mut rows: Vec<(String, Vec<u8>)> = Vec::new();
    for result in table.iter()? {
        let (key, value) = result?;
        let mut row: serde_json::Value = serde_json::from_slice(value.value())?;
        if row.get("company_slug").and_then(|v| v.as_str()) == Some(old) {
            row["company_slug"] = serde_json::Value::String(new.to_string());
            rows.push((key.value().to_string(), serde_json::to_vec(&row)?));
        }
    }

    for (key, value) in &rows {
        table.insert(key.as_str(), value.as_slice())?;
    }
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ServiceRequest, TablePosition, TableShape};

    fn layout(slug: &str) -> TableLayout {
        TableLayout {
            name: "Patio".to_string(),
            company_slug: slug.to_string(),
            positions: vec![TablePosition {
                table_number: 1,
                x: 10.0,
                y: 20.0,
                width: 80.0,
                height: 80.0,
                shape: TableShape::Square,
                seats: 4,
            }],
            updated_at: 0,
        }
    }

    #[test]
    fn test_owned_settings_created_once() {
        let storage = Storage::open_in_memory().unwrap();
        let first = storage
            .get_or_create_owned_settings("alice", TableConfiguration::default_for("restaurant", 1))
            .unwrap();
        let again = storage
            .get_or_create_owned_settings("alice", TableConfiguration::default_for("restaurant", 2))
            .unwrap();

        assert_eq!(first.company_slug, "restaurant");
        assert_eq!(again, first);
        assert_eq!(storage.owner_slug("alice").unwrap().as_deref(), Some("restaurant"));
    }

    #[test]
    fn test_owned_settings_suffix_when_taken() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .get_or_create_owned_settings("alice", TableConfiguration::default_for("restaurant", 1))
            .unwrap();
        let bob = storage
            .get_or_create_owned_settings("bob", TableConfiguration::default_for("restaurant", 1))
            .unwrap();
        let carol = storage
            .get_or_create_owned_settings("carol", TableConfiguration::default_for("restaurant", 1))
            .unwrap();

        assert_eq!(bob.company_slug, "restaurant-2");
        assert_eq!(carol.company_slug, "restaurant-3");
    }

    #[test]
    fn test_rename_moves_tenant_rows() {
        let storage = Storage::open_in_memory().unwrap();
        let mut cfg = storage
            .get_or_create_owned_settings("alice", TableConfiguration::default_for("restaurant", 1))
            .unwrap();
        storage.put_layout(&layout("restaurant")).unwrap();
        storage
            .insert_request(&ServiceRequest::new_active(
                "r1".into(),
                "restaurant",
                1,
                "Bill",
                0,
                None,
            ))
            .unwrap();
        storage
            .insert_request(&ServiceRequest::new_active("r2".into(), "other", 1, "Bill", 0, None))
            .unwrap();

        cfg.company_slug = "chez-alice".to_string();
        storage.save_settings_renaming("restaurant", &cfg).unwrap();

        assert!(storage.get_settings("restaurant").unwrap().is_none());
        assert!(storage.get_settings("chez-alice").unwrap().is_some());
        assert_eq!(storage.owner_slug("alice").unwrap().as_deref(), Some("chez-alice"));
        assert!(storage.get_layout("restaurant").unwrap().is_none());
        assert_eq!(
            storage.get_layout("chez-alice").unwrap().unwrap().company_slug,
            "chez-alice"
        );
        assert_eq!(storage.list_requests("chez-alice").unwrap().len(), 1);
        assert_eq!(storage.list_requests("other").unwrap().len(), 1);
    }

    #[test]
    fn test_rename_to_taken_slug_fails_without_changes() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put_settings(&TableConfiguration::default_for("taken", 1)).unwrap();
        let mut cfg = storage
            .get_or_create_owned_settings("alice", TableConfiguration::default_for("mine", 1))
            .unwrap();

        cfg.company_slug = "taken".to_string();
        let err = storage.save_settings_renaming("mine", &cfg).unwrap_err();
        assert!(matches!(err, StorageError::SlugTaken(slug) if slug == "taken"));
        assert!(storage.get_settings("mine").unwrap().is_some());
    }

    #[test]
    fn test_layout_upsert() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put_layout(&layout("bistro")).unwrap();
        let mut changed = layout("bistro");
        changed.positions[0].x = 300.0;
        storage.put_layout(&changed).unwrap();
        assert_eq!(storage.get_layout("bistro").unwrap().unwrap().positions[0].x, 300.0);
    }
}

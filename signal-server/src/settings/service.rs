//! Settings service

use std::sync::Arc;

use shared::models::{PublicTableInfo, SettingsUpdate, TableConfiguration};

use super::{
    SettingsError, normalize_request_types, normalize_slug, validate_seats, validate_tables,
};
use crate::db::Storage;
use crate::utils::Clock;

#[derive(Clone)]
pub struct SettingsService {
    storage: Storage,
    clock: Arc<dyn Clock>,
    default_slug: String,
}

impl SettingsService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, default_slug: impl Into<String>) -> Self {
        Self {
            storage,
            clock,
            default_slug: default_slug.into(),
        }
    }

    /// Slug served by the single-tenant public routes
    pub fn default_slug(&self) -> &str {
        &self.default_slug
    }

    /// Configuration owned by a staff principal, created with defaults on first read
    pub fn for_owner(&self, owner_id: &str) -> Result<TableConfiguration, SettingsError> {
        let template = TableConfiguration::default_for(&self.default_slug, self.clock.now_millis());
        let settings = self.storage.get_or_create_owned_settings(owner_id, template)?;
        Ok(settings)
    }

    /// Configuration for guest traffic, looked up by normalized slug.
    ///
    /// While no tenant stores the default slug it resolves to the default
    /// configuration, without persisting anything. Any other unknown or
    /// malformed slug resolves to `None`.
    pub fn resolve(
        &self,
        company_slug: &str,
    ) -> Result<Option<TableConfiguration>, SettingsError> {
        let Ok(slug) = normalize_slug(company_slug) else {
            return Ok(None);
        };
        if let Some(settings) = self.storage.get_settings(&slug)? {
            return Ok(Some(settings));
        }
        Ok((slug == self.default_slug)
            .then(|| TableConfiguration::default_for(slug, self.clock.now_millis())))
    }

    /// Apply a partial update to the principal's configuration.
    ///
    /// Everything is validated before anything is written; a slug change
    /// re-scopes the tenant's data in the same transaction.
    pub fn update(
        &self,
        owner_id: &str,
        update: SettingsUpdate,
    ) -> Result<TableConfiguration, SettingsError> {
        let current = self.for_owner(owner_id)?;
        let old_slug = current.company_slug.clone();
        let mut next = current;

        if let Some(slug) = update.company_slug {
            next.company_slug = normalize_slug(&slug)?;
        }
        if let Some(mut tables) = update.tables {
            validate_tables(&tables)?;
            tables.sort_unstable();
            next.tables = tables;
        }
        if let Some(table_seats) = update.table_seats {
            for (&table, &seats) in &table_seats {
                validate_seats(table, seats)?;
            }
            next.table_seats = table_seats;
        }
        if let Some(types) = update.request_types {
            next.request_types = normalize_request_types(&types)?;
        }
        if let Some(enabled) = update.sound_enabled {
            next.sound_enabled = enabled;
        }
        if let Some(volume) = update.notification_volume {
            if volume.is_nan() {
                return Err(SettingsError::InvalidVolume);
            }
            next.notification_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(warning) = update.warning_threshold {
            if warning < 0 {
                return Err(SettingsError::InvalidThreshold(warning));
            }
            next.warning_threshold = warning;
        }
        if let Some(critical) = update.critical_threshold {
            if critical < 0 {
                return Err(SettingsError::InvalidThreshold(critical));
            }
            next.critical_threshold = critical;
        }
        if next.warning_threshold >= next.critical_threshold {
            tracing::debug!(
                company_slug = %next.company_slug,
                warning = next.warning_threshold,
                critical = next.critical_threshold,
                "Saving misordered status thresholds"
            );
        }

        next.updated_at = self.clock.now_millis();
        self.storage.save_settings_renaming(&old_slug, &next)?;
        Ok(next)
    }

    /// Tenant and table check for the guest table page
    pub fn public_table_info(
        &self,
        company_slug: &str,
        table_number: i32,
    ) -> Result<Option<PublicTableInfo>, SettingsError> {
        let Some(settings) = self.resolve(company_slug)? else {
            return Ok(None);
        };
        if !settings.has_table(table_number) {
            return Ok(None);
        }
        Ok(Some(PublicTableInfo {
            company_slug: settings.company_slug,
            table_number,
            request_types: settings.request_types,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;
    use std::collections::BTreeMap;

    fn service() -> SettingsService {
        let storage = Storage::open_in_memory().unwrap();
        SettingsService::new(storage, Arc::new(ManualClock::new(5_000)), "restaurant")
    }

    #[test]
    fn lazily_created_with_defaults() {
        let svc = service();
        let settings = svc.for_owner("alice").unwrap();
        assert_eq!(settings.company_slug, "restaurant");
        assert_eq!(settings.request_types, vec!["Service", "Bill"]);
        assert_eq!(settings.owner_id.as_deref(), Some("alice"));
        assert_eq!(settings.created_at, 5_000);
    }

    #[test]
    fn partial_update_keeps_absent_fields() {
        let svc = service();
        let updated = svc
            .update(
                "alice",
                SettingsUpdate {
                    request_types: Some(vec!["Service".into(), "Water".into()]),
                    notification_volume: Some(3.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.request_types, vec!["Service", "Water"]);
        assert_eq!(updated.notification_volume, 1.0);
        assert_eq!(updated.tables, (1..=10).collect::<Vec<_>>());
        assert_eq!(svc.for_owner("alice").unwrap(), updated);
    }

    #[test]
    fn last_request_type_cannot_be_removed() {
        let svc = service();
        let err = svc
            .update(
                "alice",
                SettingsUpdate {
                    request_types: Some(vec![]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::RequestTypesEmpty));
        assert_eq!(svc.for_owner("alice").unwrap().request_types.len(), 2);
    }

    #[test]
    fn seat_counts_are_range_checked() {
        let svc = service();
        let err = svc
            .update(
                "alice",
                SettingsUpdate {
                    table_seats: Some(BTreeMap::from([(1, 4), (2, 25)])),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSeatCount { table: 2, seats: 25 }));
    }

    #[test]
    fn slug_rename_is_normalized_and_unique() {
        let svc = service();
        svc.for_owner("alice").unwrap();
        svc.for_owner("bob").unwrap(); // restaurant-2

        let renamed = svc
            .update(
                "alice",
                SettingsUpdate {
                    company_slug: Some("Chez Alice".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.company_slug, "chez-alice");

        let err = svc
            .update(
                "bob",
                SettingsUpdate {
                    company_slug: Some("chez-alice".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::SlugTaken(_)));
    }

    #[test]
    fn default_slug_resolves_before_any_owner_exists() {
        let svc = service();
        let settings = svc.resolve("restaurant").unwrap().unwrap();
        assert_eq!(settings.tables, (1..=10).collect::<Vec<_>>());
        assert!(settings.owner_id.is_none());
        assert!(svc.public_table_info("restaurant", 10).unwrap().is_some());
        assert!(svc.public_table_info("restaurant", 11).unwrap().is_none());
        assert!(svc.storage.get_settings("restaurant").unwrap().is_none());
    }

    #[test]
    fn unknown_and_malformed_slugs_do_not_resolve() {
        let svc = service();
        svc.for_owner("alice").unwrap();

        assert!(svc.resolve("nobody").unwrap().is_none());
        assert!(svc.resolve("").unwrap().is_none());
        assert!(svc.resolve(&"x".repeat(500)).unwrap().is_none());
        assert!(svc.public_table_info("nobody", 1).unwrap().is_none());
    }

    #[test]
    fn slug_lookup_is_normalized() {
        let svc = service();
        svc.update(
            "alice",
            SettingsUpdate {
                company_slug: Some("chez-alice".into()),
                tables: Some(vec![3, 4]),
                ..Default::default()
            },
        )
        .unwrap();

        let settings = svc.resolve("  Chez Alice ").unwrap().unwrap();
        assert_eq!(settings.company_slug, "chez-alice");
        assert_eq!(settings.tables, vec![3, 4]);
        assert_eq!(
            svc.public_table_info("CHEZ-ALICE", 3).unwrap().unwrap().company_slug,
            "chez-alice"
        );
    }
}

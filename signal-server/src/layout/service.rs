//! Layout service

use std::sync::Arc;

use shared::models::{LayoutSave, TableConfiguration, TableLayout};

use super::{DEFAULT_LAYOUT_NAME, default_positions, reconcile};
use crate::db::Storage;
use crate::settings::validate_seats;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, Clock};

#[derive(Clone)]
pub struct LayoutService {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl LayoutService {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Load the tenant layout reconciled against `config`.
    ///
    /// A missing layout starts from the default plan. Structural changes
    /// (tables added or removed, seat counts refreshed) are persisted right
    /// away; positional edits only through [`LayoutService::save`].
    pub fn load(&self, config: &TableConfiguration) -> AppResult<TableLayout> {
        let (mut layout, fresh) = match self.storage.get_layout(&config.company_slug)? {
            Some(layout) => (layout, false),
            None => (
                TableLayout {
                    name: DEFAULT_LAYOUT_NAME.to_string(),
                    company_slug: config.company_slug.clone(),
                    positions: default_positions(),
                    updated_at: self.clock.now_millis(),
                },
                true,
            ),
        };

        let reconciled = reconcile(&layout.positions, &config.tables, &config.table_seats);
        if fresh || reconciled.changed {
            layout.positions = reconciled.positions;
            layout.updated_at = self.clock.now_millis();
            self.storage.put_layout(&layout)?;
            tracing::debug!(
                company_slug = %config.company_slug,
                tables = layout.positions.len(),
                "Layout synchronized with table configuration"
            );
        }
        Ok(layout)
    }

    /// Persist edited geometry (last write wins).
    ///
    /// Seat counts must be in range even for tables the seat map does not
    /// cover, since those keep the saved value. The saved plan is reconciled
    /// first so it always matches the configured table set.
    pub fn save(&self, config: &TableConfiguration, save: LayoutSave) -> AppResult<TableLayout> {
        for position in &save.positions {
            let dims = [position.x, position.y, position.width, position.height];
            if dims.iter().any(|v| !v.is_finite()) || position.width <= 0.0 || position.height <= 0.0 {
                return Err(AppError::validation(format!(
                    "Invalid geometry for table {}",
                    position.table_number
                ))
                .with_detail("table", position.table_number));
            }
            validate_seats(position.table_number, position.seats)?;
        }

        let name = match save.name {
            Some(name) => {
                validate_required_text(&name, "name", MAX_NAME_LEN)?;
                name
            }
            None => self
                .storage
                .get_layout(&config.company_slug)?
                .map(|l| l.name)
                .unwrap_or_else(|| DEFAULT_LAYOUT_NAME.to_string()),
        };

        let reconciled = reconcile(&save.positions, &config.tables, &config.table_seats);
        let layout = TableLayout {
            name,
            company_slug: config.company_slug.clone(),
            positions: reconciled.positions,
            updated_at: self.clock.now_millis(),
        };
        self.storage.put_layout(&layout)?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;
    use shared::models::TableShape;

    fn service() -> (LayoutService, Storage) {
        let storage = Storage::open_in_memory().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));
        (LayoutService::new(storage.clone(), clock), storage)
    }

    #[test]
    fn first_load_persists_default_plan() {
        let (svc, storage) = service();
        let config = TableConfiguration::default_for("bistro", 0);

        let layout = svc.load(&config).unwrap();
        assert_eq!(layout.name, DEFAULT_LAYOUT_NAME);
        assert_eq!(layout.positions, default_positions());
        assert!(storage.get_layout("bistro").unwrap().is_some());
    }

    #[test]
    fn manual_positions_survive_reload_and_config_changes() {
        let (svc, _storage) = service();
        let mut config = TableConfiguration::default_for("bistro", 0);

        let mut positions = svc.load(&config).unwrap().positions;
        positions[2].x = 612.0;
        positions[2].y = 377.0;
        svc.save(
            &config,
            LayoutSave {
                name: None,
                positions,
            },
        )
        .unwrap();

        // Add table 11, drop table 1
        config.tables = (2..=11).collect();
        let layout = svc.load(&config).unwrap();
        let t3 = layout.positions.iter().find(|p| p.table_number == 3).unwrap();
        assert_eq!((t3.x, t3.y), (612.0, 377.0));
        assert!(layout.positions.iter().all(|p| p.table_number != 1));

        // 9 survivors, so table 11 lands in slot 9: row 2, col 1
        let t11 = layout.positions.iter().find(|p| p.table_number == 11).unwrap();
        assert_eq!((t11.x, t11.y), (180.0, 310.0));
        assert_eq!(t11.shape, TableShape::Square);
    }

    #[test]
    fn save_rejects_degenerate_geometry() {
        let (svc, _storage) = service();
        let config = TableConfiguration::default_for("bistro", 0);
        let mut positions = default_positions();
        positions[0].width = 0.0;

        let err = svc
            .save(
                &config,
                LayoutSave {
                    name: None,
                    positions,
                },
            )
            .unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
    }

    #[test]
    fn save_rejects_seat_counts_out_of_range() {
        let (svc, storage) = service();
        let mut config = TableConfiguration::default_for("bistro", 0);
        config.tables.push(11);

        for seats in [0, 21, 100_000, -3] {
            let mut positions = default_positions();
            positions.push(crate::layout::auto_place(11, seats, 10));

            let err = svc
                .save(
                    &config,
                    LayoutSave {
                        name: None,
                        positions,
                    },
                )
                .unwrap_err();
            assert_eq!(err.code, shared::ErrorCode::InvalidSeatCount);
            assert_eq!(err.details.unwrap()["seats"], seats);
        }
        assert!(storage.get_layout("bistro").unwrap().is_none());

        let mut positions = default_positions();
        positions.push(crate::layout::auto_place(11, 12, 10));
        let layout = svc
            .save(
                &config,
                LayoutSave {
                    name: None,
                    positions,
                },
            )
            .unwrap();
        let t11 = layout.positions.iter().find(|p| p.table_number == 11).unwrap();
        assert_eq!(t11.seats, 12);
    }

    #[test]
    fn positioned_tables_carry_seat_markers() {
        let (svc, _storage) = service();
        let config = TableConfiguration::default_for("bistro", 0);
        let tables = crate::layout::with_seats(svc.load(&config).unwrap().positions);
        let t7 = tables.iter().find(|t| t.position.table_number == 7).unwrap();
        assert_eq!(t7.seat_positions.len(), 5);
    }
}

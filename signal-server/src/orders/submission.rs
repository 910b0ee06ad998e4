use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use shared::models::{MenuItem, Order, OrderItem, OrderStatus, OrderSubmission, OrderWithItems};

use super::{OrderError, money};
use crate::db::{Placement, Storage};
use crate::settings::SettingsService;
use crate::utils::Clock;
use crate::utils::validation::MAX_NOTE_LEN;

/// Upper bound for a single line
pub const MAX_QUANTITY: i32 = 9999;

/// Guest order submission
#[derive(Clone)]
pub struct OrderSubmitter {
    storage: Storage,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl OrderSubmitter {
    pub fn new(storage: Storage, settings: SettingsService, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    /// Validate a cart against the live menu and persist it as a pending order.
    ///
    /// Prices and names come from the menu at submission time. If any
    /// referenced item is missing, foreign or unavailable the whole
    /// submission fails and nothing is written.
    pub fn submit(
        &self,
        company_slug: &str,
        submission: OrderSubmission,
    ) -> Result<OrderWithItems, OrderError> {
        validate_cart(&submission)?;

        let table_number = submission.table_number;
        let Some(settings) = self
            .settings
            .resolve(company_slug)?
            .filter(|s| s.has_table(table_number))
        else {
            return Err(OrderError::InvalidTable(table_number));
        };

        let requested: BTreeSet<&str> = submission
            .items
            .iter()
            .map(|line| line.menu_item_id.as_str())
            .collect();
        let now = self.clock.now_millis();

        let placement = self
            .storage
            .place_order(&settings.company_slug, &requested, |valid| {
                build_order(&settings.company_slug, &submission, valid, now)
            })
            .inspect_err(|e| {
                tracing::error!(
                    company_slug = %settings.company_slug,
                    table = table_number,
                    error = %e,
                    "Failed to store order"
                );
            })?;

        match placement {
            Placement::Placed(placed) => {
                tracing::info!(
                    order_id = %placed.order.id,
                    table = placed.order.table_number,
                    lines = placed.items.len(),
                    total = placed.order.total_amount,
                    "Order submitted"
                );
                Ok(placed)
            }
            Placement::Unavailable(unavailable) => {
                tracing::debug!(?unavailable, "Order rejected: items unavailable");
                Err(OrderError::ItemsUnavailable(unavailable))
            }
        }
    }
}

/// Snapshot names and prices from `valid` into a pending order.
///
/// Fails with the requested ids missing from `valid`; the distinct id set
/// must match exactly, so repeated lines are fine.
fn build_order(
    company_slug: &str,
    submission: &OrderSubmission,
    valid: &HashMap<String, MenuItem>,
    now: i64,
) -> Result<(Order, Vec<OrderItem>), Vec<String>> {
    let mut unavailable: Vec<String> = submission
        .items
        .iter()
        .filter(|line| !valid.contains_key(&line.menu_item_id))
        .map(|line| line.menu_item_id.clone())
        .collect();
    if !unavailable.is_empty() {
        unavailable.sort();
        unavailable.dedup();
        return Err(unavailable);
    }

    let order_id = shared::util::new_id();
    let mut lines = Vec::with_capacity(submission.items.len());
    for input in &submission.items {
        let Some(item) = valid.get(&input.menu_item_id) else {
            return Err(vec![input.menu_item_id.clone()]);
        };
        lines.push(OrderItem {
            id: shared::util::new_id(),
            order_id: order_id.clone(),
            menu_item_id: item.id.clone(),
            menu_item_name: item.name.clone(),
            quantity: input.quantity,
            unit_price: item.price,
            notes: input.notes.clone(),
        });
    }

    let order = Order {
        id: order_id,
        company_slug: company_slug.to_string(),
        table_number: submission.table_number,
        status: OrderStatus::Pending,
        notes: submission.notes.clone(),
        total_amount: money::order_total(lines.iter().map(|l| (l.unit_price, l.quantity))),
        created_at: now,
        updated_at: now,
    };
    Ok((order, lines))
}

fn validate_cart(submission: &OrderSubmission) -> Result<(), OrderError> {
    if submission.items.is_empty() {
        return Err(OrderError::Empty);
    }
    for line in &submission.items {
        if !(1..=MAX_QUANTITY).contains(&line.quantity) {
            return Err(OrderError::InvalidQuantity {
                menu_item_id: line.menu_item_id.clone(),
                quantity: line.quantity,
            });
        }
        if line.notes.as_ref().is_some_and(|n| n.len() > MAX_NOTE_LEN) {
            return Err(OrderError::Validation(format!(
                "Line note is too long (max {MAX_NOTE_LEN})"
            )));
        }
    }
    if submission.notes.as_ref().is_some_and(|n| n.len() > MAX_NOTE_LEN) {
        return Err(OrderError::Validation(format!(
            "Order note is too long (max {MAX_NOTE_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;
    use shared::models::OrderLineInput;

    struct Fixture {
        storage: Storage,
        submitter: OrderSubmitter,
    }

    fn fixture() -> Fixture {
        let storage = Storage::open_in_memory().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));
        let settings = SettingsService::new(storage.clone(), clock.clone(), "restaurant");
        Fixture {
            submitter: OrderSubmitter::new(storage.clone(), settings, clock),
            storage,
        }
    }

    fn menu_item(storage: &Storage, id: &str, name: &str, price: f64, available: bool) {
        tenant_item(storage, "restaurant", id, name, price, available);
    }

    fn tenant_item(
        storage: &Storage,
        company_slug: &str,
        id: &str,
        name: &str,
        price: f64,
        available: bool,
    ) {
        storage
            .put_item(&MenuItem {
                id: id.to_string(),
                company_slug: company_slug.to_string(),
                category_id: "cat".to_string(),
                name: name.to_string(),
                description: None,
                price,
                image_url: None,
                dietary_tags: vec![],
                is_available: available,
                sort_order: 0,
                created_at: 0,
                updated_at: 0,
            })
            .unwrap();
    }

    fn line(id: &str, quantity: i32) -> OrderLineInput {
        OrderLineInput {
            menu_item_id: id.to_string(),
            quantity,
            notes: None,
        }
    }

    fn cart(table: i32, items: Vec<OrderLineInput>) -> OrderSubmission {
        OrderSubmission {
            table_number: table,
            items,
            notes: None,
        }
    }

    #[test]
    fn total_uses_menu_prices() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        menu_item(&fx.storage, "b", "Salad", 5.0, true);

        let placed = fx
            .submitter
            .submit("restaurant", cart(4, vec![line("a", 2), line("b", 1)]))
            .unwrap();

        assert_eq!(placed.order.total_amount, 25.0);
        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.items.len(), 2);
        assert_eq!(placed.items[0].menu_item_name, "Pasta");
        assert_eq!(placed.items[0].unit_price, 10.0);

        let stored = fx.storage.get_order_items(&placed.order.id).unwrap();
        assert_eq!(stored, placed.items);
    }

    #[test]
    fn one_unavailable_item_fails_everything() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        menu_item(&fx.storage, "b", "Salad", 5.0, false);

        let err = fx
            .submitter
            .submit("restaurant", cart(4, vec![line("a", 2), line("b", 1)]))
            .unwrap_err();
        match err {
            OrderError::ItemsUnavailable(ids) => assert_eq!(ids, vec!["b".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fx.storage.list_orders("restaurant").unwrap().is_empty());

        let err = fx
            .submitter
            .submit("restaurant", cart(4, vec![line("a", 1), line("ghost", 1)]))
            .unwrap_err();
        assert!(matches!(err, OrderError::ItemsUnavailable(_)));
    }

    #[test]
    fn repeated_item_lines_are_accepted() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        let placed = fx
            .submitter
            .submit("restaurant", cart(1, vec![line("a", 1), line("a", 2)]))
            .unwrap();
        assert_eq!(placed.order.total_amount, 30.0);
    }

    #[test]
    fn snapshot_survives_menu_changes() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        let placed = fx
            .submitter
            .submit("restaurant", cart(1, vec![line("a", 1)]))
            .unwrap();

        menu_item(&fx.storage, "a", "Pasta Deluxe", 14.0, true);
        let stored = fx.storage.get_order_items(&placed.order.id).unwrap();
        assert_eq!(stored[0].menu_item_name, "Pasta");
        assert_eq!(stored[0].unit_price, 10.0);
    }

    #[test]
    fn cart_shape_is_validated() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);

        assert!(matches!(
            fx.submitter.submit("restaurant", cart(1, vec![])),
            Err(OrderError::Empty)
        ));
        assert!(matches!(
            fx.submitter.submit("restaurant", cart(1, vec![line("a", 0)])),
            Err(OrderError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(matches!(
            fx.submitter.submit("restaurant", cart(42, vec![line("a", 1)])),
            Err(OrderError::InvalidTable(42))
        ));
    }

    #[test]
    fn items_of_another_tenant_are_unavailable() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        tenant_item(&fx.storage, "bistro", "z", "Soup", 6.0, true);
        let err = fx
            .submitter
            .submit("restaurant", cart(1, vec![line("a", 1), line("z", 1)]))
            .unwrap_err();
        match err {
            OrderError::ItemsUnavailable(ids) => assert_eq!(ids, vec!["z".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fx.storage.list_orders("restaurant").unwrap().is_empty());
    }

    #[test]
    fn unknown_tenant_is_an_invalid_table() {
        let fx = fixture();
        tenant_item(&fx.storage, "bistro", "z", "Soup", 6.0, true);
        let err = fx
            .submitter
            .submit("bistro", cart(1, vec![line("z", 1)]))
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTable(1)));
        assert!(fx.storage.list_orders("bistro").unwrap().is_empty());
    }

    #[test]
    fn slug_case_variant_orders_into_same_tenant() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        let placed = fx
            .submitter
            .submit("Restaurant", cart(2, vec![line("a", 1)]))
            .unwrap();
        assert_eq!(placed.order.company_slug, "restaurant");
        assert_eq!(fx.storage.list_orders("restaurant").unwrap().len(), 1);
    }

    #[test]
    fn item_withdrawn_after_a_first_order_blocks_the_next() {
        let fx = fixture();
        menu_item(&fx.storage, "a", "Pasta", 10.0, true);
        fx.submitter
            .submit("restaurant", cart(1, vec![line("a", 1)]))
            .unwrap();

        menu_item(&fx.storage, "a", "Pasta", 10.0, false);
        let err = fx
            .submitter
            .submit("restaurant", cart(1, vec![line("a", 1)]))
            .unwrap_err();
        assert!(matches!(err, OrderError::ItemsUnavailable(_)));
        assert_eq!(fx.storage.list_orders("restaurant").unwrap().len(), 1);
    }
}

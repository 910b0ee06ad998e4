use std::sync::Arc;

use shared::models::{Order, OrderStatus, OrderWithItems};

use super::OrderError;
use crate::db::Storage;
use crate::settings::SettingsService;
use crate::utils::Clock;

/// Staff order management
#[derive(Clone)]
pub struct OrderService {
    storage: Storage,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(storage: Storage, settings: SettingsService, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    fn tenant(&self, owner_id: &str) -> Result<String, OrderError> {
        Ok(self.settings.for_owner(owner_id)?.company_slug)
    }

    fn with_items(&self, orders: Vec<Order>) -> Result<Vec<OrderWithItems>, OrderError> {
        orders
            .into_iter()
            .map(|order| {
                let items = self.storage.get_order_items(&order.id)?;
                Ok(OrderWithItems { order, items })
            })
            .collect()
    }

    /// Orders of the tenant, newest first, optionally restricted to a status set
    pub fn list(
        &self,
        owner_id: &str,
        statuses: Option<&[OrderStatus]>,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        let slug = self.tenant(owner_id)?;
        let mut orders = self.storage.list_orders(&slug)?;
        if let Some(statuses) = statuses {
            orders.retain(|o| statuses.contains(&o.status));
        }
        sort_newest_first(&mut orders);
        self.with_items(orders)
    }

    /// Pending, preparing and ready orders
    pub fn list_active(&self, owner_id: &str) -> Result<Vec<OrderWithItems>, OrderError> {
        let slug = self.tenant(owner_id)?;
        let mut orders = self.storage.list_orders(&slug)?;
        orders.retain(|o| o.status.is_active());
        sort_newest_first(&mut orders);
        self.with_items(orders)
    }

    /// Active orders of one table, newest first
    pub fn list_for_table(
        &self,
        owner_id: &str,
        table_number: i32,
    ) -> Result<Vec<OrderWithItems>, OrderError> {
        let slug = self.tenant(owner_id)?;
        let mut orders = self.storage.list_orders(&slug)?;
        orders.retain(|o| o.table_number == table_number && o.status.is_active());
        sort_newest_first(&mut orders);
        self.with_items(orders)
    }

    pub fn get(&self, owner_id: &str, id: &str) -> Result<OrderWithItems, OrderError> {
        let slug = self.tenant(owner_id)?;
        let order = self
            .storage
            .get_order(id)?
            .filter(|o| o.company_slug == slug)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        let items = self.storage.get_order_items(&order.id)?;
        Ok(OrderWithItems { order, items })
    }

    pub fn update_status(
        &self,
        owner_id: &str,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let slug = self.tenant(owner_id)?;
        let order = self
            .storage
            .update_order_status(id, &slug, status, self.clock.now_millis())?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        tracing::info!(order_id = %id, status = ?status, "Order status updated");
        Ok(order)
    }

    /// Delete an order and its lines
    pub fn delete(&self, owner_id: &str, id: &str) -> Result<(), OrderError> {
        let slug = self.tenant(owner_id)?;
        if !self.storage.delete_order(id, &slug)? {
            return Err(OrderError::NotFound(id.to_string()));
        }
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderSubmitter;
    use crate::utils::ManualClock;
    use shared::models::{MenuItem, OrderLineInput, OrderSubmission};

    struct Fixture {
        service: OrderService,
        submitter: OrderSubmitter,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let storage = Storage::open_in_memory().unwrap();
        let clock = Arc::new(ManualClock::new(0));
        let settings = SettingsService::new(storage.clone(), clock.clone(), "restaurant");
        storage
            .put_item(&MenuItem {
                id: "tea".to_string(),
                company_slug: "restaurant".to_string(),
                category_id: "drinks".to_string(),
                name: "Tea".to_string(),
                description: None,
                price: 2.5,
                image_url: None,
                dietary_tags: vec![],
                is_available: true,
                sort_order: 0,
                created_at: 0,
                updated_at: 0,
            })
            .unwrap();
        Fixture {
            service: OrderService::new(storage.clone(), settings.clone(), clock.clone()),
            submitter: OrderSubmitter::new(storage, settings, clock.clone()),
            clock,
        }
    }

    fn place(fx: &Fixture, table: i32) -> Order {
        let placed = fx
            .submitter
            .submit(
                "restaurant",
                OrderSubmission {
                    table_number: table,
                    items: vec![OrderLineInput {
                        menu_item_id: "tea".into(),
                        quantity: 2,
                        notes: None,
                    }],
                    notes: None,
                },
            )
            .unwrap();
        fx.clock.advance_secs(1);
        placed.order
    }

    #[test]
    fn table_orders_are_active_and_newest_first() {
        let fx = fixture();
        let first = place(&fx, 3);
        let second = place(&fx, 3);
        let done = place(&fx, 3);
        place(&fx, 4);
        fx.service
            .update_status("owner", &done.id, OrderStatus::Completed)
            .unwrap();

        let orders = fx.service.list_for_table("owner", 3).unwrap();
        let ids: Vec<_> = orders.iter().map(|o| o.order.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert_eq!(orders[0].items.len(), 1);
    }

    #[test]
    fn status_filter_and_active_list() {
        let fx = fixture();
        let a = place(&fx, 1);
        let b = place(&fx, 2);
        fx.service
            .update_status("owner", &a.id, OrderStatus::Ready)
            .unwrap();
        fx.service
            .update_status("owner", &b.id, OrderStatus::Cancelled)
            .unwrap();

        let ready = fx
            .service
            .list("owner", Some(&[OrderStatus::Ready]))
            .unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].order.id, a.id);

        assert_eq!(fx.service.list("owner", None).unwrap().len(), 2);
        assert_eq!(fx.service.list_active("owner").unwrap().len(), 1);
    }

    #[test]
    fn delete_and_missing_orders() {
        let fx = fixture();
        let order = place(&fx, 1);
        fx.service.delete("owner", &order.id).unwrap();
        assert!(matches!(
            fx.service.get("owner", &order.id),
            Err(OrderError::NotFound(_))
        ));
        assert!(matches!(
            fx.service.update_status("owner", &order.id, OrderStatus::Ready),
            Err(OrderError::NotFound(_))
        ));
    }
}

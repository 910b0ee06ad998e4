//! Order persistence

use std::collections::{BTreeSet, HashMap};

use super::storage::{MENU_ITEMS_TABLE, ORDER_ITEMS_TABLE, ORDERS_TABLE, Storage, StorageResult};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::{MenuItem, Order, OrderItem, OrderStatus, OrderWithItems};

/// Outcome of [`Storage::place_order`]
#[derive(Debug)]
pub enum Placement {
    Placed(OrderWithItems),
    /// Requested ids that were missing, foreign or unavailable; nothing written
    Unavailable(Vec<String>),
}

impl Storage {
    /// Check the referenced menu items and write the order in one transaction.
    ///
    /// `build` sees the requested items that exist, belong to `company_slug`
    /// and are available, keyed by id. It returns the order to write, or the
    /// ids it could not use; in that case the transaction is aborted. A menu
    /// edit cannot land between the check and the insert.
    pub fn place_order<F>(
        &self,
        company_slug: &str,
        item_ids: &BTreeSet<&str>,
        build: F,
    ) -> StorageResult<Placement>
    where
        F: FnOnce(&HashMap<String, MenuItem>) -> Result<(Order, Vec<OrderItem>), Vec<String>>,
    {
        let txn = self.db.begin_write()?;
        let valid = {
            let menu = txn.open_table(MENU_ITEMS_TABLE)?;
            let mut valid = HashMap::with_capacity(item_ids.len());
            for id in item_ids {
                if let Some(value) = menu.get(*id)? {
                    let item: MenuItem = serde_json::from_slice(value.value())?;
                    if item.company_slug == company_slug && item.is_available {
                        valid.insert(item.id.clone(), item);
                    }
                }
            }
            valid
        };

        match build(&valid) {
            Ok((order, items)) => {
                write_order(&txn, &order, &items)?;
                txn.commit()?;
                Ok(Placement::Placed(OrderWithItems { order, items }))
            }
            Err(unavailable) => {
                txn.abort()?;
                Ok(Placement::Unavailable(unavailable))
            }
        }
    }

    pub fn get_order(&self, id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All orders of a tenant, unordered
    pub fn list_orders(&self, company_slug: &str) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.company_slug == company_slug {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    /// Lines of an order in submission order
    pub fn get_order_items(&self, order_id: &str) -> StorageResult<Vec<OrderItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Set the status of a tenant's order; `None` when missing or foreign
    pub fn update_order_status(
        &self,
        id: &str,
        company_slug: &str,
        status: OrderStatus,
        now_millis: i64,
    ) -> StorageResult<Option<Order>> {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let current: Option<Order> = match table.get(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            match current {
                Some(mut order) if order.company_slug == company_slug => {
                    order.status = status;
                    order.updated_at = now_millis;
                    let value = serde_json::to_vec(&order)?;
                    table.insert(id, value.as_slice())?;
                    Some(order)
                }
                _ => None,
            }
        };
        txn.commit()?;
        Ok(updated)
    }

    /// Delete a tenant's order together with its lines
    pub fn delete_order(&self, id: &str, company_slug: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let current: Option<Order> = match orders.get(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            match current {
                Some(order) if order.company_slug == company_slug => {
                    orders.remove(id)?;
                    remove_order_items(&txn, id)?;
                    true
                }
                _ => false,
            }
        };
        txn.commit()?;
        Ok(removed)
    }
}

fn write_order(txn: &WriteTransaction, order: &Order, items: &[OrderItem]) -> StorageResult<()> {
    let mut orders = txn.open_table(ORDERS_TABLE)?;
    let value = serde_json::to_vec(order)?;
    orders.insert(order.id.as_str(), value.as_slice())?;

    let mut lines = txn.open_table(ORDER_ITEMS_TABLE)?;
    for (line_no, item) in items.iter().enumerate() {
        let value = serde_json::to_vec(item)?;
        lines.insert((order.id.as_str(), line_no as u32), value.as_slice())?;
    }
    Ok(())
}

fn remove_order_items(txn: &WriteTransaction, order_id: &str) -> StorageResult<usize> {
    let mut table = txn.open_table(ORDER_ITEMS_TABLE)?;

    let mut keys: Vec<u32> = Vec::new();
    for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
        let (key, _value) = result?;
        keys.push(key.value().1);
    }
    for line_no in &keys {
        table.remove((order_id, *line_no))?;
    }
    Ok(keys.len())
}

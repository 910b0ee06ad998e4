//! Order Models

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Orders the kitchen still has to deal with
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }
}

/// Order header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub company_slug: String,
    pub table_number: i32,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line; name and unit price are captured at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub notes: Option<String>,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One cart line as submitted by a guest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub menu_item_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Guest cart submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub table_number: i32,
    pub items: Vec<OrderLineInput>,
    pub notes: Option<String>,
}

/// Staff status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_statuses() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Preparing.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Completed.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<OrderStatus>("\"served\"").is_err());
        let status: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(status, OrderStatus::Preparing);
    }
}

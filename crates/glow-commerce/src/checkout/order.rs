//! Order confirmation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::{PaymentMethod, Settlement};
use crate::ids::OrderId;
use crate::money::Money;

/// Delivery window quoted on every confirmation.
pub const DELIVERY_ESTIMATE: &str = "3-5 business days";

/// Summary shown to the customer once payment settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Order reference.
    pub order_id: OrderId,
    /// Amount paid.
    pub total: Money,
    /// Method used.
    pub method: PaymentMethod,
    /// Units ordered.
    pub item_count: i64,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Delivery window.
    pub delivery_estimate: String,
}

impl OrderSummary {
    /// Build the summary for a settled payment.
    pub fn from_settlement(settlement: Settlement, item_count: i64) -> Self {
        Self {
            order_id: settlement.reference,
            total: settlement.amount,
            method: settlement.method,
            item_count,
            placed_at: settlement.settled_at,
            delivery_estimate: DELIVERY_ESTIMATE.to_string(),
        }
    }

    /// Human-readable confirmation text.
    pub fn message(&self, store_name: &str) -> String {
        format!(
            "Order Confirmed!\n\nThank you for shopping with {store}!\n\n\
             Order: {order}\nItems: {items}\nTotal: {total}\nPayment: {method}\n\n\
             Shipping to South Africa\nDelivery: {delivery}",
            store = store_name,
            order = self.order_id,
            items = self.item_count,
            total = self.total.display(),
            method = self.method.display_name(),
            delivery = self.delivery_estimate,
        )
    }
}

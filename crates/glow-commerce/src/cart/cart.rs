//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One product entry in the cart.
///
/// Serializes to the persisted shape `{id, name, price, quantity}`.
/// Missing fields are tolerated on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price.
    #[serde(rename = "price", with = "money::decimal", default)]
    pub unit_price: Money,
    /// Quantity, always positive while the item is in a cart.
    #[serde(default = "default_quantity", deserialize_with = "nullable_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// A saved `null` quantity reads as zero, so restore drops just that line.
fn nullable_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// What a quantity change did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(i64),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
    /// No line with that id exists; nothing changed.
    NotInCart,
}

/// An ordered, deduplicated collection of line items.
///
/// Insertion order is preserved; the first product added stays first
/// until removed.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from possibly untrusted items (e.g. restored state).
    ///
    /// Lines with a non-positive quantity or negative price are dropped,
    /// repeated ids are merged into the first occurrence, and quantities
    /// are capped at [`MAX_QUANTITY_PER_ITEM`].
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity <= 0 || item.unit_price.is_negative() {
                tracing::warn!(product_id = %item.id, quantity = item.quantity, "dropping invalid cart line");
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => {
                    let quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                    cart.items.push(LineItem { quantity, ..item });
                }
            }
        }
        cart
    }

    /// Add an item, or increase its quantity if already present.
    ///
    /// Returns the line's resulting quantity.
    pub fn add_item(
        &mut self,
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidPrice(unit_price.display()));
        }

        let id = id.into();
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(new_quantity);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(LineItem::new(id, name, unit_price, quantity));
        Ok(quantity)
    }

    /// Overwrite an item's quantity; zero or below removes the line.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityChange, CommerceError> {
        if quantity <= 0 {
            return Ok(if self.remove_item(id) {
                QuantityChange::Removed
            } else {
                QuantityChange::NotInCart
            });
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(QuantityChange::Updated(quantity))
            }
            None => Ok(QuantityChange::NotInCart),
        }
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Remove every item. Returns whether the cart held anything.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Sum of unit price times quantity over all items.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.try_add(&item.subtotal()?).ok_or(CommerceError::Overflow)
        })
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serum() -> (ProductId, Money) {
        (ProductId::new("s1"), Money::from_decimal(250.0))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), Money::zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let (id, price) = serum();
        assert_eq!(cart.add_item(id, "Serum", price, 2).unwrap(), 2);

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let (id, price) = serum();

        cart.add_item(id.clone(), "Serum", price, 1).unwrap();
        cart.add_item(id.clone(), "Serum", price, 2).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get_item(&id).unwrap().quantity, 3);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        cart.add_item("a", "A", Money::new(100), 1).unwrap();
        cart.add_item("b", "B", Money::new(100), 1).unwrap();
        cart.add_item("a", "A", Money::new(100), 1).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        let (id, price) = serum();
        cart.add_item(id.clone(), "Serum", price, 1).unwrap();

        assert_eq!(
            cart.set_quantity(&id, 5).unwrap(),
            QuantityChange::Updated(5)
        );
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        let (id, price) = serum();
        cart.add_item(id.clone(), "Serum", price, 3).unwrap();

        assert_eq!(cart.set_quantity(&id, 0).unwrap(), QuantityChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(
            cart.set_quantity(&id, -1).unwrap(),
            QuantityChange::NotInCart
        );
    }

    #[test]
    fn test_set_quantity_unknown_id() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(&ProductId::new("ghost"), 4).unwrap(),
            QuantityChange::NotInCart
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let (id, price) = serum();
        cart.add_item(id.clone(), "Serum", price, 1).unwrap();

        assert!(cart.remove_item(&id));
        assert!(!cart.remove_item(&id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert!(!cart.clear());

        cart.add_item("a", "A", Money::new(100), 1).unwrap();
        assert!(cart.clear());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.add_item("s1", "Serum", Money::from_decimal(250.0), 1)
            .unwrap();
        cart.add_item("s2", "Cream", Money::from_decimal(150.0), 2)
            .unwrap();

        assert_eq!(cart.total().unwrap(), Money::from_decimal(550.0));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let result = cart.add_item("a", "A", Money::new(100), MAX_QUANTITY_PER_ITEM + 1);
        assert!(matches!(
            result,
            Err(CommerceError::QuantityExceedsLimit(_, MAX_QUANTITY_PER_ITEM))
        ));

        cart.add_item("a", "A", Money::new(100), MAX_QUANTITY_PER_ITEM)
            .unwrap();
        assert!(cart.add_item("a", "A", Money::new(100), 1).is_err());
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_item("a", "A", Money::new(100), 0);
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(0))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_items_sanitizes() {
        let cart = Cart::from_items(vec![
            LineItem::new("a", "A", Money::new(100), 2),
            LineItem::new("b", "B", Money::new(100), 0),
            LineItem::new("a", "A", Money::new(100), 3),
            LineItem::new("c", "C", Money::new(-5), 1),
            LineItem::new("d", "D", Money::new(1), MAX_QUANTITY_PER_ITEM * 2),
        ]);

        let lines: Vec<(&str, i64)> = cart
            .items()
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect();
        assert_eq!(lines, [("a", 5), ("d", MAX_QUANTITY_PER_ITEM)]);
    }

    #[test]
    fn test_line_item_wire_shape() {
        let item = LineItem::new("s1", "Serum", Money::from_decimal(250.5), 2);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "s1", "name": "Serum", "price": 250.5, "quantity": 2})
        );
    }

    #[test]
    fn test_line_item_tolerates_missing_fields() {
        let item: LineItem = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.unit_price, Money::zero());
        assert_eq!(item.quantity, 1);

        let item: LineItem =
            serde_json::from_str(r#"{"id": "s2", "price": "89.90", "extra": true}"#).unwrap();
        assert_eq!(item.unit_price.amount_cents, 8990);
    }
}

//! Shopping cart module.
//!
//! Contains the cart collection, its persistent store, and pricing.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, LineItem, QuantityChange, MAX_QUANTITY_PER_ITEM};
pub use pricing::{calculate_vat, CartPricing, VatBreakdown, DEFAULT_VAT_RATE};
pub use store::{CartStore, DEFAULT_CART_KEY};

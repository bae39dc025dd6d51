//! Cart, pricing and payment logic for the GlowLab storefront.
//!
//! This crate is the rendering-free core of the storefront:
//!
//! - **Cart**: line items, the persistent [`CartStore`](cart::CartStore), VAT
//! - **Checkout**: payment methods, the payment state machine, the
//!   settlement seam, shipping rates and order confirmation
//! - **Money**: cents-based amounts and price formatting
//!
//! # Example
//!
//! ```rust
//! use glow_cache::MemoryStore;
//! use glow_commerce::prelude::*;
//!
//! let mut store = CartStore::open(MemoryStore::new());
//! store.add_item("s1", "Serum", Money::from_decimal(250.0), 1).unwrap();
//! store.add_item("s2", "Cream", Money::from_decimal(150.0), 2).unwrap();
//!
//! assert_eq!(store.get_total().display_amount(), "550.00");
//! assert_eq!(format_price(1550.0), "1,550.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_price, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, Money};

    // Cart
    pub use crate::cart::{
        calculate_vat, Cart, CartPricing, CartStore, LineItem, QuantityChange, VatBreakdown,
    };

    // Checkout
    pub use crate::checkout::{
        calculate_shipping, OrderSummary, PaymentFlow, PaymentGateway, PaymentMethod,
        PaymentRequest, PaymentState, Province, Settlement, SimulatedGateway,
    };
}

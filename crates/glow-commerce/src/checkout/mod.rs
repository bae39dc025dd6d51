//! Checkout module.
//!
//! Contains payment methods, the payment state machine, the settlement
//! seam, shipping rates, and the order confirmation.

mod flow;
mod gateway;
mod order;
mod payment;
mod shipping;

pub use flow::{PaymentFlow, PaymentRequest, PaymentState};
pub use gateway::{PaymentGateway, Settlement, SimulatedGateway, DEFAULT_SETTLEMENT_DELAY};
pub use order::{OrderSummary, DELIVERY_ESTIMATE};
pub use payment::PaymentMethod;
pub use shipping::{calculate_shipping, Province, DEFAULT_SHIPPING_RATE};

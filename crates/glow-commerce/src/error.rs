//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// None of these are fatal: the storefront turns each one into a
/// user-visible message and leaves state untouched.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Price could not be parsed or is negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty! Add some products first.")]
    EmptyCart,

    /// Payment submitted before a method was chosen.
    #[error("Select a payment method first")]
    NoPaymentMethod,

    /// Unknown payment method name.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Invalid payment state transition.
    #[error("Invalid payment transition from {from} to {to}")]
    InvalidPaymentTransition { from: String, to: String },

    /// Gateway refused to settle the payment.
    #[error("Payment failed: {0}")]
    PaymentDeclined(String),

    /// Cart edit attempted while a submitted payment is settling.
    #[error("Your payment is being processed. Please wait.")]
    PaymentInProgress,

    /// Persistence medium error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<glow_cache::CacheError> for CommerceError {
    fn from(e: glow_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

//! Cart pricing calculations.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// South African VAT rate.
pub const DEFAULT_VAT_RATE: f64 = 0.15;

/// VAT charged on top of an amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VatBreakdown {
    /// VAT portion.
    pub vat_amount: Money,
    /// Amount plus VAT.
    pub total_with_vat: Money,
}

/// Compute VAT at `rate` (e.g. `0.15`) on top of `amount`.
pub fn calculate_vat(amount: Money, rate: f64) -> VatBreakdown {
    let vat_amount = amount.multiply_decimal(rate);
    VatBreakdown {
        vat_amount,
        total_with_vat: amount + vat_amount,
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// VAT on subtotal plus shipping.
    pub tax_total: Money,
    /// Final total (subtotal + shipping + tax).
    pub grand_total: Money,
}

impl CartPricing {
    /// Price a cart subtotal with shipping and VAT at `vat_rate`.
    pub fn calculate(subtotal: Money, shipping_total: Money, vat_rate: f64) -> Self {
        let vat = calculate_vat(subtotal + shipping_total, vat_rate);
        Self {
            subtotal,
            shipping_total,
            tax_total: vat.vat_amount,
            grand_total: vat.total_with_vat,
        }
    }

    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

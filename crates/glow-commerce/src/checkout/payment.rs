//! Payment method types.

use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// PayPal.
    Paypal,
    /// Bank transfer (EFT).
    BankTransfer,
    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// All methods, in the order they are offered.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
        PaymentMethod::CashOnDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer (EFT)",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Label for the confirm control once this method is selected.
    pub fn pay_label(&self, total: Money) -> String {
        match self {
            PaymentMethod::CashOnDelivery => {
                format!("Place Order ({}, pay on delivery)", total.display())
            }
            _ => format!("Pay {} with {}", total.display(), self.display_name()),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownPaymentMethod(s.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

//! Payment modal state machine.

use crate::checkout::{OrderSummary, PaymentMethod, Settlement};
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// States of the payment modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    /// Modal not shown; no markup exists.
    Closed,
    /// Modal open, waiting for the customer to pick a method.
    Selecting { method: Option<PaymentMethod> },
    /// Submitted; waiting for settlement. Cannot be cancelled.
    Pending { method: PaymentMethod },
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Closed => "closed",
            PaymentState::Selecting { .. } => "selecting",
            PaymentState::Pending { .. } => "pending",
        }
    }
}

/// What gets handed to the gateway on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Chosen method.
    pub method: PaymentMethod,
    /// Amount to settle.
    pub amount: Money,
    /// Units being paid for.
    pub item_count: i64,
}

/// Payment modal flow: `Closed -> Selecting -> Pending -> Closed`.
///
/// A refused settlement steps `Pending` back to `Selecting`.
///
/// The confirm control is only enabled in `Selecting` with a method
/// chosen, and a submitted payment cannot be re-submitted, re-opened or
/// closed until it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFlow {
    state: PaymentState,
    total: Money,
    item_count: i64,
}

impl Default for PaymentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentFlow {
    /// Create a closed flow.
    pub fn new() -> Self {
        Self {
            state: PaymentState::Closed,
            total: Money::zero(),
            item_count: 0,
        }
    }

    /// Open the modal for a cart with `item_count` units worth `total`.
    ///
    /// Rejects an empty cart. Re-opening while selecting starts over with
    /// no method chosen.
    pub fn begin(&mut self, total: Money, item_count: i64) -> Result<(), CommerceError> {
        if let PaymentState::Pending { .. } = self.state {
            return Err(self.invalid("selecting"));
        }
        if item_count <= 0 {
            return Err(CommerceError::EmptyCart);
        }

        self.state = PaymentState::Selecting { method: None };
        self.total = total;
        self.item_count = item_count;
        Ok(())
    }

    /// Choose a payment method.
    pub fn select(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        match self.state {
            PaymentState::Selecting { .. } => {
                self.state = PaymentState::Selecting {
                    method: Some(method),
                };
                Ok(())
            }
            _ => Err(self.invalid("selecting")),
        }
    }

    /// Keep the captured total in step with the cart while selecting.
    ///
    /// An emptied cart closes the modal.
    pub fn refresh(&mut self, total: Money, item_count: i64) {
        if let PaymentState::Selecting { .. } = self.state {
            if item_count <= 0 {
                self.state = PaymentState::Closed;
            }
            self.total = total;
            self.item_count = item_count;
        }
    }

    /// Whether the confirm control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, PaymentState::Selecting { method: Some(_) })
    }

    /// Submit the payment, moving to `Pending`.
    pub fn submit(&mut self) -> Result<PaymentRequest, CommerceError> {
        match self.state {
            PaymentState::Selecting {
                method: Some(method),
            } => {
                self.state = PaymentState::Pending { method };
                Ok(PaymentRequest {
                    method,
                    amount: self.total,
                    item_count: self.item_count,
                })
            }
            PaymentState::Selecting { method: None } => Err(CommerceError::NoPaymentMethod),
            _ => Err(self.invalid("pending")),
        }
    }

    /// Record settlement of the pending payment and close the modal.
    pub fn settle(&mut self, settlement: Settlement) -> Result<OrderSummary, CommerceError> {
        match self.state {
            PaymentState::Pending { method } if method == settlement.method => {
                let summary = OrderSummary::from_settlement(settlement, self.item_count);
                *self = Self::new();
                Ok(summary)
            }
            _ => Err(self.invalid("closed")),
        }
    }

    /// Return a payment the gateway refused to `Selecting`, keeping the
    /// method so the customer can retry or close the modal.
    pub fn fail(&mut self) -> Result<(), CommerceError> {
        match self.state {
            PaymentState::Pending { method } => {
                self.state = PaymentState::Selecting {
                    method: Some(method),
                };
                Ok(())
            }
            _ => Err(self.invalid("selecting")),
        }
    }

    /// Dismiss the modal without paying. Not possible once submitted.
    pub fn close(&mut self) -> Result<(), CommerceError> {
        match self.state {
            PaymentState::Pending { .. } => Err(self.invalid("closed")),
            _ => {
                *self = Self::new();
                Ok(())
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> PaymentState {
        self.state
    }

    /// Selected method, if any.
    pub fn selected(&self) -> Option<PaymentMethod> {
        match self.state {
            PaymentState::Selecting { method } => method,
            PaymentState::Pending { method } => Some(method),
            PaymentState::Closed => None,
        }
    }

    /// Total captured for this checkout.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_open(&self) -> bool {
        self.state != PaymentState::Closed
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, PaymentState::Pending { .. })
    }

    fn invalid(&self, to: &str) -> CommerceError {
        CommerceError::InvalidPaymentTransition {
            from: self.state.as_str().to_string(),
            to: to.to_string(),
        }
    }
}

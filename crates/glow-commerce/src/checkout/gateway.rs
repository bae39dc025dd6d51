//! Settlement seam.
//!
//! The storefront never moves money itself. It hands a
//! [`PaymentRequest`] to a [`PaymentGateway`] and waits for a
//! [`Settlement`]. The bundled [`SimulatedGateway`] just waits a fixed
//! delay; a real integration replaces it without touching the flow.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::{PaymentMethod, PaymentRequest};
use crate::ids::OrderId;
use crate::money::Money;
use crate::CommerceError;

/// Delay the simulated gateway waits before settling.
pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_millis(2000);

/// A completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Order reference issued by the gateway.
    pub reference: OrderId,
    /// Method that was charged.
    pub method: PaymentMethod,
    /// Amount settled.
    pub amount: Money,
    /// When settlement completed.
    pub settled_at: DateTime<Utc>,
}

/// Anything that can settle a payment request.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Settle `request`, resolving once the payment is complete.
    async fn settle(&self, request: &PaymentRequest) -> Result<Settlement, CommerceError>;
}

/// Gateway that always succeeds after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_DELAY)
    }
}

impl SimulatedGateway {
    /// Create a gateway that settles after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn settle(&self, request: &PaymentRequest) -> Result<Settlement, CommerceError> {
        tracing::debug!(method = request.method.as_str(), amount = %request.amount, "simulating settlement");
        tokio::time::sleep(self.delay).await;

        Ok(Settlement {
            reference: OrderId::generate(),
            method: request.method,
            amount: request.amount,
            settled_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            method: PaymentMethod::Card,
            amount: Money::new(55000),
            item_count: 3,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_for_delay() {
        let gateway = SimulatedGateway::default();
        let started = tokio::time::Instant::now();

        let settlement = gateway.settle(&request()).await.unwrap();

        assert!(started.elapsed() >= DEFAULT_SETTLEMENT_DELAY);
        assert_eq!(settlement.method, PaymentMethod::Card);
        assert_eq!(settlement.amount, Money::new(55000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_is_not_ready_early() {
        let gateway = SimulatedGateway::new(Duration::from_millis(500));
        let request = request();
        let settle = gateway.settle(&request);
        tokio::pin!(settle);

        let early = tokio::time::timeout(Duration::from_millis(499), &mut settle).await;
        assert!(early.is_err());
        assert!(settle.await.is_ok());
    }
}

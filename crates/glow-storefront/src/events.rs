//! Delegated UI events.
//!
//! The host installs one click listener at the document root and
//! forwards each click's `data-action` plus the element's `data-*`
//! attributes here. Because resolution happens at dispatch time, markup
//! can be replaced freely without re-binding anything.

use std::collections::BTreeMap;

use glow_commerce::checkout::PaymentMethod;
use glow_commerce::{Money, ProductId};

use crate::content::ArticleId;
use crate::error::StorefrontError;

/// `data-*` attributes of a clicked element, without the `data-` prefix.
pub type DataSet = BTreeMap<String, String>;

/// Inbound events the storefront handles.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    AddToCart {
        id: ProductId,
        name: String,
        price: Money,
        quantity: i64,
    },
    Increment(ProductId),
    Decrement(ProductId),
    /// Trash control on a cart line; asks for confirmation.
    Remove(ProductId),
    OpenCart,
    CloseCart,
    /// Click landed outside the cart sidebar and its toggle.
    OutsideClick,
    /// Escape key.
    Escape,
    ClearCart,
    Checkout,
    SelectPayment(PaymentMethod),
    SubmitPayment,
    ClosePayment,
    OpenArticle(ArticleId),
    CloseArticle,
}

impl UiEvent {
    /// Resolve a delegated click.
    pub fn from_action(action: &str, data: &DataSet) -> Result<Self, StorefrontError> {
        let event = match action {
            "add-to-cart" => UiEvent::AddToCart {
                id: ProductId::new(required(action, data, "id")?),
                name: required(action, data, "name")?.to_string(),
                price: {
                    let raw = required(action, data, "price")?;
                    Money::parse(raw).map_err(|_| invalid(action, "price", raw))?
                },
                quantity: match data.get("quantity") {
                    Some(raw) => raw.trim().parse().map_err(|_| invalid(action, "quantity", raw))?,
                    None => 1,
                },
            },
            "increment" => UiEvent::Increment(ProductId::new(required(action, data, "id")?)),
            "decrement" => UiEvent::Decrement(ProductId::new(required(action, data, "id")?)),
            "remove-item" => UiEvent::Remove(ProductId::new(required(action, data, "id")?)),
            "open-cart" => UiEvent::OpenCart,
            "close-cart" => UiEvent::CloseCart,
            "clear-cart" => UiEvent::ClearCart,
            "checkout" => UiEvent::Checkout,
            "select-payment" => {
                let raw = required(action, data, "method")?;
                UiEvent::SelectPayment(raw.parse().map_err(|_| invalid(action, "method", raw))?)
            }
            "submit-payment" => UiEvent::SubmitPayment,
            "close-payment" => UiEvent::ClosePayment,
            "open-article" => {
                let raw = required(action, data, "id")?;
                UiEvent::OpenArticle(raw.trim().parse().map_err(|_| invalid(action, "id", raw))?)
            }
            "close-article" => UiEvent::CloseArticle,
            other => return Err(StorefrontError::UnknownAction(other.to_string())),
        };
        Ok(event)
    }

    /// Resolve a key press; only Escape means anything.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(UiEvent::Escape)
    }
}

fn required<'a>(
    action: &str,
    data: &'a DataSet,
    field: &'static str,
) -> Result<&'a str, StorefrontError> {
    data.get(field)
        .map(String::as_str)
        .ok_or_else(|| StorefrontError::MissingData {
            action: action.to_string(),
            field,
        })
}

fn invalid(action: &str, field: &'static str, value: &str) -> StorefrontError {
    StorefrontError::InvalidData {
        action: action.to_string(),
        field,
        value: value.to_string(),
    }
}

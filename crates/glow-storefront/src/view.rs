//! Render hooks the page host implements.

use glow_commerce::cart::LineItem;
use glow_commerce::checkout::{OrderSummary, PaymentMethod};
use glow_commerce::{Money, ProductId};

use crate::content::Article;
use crate::notify::Notification;

/// Overlay panels the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    /// Cart sidebar.
    Cart,
    /// Payment-method modal.
    Payment,
    /// Article reader modal.
    Article,
}

/// Look of a product card's add-to-cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddButtonState {
    /// Normal "Add to Cart".
    Idle,
    /// Brief "Added!" confirmation.
    Added,
}

/// Everything needed to draw the payment modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentView {
    /// Methods in display order, with the selected one flagged.
    pub options: Vec<(PaymentMethod, bool)>,
    /// Amount being paid.
    pub total: Money,
    /// Text on the confirm control.
    pub button_label: String,
    /// Whether the confirm control accepts clicks.
    pub button_enabled: bool,
    /// Settlement in progress.
    pub processing: bool,
}

/// Outward calls the storefront makes to its host UI.
///
/// Implementations redraw wholesale on every call; the storefront
/// never asks for incremental updates. Controls in rendered markup must
/// be wired through [`UiEvent::from_action`](crate::UiEvent::from_action)
/// at a stable ancestor, so nothing needs re-binding after a render.
pub trait StorefrontView {
    /// Replace the cart's item list.
    fn render_items(&mut self, items: &[LineItem]);

    /// Replace the displayed cart total (already formatted).
    fn render_total(&mut self, total: &str);

    /// Replace the header badge with the number of units in the cart.
    fn render_count(&mut self, count: i64);

    /// Show a toast, removing any toast already displayed.
    fn show_notification(&mut self, notification: &Notification);

    /// Begin fading the current toast out.
    fn fade_notification(&mut self) {}

    /// Remove the current toast.
    fn dismiss_notification(&mut self);

    /// Show or hide a panel. Hiding the payment panel discards its markup.
    fn set_panel(&mut self, panel: Panel, visible: bool);

    /// Lock or unlock background scrolling.
    fn set_scroll_lock(&mut self, locked: bool);

    /// Redraw the payment modal.
    fn render_payment(&mut self, payment: &PaymentView);

    /// Show the final order confirmation.
    fn show_order_summary(&mut self, summary: &OrderSummary, message: &str);

    /// Fill the article reader.
    fn render_article(&mut self, article: &Article);

    /// Switch a product's add-to-cart button look.
    fn set_add_button(&mut self, product_id: &ProductId, state: AddButtonState);

    /// Blocking message (e.g. checkout on an empty cart).
    fn alert(&mut self, message: &str);

    /// Ask the customer to confirm a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;
}

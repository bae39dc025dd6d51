//! Page controller.
//!
//! [`Storefront`] owns the page session: the persisted cart, the payment
//! modal, the article reader and the transient UI timers. Every inbound
//! event goes through it, and every outward effect goes through the
//! host's [`StorefrontView`].

use glow_cache::KvStore;
use glow_commerce::cart::{calculate_vat, CartPricing, CartStore, QuantityChange, VatBreakdown};
use glow_commerce::checkout::{
    calculate_shipping, OrderSummary, PaymentFlow, PaymentGateway, PaymentMethod,
    PaymentRequest, Settlement,
};
use glow_commerce::{CommerceError, Money, ProductId};
use tokio::time::Instant;

use crate::config::StorefrontConfig;
use crate::content::{ArticleId, ContentLibrary, ContentViewer};
use crate::error::StorefrontError;
use crate::events::UiEvent;
use crate::notify::{ButtonFeedback, NotificationKind, Notifier, NotifierEvent};
use crate::view::{AddButtonState, Panel, PaymentView, StorefrontView};

/// Label on the confirm control before a method is chosen.
pub const SELECT_METHOD_LABEL: &str = "Select a payment method";

/// Label on the confirm control while settlement is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fully handled.
    Done,
    /// Payment submitted; hand the request to a gateway and pass the
    /// settlement to [`Storefront::finish_payment`], or a refusal to
    /// [`Storefront::fail_payment`].
    AwaitingSettlement(PaymentRequest),
}

/// A storefront page session.
pub struct Storefront<S: KvStore, V: StorefrontView> {
    config: StorefrontConfig,
    cart: CartStore<S>,
    payment: PaymentFlow,
    content: ContentViewer,
    notifier: Notifier,
    feedback: ButtonFeedback,
    cart_open: bool,
    view: V,
}

impl<S: KvStore, V: StorefrontView> Storefront<S, V> {
    /// Restore the cart from `store` and draw the initial page.
    pub fn load(config: StorefrontConfig, store: S, library: ContentLibrary, view: V) -> Self {
        let cart = CartStore::open_with_key(store, config.storage_key.clone());
        let mut storefront = Self {
            notifier: Notifier::new(config.notification_ttl(), config.notification_fade()),
            feedback: ButtonFeedback::new(config.add_feedback()),
            config,
            cart,
            payment: PaymentFlow::new(),
            content: ContentViewer::new(library),
            cart_open: false,
            view,
        };
        storefront.render_cart();
        storefront.sync_scroll_lock();

        tracing::info!(
            store = %storefront.config.store_name,
            items = storefront.cart.item_count(),
            articles = storefront.content.library().len(),
            "storefront loaded"
        );
        storefront
    }

    // ---- cart ----

    /// Add `quantity` of a product, merging with an existing line.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> Result<i64, StorefrontError> {
        self.ensure_editable()?;
        match self.cart.add_item(id.clone(), name, price, quantity) {
            Ok(new_quantity) => {
                self.render_cart();
                self.notify(format!("{name} added to cart!"), NotificationKind::Success);
                self.view.set_add_button(&id, AddButtonState::Added);
                self.feedback.start(id, Instant::now());
                Ok(new_quantity)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        if self.cart.get_item(id).is_none() || self.ensure_editable().is_err() {
            return false;
        }
        if !self.cart.remove_item(id) {
            return false;
        }
        self.render_cart();
        self.notify("Item removed from cart", NotificationKind::Info);
        true
    }

    /// Remove a line after the customer confirms.
    pub fn request_remove(&mut self, id: &ProductId) -> bool {
        if self.payment.is_pending() {
            return self.remove_item(id);
        }
        let Some(item) = self.cart.get_item(id) else {
            return false;
        };
        let prompt = format!("Remove {} from your cart?", item.name);
        if !self.view.confirm(&prompt) {
            return false;
        }
        self.remove_item(id)
    }

    /// Overwrite a line's quantity; zero or below removes it.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityChange, StorefrontError> {
        if self.cart.get_item(id).is_none() {
            return Ok(QuantityChange::NotInCart);
        }
        self.ensure_editable()?;
        let change = match self.cart.set_quantity(id, quantity) {
            Ok(change) => change,
            Err(e) => return Err(self.reject(e)),
        };

        match change {
            QuantityChange::Updated(_) => self.render_cart(),
            QuantityChange::Removed => {
                self.render_cart();
                self.notify("Item removed from cart", NotificationKind::Info);
            }
            QuantityChange::NotInCart => {}
        }
        Ok(change)
    }

    /// One more unit of a line already in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Result<QuantityChange, StorefrontError> {
        match self.cart.get_item(id).map(|item| item.quantity) {
            Some(quantity) => self.set_quantity(id, quantity.saturating_add(1)),
            None => Ok(QuantityChange::NotInCart),
        }
    }

    /// One fewer unit; the last unit removes the line without asking.
    pub fn decrement(&mut self, id: &ProductId) -> Result<QuantityChange, StorefrontError> {
        match self.cart.get_item(id).map(|item| item.quantity) {
            Some(quantity) => self.set_quantity(id, quantity - 1),
            None => Ok(QuantityChange::NotInCart),
        }
    }

    /// Empty the cart after the customer confirms. No-op when already empty.
    pub fn clear(&mut self) -> bool {
        if self.cart.is_empty() || self.ensure_editable().is_err() {
            return false;
        }
        if !self.view.confirm("Are you sure you want to clear your cart?") {
            return false;
        }
        self.empty_cart();
        self.notify("Cart cleared!", NotificationKind::Info);
        true
    }

    /// Show the cart sidebar.
    pub fn open_cart(&mut self) {
        self.cart_open = true;
        self.view.set_panel(Panel::Cart, true);
        self.sync_scroll_lock();
    }

    /// Hide the cart sidebar.
    pub fn close_cart(&mut self) {
        self.cart_open = false;
        self.view.set_panel(Panel::Cart, false);
        self.sync_scroll_lock();
    }

    // ---- checkout ----

    /// Open the payment modal for the current cart.
    ///
    /// An empty cart is refused with an alert and nothing changes.
    pub fn begin_checkout(&mut self) -> Result<(), StorefrontError> {
        if let Err(e) = self
            .payment
            .begin(self.cart.get_total(), self.cart.item_count())
        {
            if matches!(e, CommerceError::EmptyCart) {
                self.view.alert(&e.to_string());
                return Err(e.into());
            }
            return Err(self.reject(e));
        }

        tracing::info!(total = %self.payment.total(), "checkout started");
        self.render_payment();
        self.view.set_panel(Panel::Payment, true);
        self.sync_scroll_lock();
        Ok(())
    }

    /// Choose a payment method in the open modal.
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), StorefrontError> {
        if let Err(e) = self.payment.select(method) {
            return Err(self.reject(e));
        }
        self.render_payment();
        Ok(())
    }

    /// Dismiss the payment modal. Refused once payment is submitted.
    pub fn close_payment(&mut self) -> Result<(), StorefrontError> {
        if let Err(e) = self.payment.close() {
            return Err(self.reject(e));
        }
        self.view.set_panel(Panel::Payment, false);
        self.sync_scroll_lock();
        Ok(())
    }

    /// Submit the selected method, locking the modal until settlement.
    pub fn start_payment(&mut self) -> Result<PaymentRequest, StorefrontError> {
        let request = match self.payment.submit() {
            Ok(request) => request,
            Err(e) => return Err(self.reject(e)),
        };

        tracing::info!(
            method = request.method.as_str(),
            amount = %request.amount,
            "payment submitted"
        );
        self.render_payment();
        Ok(request)
    }

    /// Complete a submitted payment: empty the cart, close the panels and
    /// show the confirmation.
    pub fn finish_payment(
        &mut self,
        settlement: Settlement,
    ) -> Result<OrderSummary, StorefrontError> {
        let summary = match self.payment.settle(settlement) {
            Ok(summary) => summary,
            Err(e) => return Err(self.reject(e)),
        };

        self.notify("Payment successful! Order confirmed.", NotificationKind::Success);
        self.empty_cart();
        self.cart_open = false;
        self.view.set_panel(Panel::Cart, false);
        self.view.set_panel(Panel::Payment, false);
        self.sync_scroll_lock();

        let message = summary.message(&self.config.store_name);
        self.view.show_order_summary(&summary, &message);

        tracing::info!(
            order_id = %summary.order_id,
            total = %summary.total,
            method = summary.method.as_str(),
            items = summary.item_count,
            "order placed"
        );
        Ok(summary)
    }

    /// Submit and wait for `gateway` to settle.
    pub async fn submit_payment<G>(&mut self, gateway: &G) -> Result<OrderSummary, StorefrontError>
    where
        G: PaymentGateway + ?Sized,
    {
        let request = self.start_payment()?;
        self.settle_with(&request, gateway).await
    }

    /// Record that `gateway` refused the submitted payment.
    ///
    /// The modal returns to method selection with the same method chosen,
    /// so the customer can retry or close it. Returns the error for the
    /// caller to propagate.
    pub fn fail_payment(&mut self, error: CommerceError) -> StorefrontError {
        tracing::warn!(%error, "settlement failed");
        if self.payment.fail().is_ok() {
            self.render_payment();
        }
        self.reject(error)
    }

    async fn settle_with<G>(
        &mut self,
        request: &PaymentRequest,
        gateway: &G,
    ) -> Result<OrderSummary, StorefrontError>
    where
        G: PaymentGateway + ?Sized,
    {
        match gateway.settle(request).await {
            Ok(settlement) => self.finish_payment(settlement),
            Err(e) => Err(self.fail_payment(e)),
        }
    }

    // ---- articles ----

    /// Open an article in the reader. Unknown ids do nothing.
    pub fn open_article(&mut self, id: ArticleId) -> bool {
        let Some(article) = self.content.show(id) else {
            tracing::debug!(article_id = id, "unknown article");
            return false;
        };
        self.view.render_article(article);
        self.view.set_panel(Panel::Article, true);
        self.sync_scroll_lock();
        true
    }

    /// Close the article reader.
    pub fn close_article(&mut self) -> bool {
        if !self.content.hide() {
            return false;
        }
        self.view.set_panel(Panel::Article, false);
        self.sync_scroll_lock();
        true
    }

    // ---- events ----

    /// Handle one inbound event.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Outcome, StorefrontError> {
        tracing::trace!(?event, "dispatch");
        match event {
            UiEvent::AddToCart {
                id,
                name,
                price,
                quantity,
            } => {
                self.add_item(id, &name, price, quantity)?;
            }
            UiEvent::Increment(id) => {
                self.increment(&id)?;
            }
            UiEvent::Decrement(id) => {
                self.decrement(&id)?;
            }
            UiEvent::Remove(id) => {
                self.request_remove(&id);
            }
            UiEvent::OpenCart => self.open_cart(),
            UiEvent::CloseCart => self.close_cart(),
            UiEvent::OutsideClick => {
                if self.cart_open {
                    self.close_cart();
                }
            }
            UiEvent::Escape => self.escape(),
            UiEvent::ClearCart => {
                self.clear();
            }
            UiEvent::Checkout => self.begin_checkout()?,
            UiEvent::SelectPayment(method) => self.select_payment(method)?,
            UiEvent::SubmitPayment => {
                return self.start_payment().map(Outcome::AwaitingSettlement);
            }
            UiEvent::ClosePayment => self.close_payment()?,
            UiEvent::OpenArticle(id) => {
                self.open_article(id);
            }
            UiEvent::CloseArticle => {
                self.close_article();
            }
        }
        Ok(Outcome::Done)
    }

    /// Handle one event, settling through `gateway` if it submits payment.
    pub async fn dispatch_with<G>(
        &mut self,
        event: UiEvent,
        gateway: &G,
    ) -> Result<Option<OrderSummary>, StorefrontError>
    where
        G: PaymentGateway + ?Sized,
    {
        match self.dispatch(event)? {
            Outcome::Done => Ok(None),
            Outcome::AwaitingSettlement(request) => {
                self.settle_with(&request, gateway).await.map(Some)
            }
        }
    }

    /// Advance notification and button timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        match self.notifier.tick(now) {
            Some(NotifierEvent::Fade) => self.view.fade_notification(),
            Some(NotifierEvent::Dismiss) => self.view.dismiss_notification(),
            None => {}
        }
        for id in self.feedback.expire(now) {
            self.view.set_add_button(&id, AddButtonState::Idle);
        }
    }

    // ---- quotes ----

    /// VAT included in a cart total at the configured rate.
    pub fn vat_breakdown(&self) -> VatBreakdown {
        calculate_vat(self.cart.get_total(), self.config.vat_rate)
    }

    /// Flat shipping to `province`; unknown names get the default rate.
    pub fn shipping_quote(&self, province: &str) -> Money {
        calculate_shipping(province)
    }

    /// Full price breakdown for delivery to `province`.
    pub fn pricing(&self, province: &str) -> CartPricing {
        CartPricing::calculate(
            self.cart.get_total(),
            self.shipping_quote(province),
            self.config.vat_rate,
        )
    }

    // ---- accessors ----

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn payment(&self) -> &PaymentFlow {
        &self.payment
    }

    pub fn content(&self) -> &ContentViewer {
        &self.content
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Whether background scrolling is locked by some open panel.
    pub fn is_scroll_locked(&self) -> bool {
        self.cart_open || self.payment.is_open() || self.content.is_open()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// End the session, handing back the persistence medium and the view.
    pub fn into_parts(self) -> (S, V) {
        (self.cart.into_store(), self.view)
    }

    // ---- internals ----

    fn escape(&mut self) {
        self.close_article();
        if self.payment.is_open() && !self.payment.is_pending() {
            let _ = self.close_payment();
        }
        if self.cart_open {
            self.close_cart();
        }
    }

    /// Refuse cart edits while a submitted payment is settling, so the
    /// cleared cart is exactly the one that was paid for.
    fn ensure_editable(&mut self) -> Result<(), StorefrontError> {
        if self.payment.is_pending() {
            return Err(self.reject(CommerceError::PaymentInProgress));
        }
        Ok(())
    }

    fn empty_cart(&mut self) {
        self.cart.clear();
        self.render_cart();
    }

    /// Redraw list, total and badge together, then keep an open modal in
    /// step with the cart.
    fn render_cart(&mut self) {
        let total = self.cart.get_total();
        self.view.render_items(self.cart.items());
        self.view
            .render_total(&total.display_with(&self.config.currency_symbol));
        self.view.render_count(self.cart.item_count());

        if self.payment.is_open() && !self.payment.is_pending() {
            self.payment.refresh(total, self.cart.item_count());
            if self.payment.is_open() {
                self.render_payment();
            } else {
                self.view.set_panel(Panel::Payment, false);
                self.sync_scroll_lock();
            }
        }
    }

    fn render_payment(&mut self) {
        let selected = self.payment.selected();
        let total = self.payment.total();
        let processing = self.payment.is_pending();

        let button_label = match selected {
            _ if processing => PROCESSING_LABEL.to_string(),
            Some(method) => method.pay_label(total),
            None => SELECT_METHOD_LABEL.to_string(),
        };

        let payment = PaymentView {
            options: PaymentMethod::ALL
                .iter()
                .map(|&method| (method, selected == Some(method)))
                .collect(),
            total,
            button_label,
            button_enabled: self.payment.can_submit(),
            processing,
        };
        self.view.render_payment(&payment);
    }

    fn sync_scroll_lock(&mut self) {
        let locked = self.is_scroll_locked();
        self.view.set_scroll_lock(locked);
    }

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let notification = self.notifier.show(message, kind, Instant::now());
        self.view.show_notification(notification);
    }

    /// Show a rule violation to the customer and hand it back as an error.
    fn reject(&mut self, error: CommerceError) -> StorefrontError {
        tracing::debug!(%error, "action rejected");
        self.notify(error.to_string(), NotificationKind::Error);
        error.into()
    }
}

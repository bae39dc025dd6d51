//! String-markup implementation of [`StorefrontView`].
//!
//! `HtmlView` keeps the page as markup fragments. Every interactive
//! element carries `data-action` plus its arguments as `data-*`
//! attributes, so a single delegated listener can route any click
//! through [`UiEvent::from_action`] no matter how often the fragments
//! are replaced.

use std::collections::{BTreeMap, BTreeSet};

use glow_commerce::cart::LineItem;
use glow_commerce::checkout::OrderSummary;
use glow_commerce::{Money, ProductId};

use crate::content::Article;
use crate::error::StorefrontError;
use crate::events::{DataSet, UiEvent};
use crate::notify::{Notification, NotificationKind};
use crate::view::{AddButtonState, Panel, PaymentView, StorefrontView};

/// Toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: NotificationKind,
    pub fading: bool,
}

/// An interactive element found in rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Value of `data-action`.
    pub action: String,
    /// Remaining `data-*` attributes, prefix stripped.
    pub data: DataSet,
    /// False when the element carries `disabled`.
    pub enabled: bool,
}

impl Control {
    /// Resolve the click this control would produce.
    pub fn event(&self) -> Result<UiEvent, StorefrontError> {
        UiEvent::from_action(&self.action, &self.data)
    }
}

/// In-memory page built from markup strings.
#[derive(Debug, Clone)]
pub struct HtmlView {
    currency_symbol: String,
    items_html: String,
    total_text: String,
    count: i64,
    toast: Option<Toast>,
    panels: BTreeSet<Panel>,
    scroll_locked: bool,
    payment_html: Option<String>,
    order_summary: Option<String>,
    article_html: Option<String>,
    add_buttons: BTreeMap<ProductId, AddButtonState>,
    alerts: Vec<String>,
    prompts: Vec<String>,
    confirm_answer: bool,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self::new(glow_commerce::money::CURRENCY_SYMBOL)
    }
}

impl HtmlView {
    /// Empty page. Confirmation prompts are accepted until told otherwise.
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            items_html: String::new(),
            total_text: String::new(),
            count: 0,
            toast: None,
            panels: BTreeSet::new(),
            scroll_locked: false,
            payment_html: None,
            order_summary: None,
            article_html: None,
            add_buttons: BTreeMap::new(),
            alerts: Vec::new(),
            prompts: Vec::new(),
            confirm_answer: true,
        }
    }

    /// Answer future confirmation prompts with `answer`.
    pub fn set_confirm_answer(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    /// Markup for a product card's add-to-cart button.
    pub fn product_button(&self, id: &ProductId, name: &str, price: Money) -> String {
        let (class, label) = match self.add_button(id) {
            AddButtonState::Idle => ("add-to-cart", "Add to Cart"),
            AddButtonState::Added => ("add-to-cart added", "Added!"),
        };
        format!(
            r#"<button class="{class}" data-action="add-to-cart" data-id="{id}" data-name="{name}" data-price="{price}">{label}</button>"#,
            id = escape(id.as_str()),
            name = escape(name),
            price = price.display_amount().replace(',', ""),
        )
    }

    /// The cart sidebar, header badge and any open modals.
    pub fn page_html(&self) -> String {
        let mut page = format!(
            concat!(
                r#"<header><button class="cart-toggle" data-action="open-cart">"#,
                r#"Cart <span class="cart-count">{count}</span></button></header>"#,
                r#"<aside class="cart-sidebar{open}">"#,
                r#"<button class="close-cart" data-action="close-cart">&times;</button>"#,
                r#"<div class="cart-items">{items}</div>"#,
                r#"<div class="cart-total">Total: <span>{total}</span></div>"#,
                r#"<button class="clear-cart" data-action="clear-cart">Clear Cart</button>"#,
                r#"<button class="checkout-btn" data-action="checkout">Checkout</button>"#,
                r#"</aside>"#,
            ),
            count = self.count,
            open = if self.is_visible(Panel::Cart) { " open" } else { "" },
            items = self.items_html,
            total = escape(&self.total_text),
        );
        if let Some(payment) = &self.payment_html {
            page.push_str(payment);
        }
        if let Some(article) = self.article_html.as_ref().filter(|_| self.is_visible(Panel::Article)) {
            page.push_str(article);
        }
        page
    }

    /// Every interactive element on the page, in document order.
    pub fn controls(&self) -> Vec<Control> {
        parse_controls(&self.page_html())
    }

    /// First control with `action` whose `data-id` is `id` (if given).
    pub fn find_control(&self, action: &str, id: Option<&str>) -> Option<Control> {
        self.controls().into_iter().find(|c| {
            c.action == action && id.map_or(true, |id| c.data.get("id").map(String::as_str) == Some(id))
        })
    }

    pub fn items_html(&self) -> &str {
        &self.items_html
    }

    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Payment modal markup; `None` once the modal is hidden.
    pub fn payment_html(&self) -> Option<&str> {
        self.payment_html.as_deref()
    }

    pub fn order_summary(&self) -> Option<&str> {
        self.order_summary.as_deref()
    }

    pub fn article_html(&self) -> Option<&str> {
        self.article_html.as_deref()
    }

    pub fn add_button(&self, id: &ProductId) -> AddButtonState {
        self.add_buttons
            .get(id)
            .copied()
            .unwrap_or(AddButtonState::Idle)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    fn price(&self, amount: Money) -> String {
        escape(&amount.display_with(&self.currency_symbol))
    }
}

impl StorefrontView for HtmlView {
    fn render_items(&mut self, items: &[LineItem]) {
        if items.is_empty() {
            self.items_html = r#"<p class="empty-cart">Your cart is empty</p>"#.to_string();
            return;
        }

        self.items_html = items
            .iter()
            .map(|item| {
                let id = escape(item.id.as_str());
                format!(
                    concat!(
                        r#"<div class="cart-item" data-id="{id}">"#,
                        r#"<div class="cart-item-info"><h4>{name}</h4>"#,
                        r#"<p class="cart-item-price">{price}</p></div>"#,
                        r#"<div class="quantity-controls">"#,
                        r#"<button class="qty-btn" data-action="decrement" data-id="{id}">-</button>"#,
                        r#"<span class="quantity">{quantity}</span>"#,
                        r#"<button class="qty-btn" data-action="increment" data-id="{id}">+</button>"#,
                        r#"</div>"#,
                        r#"<button class="remove-item" data-action="remove-item" data-id="{id}">&#128465;</button>"#,
                        r#"</div>"#,
                    ),
                    id = id,
                    name = escape(&item.name),
                    price = self.price(item.unit_price),
                    quantity = item.quantity,
                )
            })
            .collect();
    }

    fn render_total(&mut self, total: &str) {
        self.total_text = total.to_string();
    }

    fn render_count(&mut self, count: i64) {
        self.count = count;
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.toast = Some(Toast {
            message: notification.message.clone(),
            kind: notification.kind,
            fading: false,
        });
    }

    fn fade_notification(&mut self) {
        if let Some(toast) = self.toast.as_mut() {
            toast.fading = true;
        }
    }

    fn dismiss_notification(&mut self) {
        self.toast = None;
    }

    fn set_panel(&mut self, panel: Panel, visible: bool) {
        if visible {
            self.panels.insert(panel);
        } else {
            self.panels.remove(&panel);
            if panel == Panel::Payment {
                self.payment_html = None;
            }
        }
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn render_payment(&mut self, payment: &PaymentView) {
        let options: String = payment
            .options
            .iter()
            .map(|(method, selected)| {
                format!(
                    r#"<button class="payment-option{sel}" data-action="select-payment" data-method="{m}"{dis}>{label}</button>"#,
                    sel = if *selected { " selected" } else { "" },
                    m = method.as_str(),
                    dis = if payment.processing { " disabled" } else { "" },
                    label = escape(method.display_name()),
                )
            })
            .collect();

        let spinner = if payment.processing {
            r#"<span class="spinner"></span>"#
        } else {
            ""
        };

        self.payment_html = Some(format!(
            concat!(
                r#"<div class="payment-modal">"#,
                r#"<h3>Choose Payment Method</h3>"#,
                r#"<p class="payment-total">Total: {total}</p>"#,
                r#"<div class="payment-options">{options}</div>"#,
                r#"<button class="pay-btn" data-action="submit-payment"{dis}>{spinner}{label}</button>"#,
                r#"<button class="close-payment" data-action="close-payment"{close_dis}>Cancel</button>"#,
                r#"</div>"#,
            ),
            total = self.price(payment.total),
            options = options,
            dis = if payment.button_enabled { "" } else { " disabled" },
            spinner = spinner,
            label = escape(&payment.button_label),
            close_dis = if payment.processing { " disabled" } else { "" },
        ));
    }

    fn show_order_summary(&mut self, _summary: &OrderSummary, message: &str) {
        self.order_summary = Some(message.to_string());
    }

    fn render_article(&mut self, article: &Article) {
        self.article_html = Some(format!(
            concat!(
                r#"<article class="article-detail">"#,
                r#"<button class="close-article" data-action="close-article">&times;</button>"#,
                r#"<h2>{title}</h2><p class="byline">{byline}</p>"#,
                r#"<div class="article-body">{body}</div>"#,
                r#"</article>"#,
            ),
            title = escape(&article.title),
            byline = escape(&article.byline()),
            body = article.html_body,
        ));
    }

    fn set_add_button(&mut self, product_id: &ProductId, state: AddButtonState) {
        match state {
            AddButtonState::Idle => self.add_buttons.remove(product_id),
            AddButtonState::Added => self.add_buttons.insert(product_id.clone(), state),
        };
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn parse_controls(html: &str) -> Vec<Control> {
    let mut controls = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let tag = &after[..end];
        rest = &after[end + 1..];

        if tag.starts_with('/') {
            continue;
        }
        let mut attrs = parse_attributes(tag);
        let Some(Some(action)) = attrs.remove("data-action") else {
            continue;
        };

        let enabled = !attrs.contains_key("disabled");
        let data = attrs
            .into_iter()
            .filter_map(|(name, value)| {
                let key = name.strip_prefix("data-")?;
                Some((key.to_string(), value.unwrap_or_default()))
            })
            .collect();
        controls.push(Control {
            action,
            data,
            enabled,
        });
    }
    controls
}

fn parse_attributes(tag: &str) -> BTreeMap<String, Option<String>> {
    let mut attrs = BTreeMap::new();
    let mut rest = tag
        .split_once(char::is_whitespace)
        .map_or("", |(_, attrs)| attrs);

    loop {
        rest = rest.trim_start();
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() || name == "/" {
            break;
        }
        rest = &rest[name_end..];

        if let Some(quoted) = rest.strip_prefix("=\"") {
            let Some(close) = quoted.find('"') else {
                break;
            };
            attrs.insert(name.to_string(), Some(unescape(&quoted[..close])));
            rest = &quoted[close + 1..];
        } else {
            attrs.insert(name.to_string(), None);
        }
    }
    attrs
}

//! GlowLab storefront page controller.
//!
//! Wires the rendering-free core in `glow-commerce` to a host page:
//!
//! - [`Storefront`] owns one page session and handles every [`UiEvent`]
//! - [`StorefrontView`] is the set of render hooks the host implements
//! - [`HtmlView`] is a markup-string host used for tests and server rendering
//!
//! # Example
//!
//! ```rust
//! use glow_cache::MemoryStore;
//! use glow_storefront::{ContentLibrary, HtmlView, Storefront, StorefrontConfig, UiEvent};
//!
//! let mut storefront = Storefront::load(
//!     StorefrontConfig::default(),
//!     MemoryStore::new(),
//!     ContentLibrary::new(),
//!     HtmlView::default(),
//! );
//!
//! let data = [("id", "s1"), ("name", "Serum"), ("price", "250.00")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let click = UiEvent::from_action("add-to-cart", &data).unwrap();
//!
//! storefront.dispatch(click).unwrap();
//! assert_eq!(storefront.view().total_text(), "R250.00");
//! assert_eq!(storefront.view().count(), 1);
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod html;
pub mod notify;
pub mod storefront;
pub mod view;

pub use config::StorefrontConfig;
pub use content::{Article, ArticleId, ContentLibrary, ContentViewer};
pub use error::StorefrontError;
pub use events::{DataSet, UiEvent};
pub use html::{Control, HtmlView};
pub use notify::{ButtonFeedback, Notification, NotificationKind, Notifier, NotifierEvent};
pub use storefront::{Outcome, Storefront};
pub use view::{AddButtonState, Panel, PaymentView, StorefrontView};

/// Install logging as configured.
pub fn init_logging(config: &StorefrontConfig) {
    glow_observability::init(config.log_format, config.log_level);
}

//! Storefront error types.

use glow_commerce::CommerceError;
use thiserror::Error;

/// Errors surfaced by the storefront controller.
///
/// User-facing failures are also shown through the view before they are
/// returned, so a host may ignore them.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Cart or checkout rule rejected the action.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Delegated click with an action name nobody handles.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Delegated click missing a required `data-*` attribute.
    #[error("Action {action} is missing data-{field}")]
    MissingData {
        action: String,
        field: &'static str,
    },

    /// Attribute present but unparseable.
    #[error("Action {action} has invalid data-{field}: {value}")]
    InvalidData {
        action: String,
        field: &'static str,
        value: String,
    },
}

//! Logging setup for the GlowLab storefront.
//!
//! Every crate logs through `tracing` macros; this crate only decides
//! where those events go.

pub mod logging;

pub use logging::{init, LogFormat, LogLevel, ParseError};

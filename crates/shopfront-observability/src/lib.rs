//! Logging for the storefront.
//!
//! This crate provides:
//! - `LogConfig` / `LogFormat` - what to log and how it looks
//! - `init` - install the global `tracing` subscriber
//! - `ConsoleMakeWriter` - routes formatted events to the browser console
//!   (or stderr off the web)

mod console;
mod logging;

pub use console::{ConsoleMakeWriter, ConsoleWriter};
pub use logging::*;

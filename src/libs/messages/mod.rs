//! User-facing text for the amelia application.
//!
//! Every string shown to the user is a [`Message`] variant rendered through
//! its `Display` implementation. The output macros in [`macros`] print
//! messages with a category prefix, or route them to `tracing` in debug mode.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
